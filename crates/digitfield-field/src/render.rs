//! Per-frame drawing of the particle field.

use digitfield_core::{FieldConfig, RenderMode};

use crate::particle::Particle;

/// Radius around the pointer inside which glyphs shrink.
pub const INTERACTION_RADIUS_PX: f32 = 200.0;
/// Fraction of the size removed at the pointer itself.
pub const MAX_PROXIMITY_SHRINK: f32 = 0.7;

/// A drawing target for the field.
///
/// Mirrors a 2D text canvas: a font is set, then glyphs are drawn with it.
/// Coordinates are virtual pixels with the origin at the top-left corner.
pub trait Surface {
    /// Paint the whole surface opaque black.
    fn fill_black(&mut self);
    /// Set the font size used by following glyphs.
    fn set_font(&mut self, size_px: f32);
    /// Draw a digit centered at `(x, y)` in white with the given opacity.
    fn draw_digit(&mut self, x: f32, y: f32, digit: u8, opacity: f32);
}

/// Last known pointer position in virtual pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pointer {
    pub x: f32,
    pub y: f32,
}

impl Pointer {
    /// Euclidean distance from the pointer to a particle.
    pub fn distance_to(&self, particle: &Particle) -> f32 {
        let dx = particle.x - self.x;
        let dy = particle.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Size multiplier for a glyph at `distance` from the pointer.
///
/// 0.3 at the pointer, rising linearly to 1.0 at [`INTERACTION_RADIUS_PX`]
/// and staying there beyond it.
pub fn proximity_scale(distance: f32) -> f32 {
    if distance < INTERACTION_RADIUS_PX {
        let proximity = 1.0 - distance / INTERACTION_RADIUS_PX;
        1.0 - proximity * MAX_PROXIMITY_SHRINK
    } else {
        1.0
    }
}

/// Glyph size for a particle after depth and pointer proximity.
pub fn effective_size(particle: &Particle, config: &FieldConfig, pointer: Pointer) -> f32 {
    let size = particle.size * config.size_formula.factor(particle.z);
    size * proximity_scale(pointer.distance_to(particle))
}

/// Fixed font sizes used by [`RenderMode::Bucketed`], largest first.
pub const BUCKET_FONTS_PX: [f32; 5] = [32.0, 24.0, 18.0, 14.0, 10.0];

/// Index into [`BUCKET_FONTS_PX`] for an effective glyph size.
pub fn size_bucket(size: f32) -> usize {
    if size > 20.0 {
        0
    } else if size > 16.0 {
        1
    } else if size > 14.0 {
        2
    } else if size > 12.0 {
        3
    } else {
        4
    }
}

/// Repaint the surface and draw every particle.
pub fn draw_particles<S: Surface + ?Sized>(
    surface: &mut S,
    particles: &[Particle],
    config: &FieldConfig,
    pointer: Pointer,
) {
    surface.fill_black();

    match config.render_mode {
        RenderMode::PerParticle => {
            for particle in particles {
                let size = effective_size(particle, config, pointer);
                let opacity = config.opacity_formula.opacity(particle.z);
                surface.set_font(size);
                surface.draw_digit(particle.x, particle.y, particle.value, opacity);
            }
        }
        RenderMode::Bucketed => {
            let mut buckets: [Vec<&Particle>; 5] = Default::default();
            for particle in particles {
                let size = effective_size(particle, config, pointer);
                buckets[size_bucket(size)].push(particle);
            }

            for (font, bucket) in BUCKET_FONTS_PX.iter().zip(&buckets) {
                if bucket.is_empty() {
                    continue;
                }
                surface.set_font(*font);
                for particle in bucket {
                    let opacity = config.opacity_formula.opacity(particle.z);
                    surface.draw_digit(particle.x, particle.y, particle.value, opacity);
                }
            }
        }
    }
}
