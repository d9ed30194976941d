//! The particle field component and its lifecycle.

use std::time::Instant;

use digitfield_core::FieldConfig;
use fastrand::Rng;
use log::{debug, warn};

use crate::cycling::{CycleClock, update_all_numbers};
use crate::frame::FrameLoop;
use crate::particle::{Particle, init_particles};
use crate::render::{Pointer, Surface, draw_particles};

/// Size of the drawing surface in virtual pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in virtual pixels.
    pub width: f32,
    /// Height in virtual pixels.
    pub height: f32,
}

impl Viewport {
    /// A viewport with no area cannot be drawn on.
    pub fn is_drawable(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// A mounted field of cycling digits.
///
/// Owns the particles, the pointer position, the cycling clock and the frame
/// loop. Constructed by [`ParticleField::mount`]; tearing it down (either via
/// [`ParticleField::unmount`] or by dropping it) cancels the frame loop.
#[derive(Debug)]
pub struct ParticleField {
    /// Parameters fixed at mount time.
    config: FieldConfig,
    /// Randomness for layouts and random-distinct cycling.
    rng: Rng,
    /// Current surface size.
    viewport: Viewport,
    /// Particles in row-major grid order; emptied on teardown.
    particles: Vec<Particle>,
    /// Last pointer position, (0, 0) until the first move.
    pointer: Pointer,
    /// Gates digit cycling to the configured interval.
    clock: CycleClock,
    /// Pending frame handle, cancelled on teardown.
    frames: FrameLoop,
    /// Bumped every time the particle set is rebuilt.
    generation: u64,
}

impl ParticleField {
    /// Mount a field on a surface of the given size.
    ///
    /// Returns `None` when the surface has no drawable area; no frame loop
    /// is started in that case.
    pub fn mount(
        config: FieldConfig,
        viewport: Viewport,
        mut rng: Rng,
        origin: Instant,
        target_fps: u32,
    ) -> Option<Self> {
        if !viewport.is_drawable() {
            return None;
        }
        if config.has_mixed_depth_convention() {
            warn!(
                "size formula {:?} and opacity formula {:?} disagree on which depth is near",
                config.size_formula, config.opacity_formula
            );
        }

        let particles = init_particles(&config, viewport.width, viewport.height, &mut rng);
        debug!(
            "mounted field {}x{} px with {} particles",
            viewport.width,
            viewport.height,
            particles.len()
        );

        Some(Self {
            config,
            rng,
            viewport,
            particles,
            pointer: Pointer::default(),
            clock: CycleClock::new(config.cycling_interval_ms),
            frames: FrameLoop::start(origin, target_fps),
            generation: 0,
        })
    }

    /// Rebuild the whole particle set for a new surface size.
    ///
    /// A zero-area size is ignored and the previous particles stay in place.
    pub fn resize(&mut self, viewport: Viewport) {
        if !viewport.is_drawable() {
            return;
        }
        self.viewport = viewport;
        self.particles =
            init_particles(&self.config, viewport.width, viewport.height, &mut self.rng);
        self.generation += 1;
        debug!(
            "resized field to {}x{} px, {} particles",
            viewport.width,
            viewport.height,
            self.particles.len()
        );
    }

    /// Record the latest pointer position.
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.pointer = Pointer { x, y };
    }

    /// Run one animation frame: cycle digits if due, then redraw everything.
    ///
    /// Returns true when a cycling tick happened on this frame.
    pub fn frame<S: Surface + ?Sized>(&mut self, timestamp_ms: u64, surface: &mut S) -> bool {
        let ticked = self.clock.tick(timestamp_ms);
        if ticked {
            update_all_numbers(&mut self.particles, self.config.cycling_mode, &mut self.rng);
        }
        draw_particles(surface, &self.particles, &self.config, self.pointer);
        ticked
    }

    /// Distance from a particle to the last pointer position.
    pub fn distance_from_pointer(&self, particle: &Particle) -> f32 {
        self.pointer.distance_to(particle)
    }

    /// The frame loop driving this field.
    pub fn frames(&self) -> &FrameLoop {
        &self.frames
    }

    /// Mutable access to the frame loop, for polling and re-requesting.
    pub fn frames_mut(&mut self) -> &mut FrameLoop {
        &mut self.frames
    }

    /// The current particles, in the order they are drawn.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Parameters the field was mounted with.
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Size of the surface the particles were laid out for.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Last recorded pointer position.
    pub fn pointer(&self) -> Pointer {
        self.pointer
    }

    /// Number of times the particle set has been rebuilt since mounting.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Tear the field down.
    pub fn unmount(self) {
        drop(self);
    }

    /// Cancel the frame loop and release the particles.
    fn teardown(&mut self) {
        if self.frames.is_cancelled() {
            return;
        }
        self.frames.cancel();
        self.particles = Vec::new();
        debug!("unmounted field after {} rebuilds", self.generation);
    }
}

impl Drop for ParticleField {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::render::tests::RecordingSurface;
    use digitfield_core::CyclingMode;

    fn scenario_config() -> FieldConfig {
        FieldConfig {
            grid_columns: 35,
            grid_rows: 35,
            fill_probability: 1.0,
            cycling_interval_ms: 67,
            ..FieldConfig::default()
        }
    }

    fn mount(config: FieldConfig, width: f32, height: f32) -> ParticleField {
        ParticleField::mount(
            config,
            Viewport { width, height },
            Rng::with_seed(17),
            Instant::now(),
            60,
        )
        .expect("viewport is drawable")
    }

    fn values(field: &ParticleField) -> Vec<u8> {
        field.particles().iter().map(|p| p.value).collect()
    }

    #[test]
    fn test_mount_on_empty_surface_is_a_no_op() {
        let field = ParticleField::mount(
            FieldConfig::default(),
            Viewport {
                width: 0.0,
                height: 300.0,
            },
            Rng::with_seed(1),
            Instant::now(),
            60,
        );
        assert!(field.is_none());
    }

    #[test]
    fn test_full_scenario() {
        let mut field = mount(scenario_config(), 350.0, 350.0);
        assert_eq!(field.particles().len(), 1225);
        for (i, p) in field.particles().iter().enumerate() {
            let center_x = (i % 35) as f32 * 10.0 + 5.0;
            let center_y = (i / 35) as f32 * 10.0 + 5.0;
            assert!((p.x - center_x).abs() <= 7.5);
            assert!((p.y - center_y).abs() <= 7.5);
        }

        let mut surface = RecordingSurface::default();
        let initial = field.particles().to_vec();
        assert!(!field.frame(0, &mut surface));
        assert_eq!(field.particles(), initial.as_slice());
        assert_eq!(surface.glyphs.len(), 1225);

        assert!(field.frame(68, &mut surface));
        for (before, after) in initial.iter().zip(field.particles()) {
            assert_eq!(after.value_index, (before.value_index + 1) % 10);
            assert_eq!(after.value, after.sequence()[after.value_index]);
        }
        assert_eq!(surface.fills, 2);
    }

    #[test]
    fn test_frames_within_interval_do_not_cycle() {
        let mut field = mount(scenario_config(), 350.0, 350.0);
        let mut surface = RecordingSurface::default();
        let initial = values(&field);

        for t in [0, 16, 33, 50, 67] {
            assert!(!field.frame(t, &mut surface));
        }
        assert_eq!(values(&field), initial);
        assert_eq!(surface.fills, 5);

        assert!(field.frame(84, &mut surface));
        // The next interval is measured from the tick at 84.
        assert!(!field.frame(150, &mut surface));
        assert!(field.frame(152, &mut surface));
    }

    #[test]
    fn test_long_gap_yields_a_single_tick() {
        let config = FieldConfig {
            cycling_mode: CyclingMode::Sequence,
            ..scenario_config()
        };
        let mut field = mount(config, 350.0, 350.0);
        let before: Vec<usize> = field.particles().iter().map(|p| p.value_index).collect();
        let mut surface = RecordingSurface::default();

        assert!(field.frame(1_000, &mut surface));
        for (old, p) in before.iter().zip(field.particles()) {
            assert_eq!(p.value_index, (old + 1) % 10);
        }
    }

    #[test]
    fn test_random_distinct_field_changes_every_digit() {
        let config = FieldConfig {
            cycling_mode: CyclingMode::RandomDistinct,
            ..scenario_config()
        };
        let mut field = mount(config, 350.0, 350.0);
        let before = values(&field);
        let mut surface = RecordingSurface::default();

        assert!(field.frame(100, &mut surface));
        for (old, new) in before.iter().zip(values(&field)) {
            assert_ne!(*old, new);
        }
    }

    #[test]
    fn test_resize_replaces_particles() {
        let mut field = mount(scenario_config(), 350.0, 350.0);
        let before = field.particles().to_vec();

        field.resize(Viewport {
            width: 700.0,
            height: 140.0,
        });

        assert_eq!(field.generation(), 1);
        assert_eq!(field.particles().len(), 1225);
        assert_eq!(field.viewport().width, 700.0);
        let retained = field
            .particles()
            .iter()
            .filter(|p| before.contains(p))
            .count();
        assert_eq!(retained, 0);
        for p in field.particles() {
            assert!(p.y <= 140.0 + 7.5);
        }
    }

    #[test]
    fn test_resize_to_empty_surface_is_ignored() {
        let mut field = mount(scenario_config(), 350.0, 350.0);
        let before = field.particles().to_vec();
        field.resize(Viewport {
            width: 0.0,
            height: 0.0,
        });
        assert_eq!(field.particles(), before.as_slice());
        assert_eq!(field.generation(), 0);
    }

    #[test]
    fn test_pointer_shrinks_nearby_glyphs() {
        let config = FieldConfig {
            grid_columns: 1,
            grid_rows: 1,
            ..scenario_config()
        };
        let mut field = mount(config, 100.0, 100.0);
        let particle = field.particles()[0].clone();
        let mut surface = RecordingSurface::default();

        field.pointer_moved(10_000.0, 10_000.0);
        field.frame(0, &mut surface);
        let far_font = surface.glyphs[0].4;

        field.pointer_moved(particle.x, particle.y);
        assert_eq!(field.distance_from_pointer(&particle), 0.0);
        field.frame(1, &mut surface);
        let near_font = surface.glyphs[0].4;

        assert!((near_font - far_font * 0.3).abs() < 1e-4);
    }

    #[test]
    fn test_teardown_cancels_frame_loop() {
        let origin = Instant::now();
        let mut field = ParticleField::mount(
            scenario_config(),
            Viewport {
                width: 350.0,
                height: 350.0,
            },
            Rng::with_seed(3),
            origin,
            60,
        )
        .expect("viewport is drawable");

        assert_eq!(field.frames_mut().poll(origin), Some(0));
        field.frames_mut().request(origin);
        assert!(field.frames().is_active());
        assert!(field.frames().timeout(origin) <= Some(Duration::from_millis(17)));

        field.teardown();
        assert!(!field.frames().is_active());
        assert!(field.particles().is_empty());

        field.frames_mut().request(origin);
        assert_eq!(field.frames_mut().poll(origin + Duration::from_secs(1)), None);

        field.unmount();
    }
}
