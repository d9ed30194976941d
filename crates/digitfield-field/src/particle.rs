//! Particle data model and bulk initialization.

use digitfield_core::{CyclingMode, FieldConfig};
use fastrand::Rng;

use crate::chars::SEQUENCES;

/// Full width of the random offset applied around each cell center.
pub const JITTER_PX: f32 = 15.0;
/// Smallest base glyph size.
pub const MIN_SIZE_PX: f32 = 15.0;
/// Spread of base glyph sizes above the minimum.
pub const SIZE_SPREAD_PX: f32 = 10.0;

/// A single numeric glyph in the field.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Horizontal position in virtual pixels.
    pub x: f32,
    /// Vertical position in virtual pixels.
    pub y: f32,
    /// Depth cue in [0, 1).
    pub z: f32,
    /// Digit currently shown.
    pub value: u8,
    /// Base glyph size in pixels.
    pub size: f32,
    /// Which entry of [`SEQUENCES`] this particle walks.
    pub sequence_index: usize,
    /// Position within the sequence.
    pub value_index: usize,
}

impl Particle {
    /// The digit sequence this particle cycles through.
    pub fn sequence(&self) -> &'static [u8; 10] {
        &SEQUENCES[self.sequence_index]
    }
}

/// Build a fresh particle set for a viewport of the given size.
///
/// The viewport is split into `grid_columns x grid_rows` cells. Each cell
/// is populated with probability `fill_probability`, the particle sitting at
/// the cell center plus up to half of [`JITTER_PX`] on each axis.
pub fn init_particles(
    config: &FieldConfig,
    width: f32,
    height: f32,
    rng: &mut Rng,
) -> Vec<Particle> {
    let columns = config.grid_columns as usize;
    let rows = config.grid_rows as usize;
    let cell_width = width / columns as f32;
    let cell_height = height / rows as f32;

    let mut particles = Vec::with_capacity(columns * rows);

    for row in 0..rows {
        for col in 0..columns {
            if rng.f32() > config.fill_probability {
                continue;
            }
            let base_x = col as f32 * cell_width + cell_width / 2.0;
            let base_y = row as f32 * cell_height + cell_height / 2.0;

            let x = base_x + (rng.f32() - 0.5) * JITTER_PX;
            let y = base_y + (rng.f32() - 0.5) * JITTER_PX;

            let sequence_index = rng.usize(..SEQUENCES.len());
            let value_index = rng.usize(..SEQUENCES[sequence_index].len());
            let value = match config.cycling_mode {
                CyclingMode::Sequence => SEQUENCES[sequence_index][value_index],
                CyclingMode::RandomDistinct => rng.u8(..10),
            };

            particles.push(Particle {
                x,
                y,
                z: rng.f32(),
                value,
                size: MIN_SIZE_PX + rng.f32() * SIZE_SPREAD_PX,
                sequence_index,
                value_index,
            });
        }
    }

    particles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(columns: u16, rows: u16, fill_probability: f32) -> FieldConfig {
        FieldConfig {
            grid_columns: columns,
            grid_rows: rows,
            fill_probability,
            ..FieldConfig::default()
        }
    }

    #[test]
    fn test_values_are_digits() {
        let mut rng = Rng::with_seed(7);
        for mode in [CyclingMode::Sequence, CyclingMode::RandomDistinct] {
            let config = FieldConfig {
                cycling_mode: mode,
                ..FieldConfig::default()
            };
            let particles = init_particles(&config, 800.0, 600.0, &mut rng);
            assert!(!particles.is_empty());
            assert!(particles.iter().all(|p| p.value <= 9));
        }
    }

    #[test]
    fn test_sequence_value_matches_index() {
        let mut rng = Rng::with_seed(11);
        let particles = init_particles(&FieldConfig::default(), 640.0, 480.0, &mut rng);
        for p in &particles {
            assert_eq!(p.value, p.sequence()[p.value_index]);
        }
    }

    #[test]
    fn test_depth_and_size_ranges() {
        let mut rng = Rng::with_seed(3);
        let particles = init_particles(&FieldConfig::default(), 1000.0, 1000.0, &mut rng);
        for p in &particles {
            assert!((0.0..1.0).contains(&p.z));
            assert!((MIN_SIZE_PX..MIN_SIZE_PX + SIZE_SPREAD_PX).contains(&p.size));
        }
    }

    #[test]
    fn test_positions_stay_within_viewport() {
        let mut rng = Rng::with_seed(42);
        let (width, height) = (700.0_f32, 420.0_f32);
        let half_jitter = JITTER_PX / 2.0;

        for p in init_particles(&config(35, 35, 0.85), width, height, &mut rng) {
            assert!((-half_jitter..=width + half_jitter).contains(&p.x));
            assert!((-half_jitter..=height + half_jitter).contains(&p.y));
        }
    }

    #[test]
    fn test_full_grid_has_one_particle_per_cell() {
        let mut rng = Rng::with_seed(1);
        let particles = init_particles(&config(35, 35, 1.0), 350.0, 350.0, &mut rng);
        assert_eq!(particles.len(), 1225);

        // Row-major order: the i-th particle belongs to the i-th cell.
        for (i, p) in particles.iter().enumerate() {
            let center_x = (i % 35) as f32 * 10.0 + 5.0;
            let center_y = (i / 35) as f32 * 10.0 + 5.0;
            assert!((p.x - center_x).abs() <= JITTER_PX / 2.0);
            assert!((p.y - center_y).abs() <= JITTER_PX / 2.0);
        }
    }

    #[test]
    fn test_empty_fill_probability_yields_no_particles() {
        let mut rng = Rng::with_seed(5);
        let particles = init_particles(&config(10, 10, 0.0), 100.0, 100.0, &mut rng);
        assert!(particles.len() <= 100);
        // `f32()` can return exactly 0.0, so an occasional survivor is allowed.
        assert!(particles.len() < 3);
    }

    #[test]
    fn test_count_converges_to_expected_fill() {
        let mut rng = Rng::with_seed(2024);
        let config = config(35, 35, 0.85);
        let runs = 200;
        let total: usize = (0..runs)
            .map(|_| {
                let count = init_particles(&config, 350.0, 350.0, &mut rng).len();
                assert!(count <= 1225);
                count
            })
            .sum();
        let mean = total as f32 / runs as f32;
        let expected = 1225.0 * 0.85;
        assert!((mean - expected).abs() < 5.0, "mean {mean} vs {expected}");
    }
}
