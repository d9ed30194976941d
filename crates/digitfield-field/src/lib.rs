//! Animated numeric particle field for terminal backgrounds.
//!
//! A grid of digits ("particles") with fixed positions and depth cues. On a
//! fixed cadence every digit cycles to a new value, and glyphs shrink as the
//! pointer approaches them. Drawing goes through the [`Surface`] trait;
//! [`BufferSurface`] implements it on top of a ratatui buffer.

mod chars;
mod color;
mod cycling;
mod frame;
mod particle;
mod render;
mod state;
mod terminal;

pub use chars::SEQUENCES;
pub use color::opacity_to_color;
pub use cycling::{CycleClock, update_all_numbers};
pub use frame::FrameLoop;
pub use particle::{Particle, init_particles};
pub use render::{
    BUCKET_FONTS_PX, INTERACTION_RADIUS_PX, Pointer, Surface, draw_particles, effective_size,
    proximity_scale, size_bucket,
};
pub use state::{ParticleField, Viewport};
pub use terminal::{BufferSurface, cell_center, viewport_for};
