//! Digit cycling and the clock that gates it.

use digitfield_core::CyclingMode;
use fastrand::Rng;

use crate::particle::Particle;

/// Advance every particle by one cycling tick.
pub fn update_all_numbers(particles: &mut [Particle], mode: CyclingMode, rng: &mut Rng) {
    match mode {
        CyclingMode::Sequence => {
            for particle in particles {
                let sequence = particle.sequence();
                particle.value_index = (particle.value_index + 1) % sequence.len();
                particle.value = sequence[particle.value_index];
            }
        }
        CyclingMode::RandomDistinct => {
            for particle in particles {
                particle.value = distinct_digit(particle.value, rng);
            }
        }
    }
}

/// Draw a uniform digit other than `current`.
fn distinct_digit(current: u8, rng: &mut Rng) -> u8 {
    loop {
        let digit = rng.u8(..10);
        if digit != current {
            return digit;
        }
    }
}

/// Decides on which frames a cycling tick happens.
///
/// A tick fires when more than `interval_ms` has passed since the previous
/// one. Missed ticks are not caught up: a long gap yields a single tick and
/// restarts the interval from the current frame.
#[derive(Debug, Clone)]
pub struct CycleClock {
    interval_ms: u64,
    last_tick_ms: u64,
}

impl CycleClock {
    /// Create a clock whose reference point is timestamp zero.
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_tick_ms: 0,
        }
    }

    /// Returns true if a tick is due at `timestamp_ms`, recording it.
    pub fn tick(&mut self, timestamp_ms: u64) -> bool {
        if timestamp_ms.saturating_sub(self.last_tick_ms) > self.interval_ms {
            self.last_tick_ms = timestamp_ms;
            true
        } else {
            false
        }
    }
}
