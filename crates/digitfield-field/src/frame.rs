//! Cancelable frame scheduling.

use std::time::{Duration, Instant};

use digitfield_core::MAX_TARGET_FPS;

/// A recurring frame request, the terminal stand-in for an animation frame
/// callback.
///
/// At most one frame is pending at a time. The owner polls it from its event
/// loop, draws when a frame is due and requests the next one. Once cancelled
/// the loop yields no further frames, even if `request` is called again.
#[derive(Debug)]
pub struct FrameLoop {
    /// Reference point for frame timestamps.
    origin: Instant,
    /// Time between two consecutive frames.
    frame_interval: Duration,
    /// Deadline of the pending frame, if any.
    pending: Option<Instant>,
    /// Set once by `cancel`; later requests are ignored.
    cancelled: bool,
}

impl FrameLoop {
    /// Start a loop whose first frame is due immediately at timestamp zero.
    ///
    /// The frame rate is clamped to `1..=MAX_TARGET_FPS`.
    pub fn start(origin: Instant, target_fps: u32) -> Self {
        let frame_interval = Duration::from_secs(1) / target_fps.clamp(1, MAX_TARGET_FPS);
        Self {
            origin,
            frame_interval,
            pending: Some(origin),
            cancelled: false,
        }
    }

    /// Schedule the frame after the one that just ran.
    pub fn request(&mut self, now: Instant) {
        if self.cancelled {
            return;
        }
        self.pending = Some(now + self.frame_interval);
    }

    /// Drop the pending frame and stop the loop for good.
    pub fn cancel(&mut self) {
        self.pending = None;
        self.cancelled = true;
    }

    /// Whether a frame is still scheduled.
    pub fn is_active(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether the loop has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// How long the caller may wait for events before the next frame is due.
    pub fn timeout(&self, now: Instant) -> Option<Duration> {
        self.pending.map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Take the pending frame if it is due, returning its timestamp in
    /// milliseconds since the loop started.
    pub fn poll(&mut self, now: Instant) -> Option<u64> {
        match self.pending {
            Some(deadline) if deadline <= now => {
                self.pending = None;
                Some(now.saturating_duration_since(self.origin).as_millis() as u64)
            }
            _ => None,
        }
    }
}
