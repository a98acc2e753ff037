//! A single additive rotation tween.

use std::time::Duration;

use glam::Vec3;
use web_time::Instant;

use crate::util::easing::EasingFunction;

/// Adds `delta` to a rotation over `duration`, following `easing`.
///
/// The tween does not remember absolute angles. Each [`advance`] returns
/// only the increment since the previous call, so it composes with any
/// other writer of the same rotation (idle spin, other tweens).
///
/// [`advance`]: RotationTween::advance
#[derive(Debug, Clone)]
pub struct RotationTween {
    /// When the tween started.
    start_time: Instant,
    /// Total duration.
    duration: Duration,
    /// Easing curve over the duration.
    easing: EasingFunction,
    /// Full rotation added once complete.
    delta: Vec3,
    /// Eased progress already applied.
    applied: f32,
}

impl RotationTween {
    /// Start a tween at `start_time`.
    #[must_use]
    pub fn new(
        start_time: Instant,
        duration: Duration,
        easing: EasingFunction,
        delta: Vec3,
    ) -> Self {
        Self {
            start_time,
            duration,
            easing,
            delta,
            applied: 0.0,
        }
    }

    /// Calculate normalized progress (0.0 to 1.0).
    #[must_use]
    pub fn progress(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.start_time);

        if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        }
    }

    /// Advance to `now` and return the rotation increment to add.
    pub fn advance(&mut self, now: Instant) -> Vec3 {
        let eased = self.easing.evaluate(self.progress(now));
        let step = eased - self.applied;
        if step <= 0.0 {
            return Vec3::ZERO;
        }
        self.applied = eased;
        self.delta * step
    }

    /// Whether the full delta has been handed out.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.applied >= 1.0
    }
}
