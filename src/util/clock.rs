//! Frame clock and FPS measurement.

use web_time::Instant;

/// Elapsed and delta time for one frame, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Seconds since the clock started.
    pub elapsed: f32,
    /// Seconds since the previous tick (the first tick measures from the
    /// start).
    pub delta: f32,
}

/// Monotonic frame clock. Never reset.
#[derive(Debug, Clone)]
pub struct Clock {
    start: Instant,
    previous: f32,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock {
    /// Start a clock now.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Start a clock at an explicit instant.
    #[must_use]
    pub fn starting_at(start: Instant) -> Self {
        Self { start, previous: 0.0 }
    }

    /// Seconds between the start and `now`.
    #[must_use]
    pub fn elapsed_at(&self, now: Instant) -> f32 {
        now.saturating_duration_since(self.start).as_secs_f32()
    }

    /// Read the clock at `now` and advance the previous-frame mark.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let elapsed = self.elapsed_at(now).max(self.previous);
        let delta = elapsed - self.previous;
        self.previous = elapsed;
        FrameTime { elapsed, delta }
    }

    /// Read the clock at the current instant.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }
}

/// Smoothed frames-per-second readout for the debug panel.
pub struct FpsMeter {
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl Default for FpsMeter {
    fn default() -> Self {
        Self::new()
    }
}

impl FpsMeter {
    /// A meter that starts at 60 FPS.
    #[must_use]
    pub fn new() -> Self {
        Self {
            smoothed_fps: 60.0,
            smoothing: 0.05,
        }
    }

    /// Fold one frame duration into the average. Zero-length frames are
    /// skipped.
    pub fn record(&mut self, frame_seconds: f32) {
        if frame_seconds > 0.0 {
            let instant_fps = 1.0 / frame_seconds;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
    }

    /// The current smoothed FPS.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn first_delta_equals_elapsed() {
        let start = Instant::now();
        let mut clock = Clock::starting_at(start);
        let t = clock.tick_at(start + Duration::from_millis(250));
        assert!((t.elapsed - 0.25).abs() < 1e-6);
        assert_eq!(t.delta, t.elapsed);
    }

    #[test]
    fn deltas_sum_to_elapsed() {
        let start = Instant::now();
        let mut clock = Clock::starting_at(start);
        let mut sum = 0.0;
        for ms in [16_u64, 33, 50, 100] {
            sum += clock.tick_at(start + Duration::from_millis(ms)).delta;
        }
        assert!((sum - 0.1).abs() < 1e-6);
    }

    #[test]
    fn never_runs_backwards() {
        let start = Instant::now();
        let mut clock = Clock::starting_at(start);
        let _ = clock.tick_at(start + Duration::from_millis(100));
        let t = clock.tick_at(start + Duration::from_millis(50));
        assert_eq!(t.delta, 0.0);
        assert!((t.elapsed - 0.1).abs() < 1e-6);
    }

    #[test]
    fn fps_converges() {
        let mut meter = FpsMeter::new();
        for _ in 0..500 {
            meter.record(1.0 / 120.0);
        }
        assert!((meter.fps() - 120.0).abs() < 1.0);
        meter.record(0.0);
        assert!((meter.fps() - 120.0).abs() < 1.0);
    }
}
