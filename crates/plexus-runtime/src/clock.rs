//! Frame clock for pacing ticks at a target rate

use std::time::{Duration, Instant};

/// Tracks wall-clock frame timing against a target frame rate
pub struct FrameClock {
    /// Total elapsed time in seconds
    pub total_time: f64,
    /// Time since last frame in seconds
    pub delta_time: f64,
    /// Target interval between frames
    pub frame_interval: Duration,
    /// Frames ticked so far
    pub frame_count: u64,
    /// Last tick instant
    last_instant: Instant,
    /// Whether this is the first tick
    first_tick: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::with_target_fps(60.0)
    }
}

impl FrameClock {
    /// Create a new frame clock targeting 60 frames per second
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a frame clock with a custom target rate (clamped to 1..=240 Hz)
    pub fn with_target_fps(hz: f64) -> Self {
        let hz = if hz.is_finite() { hz.clamp(1.0, 240.0) } else { 60.0 };
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            frame_interval: Duration::from_secs_f64(1.0 / hz),
            frame_count: 0,
            last_instant: Instant::now(),
            first_tick: true,
        }
    }

    /// Advance the clock. Call once per frame.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// Advance the clock as of `now`
    pub fn tick_at(&mut self, now: Instant) {
        self.frame_count += 1;

        if self.first_tick {
            self.first_tick = false;
            self.last_instant = now;
            self.delta_time = 0.0;
            return;
        }

        let elapsed = now.saturating_duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;

        // A stalled host (e.g. a hidden tab) should not report a huge frame
        self.delta_time = elapsed.min(0.25);
        self.total_time += self.delta_time;
    }

    /// How long to wait after `now` before the next frame is due
    pub fn time_until_next_frame(&self, now: Instant) -> Duration {
        if self.first_tick {
            return Duration::ZERO;
        }
        let since = now.saturating_duration_since(self.last_instant);
        self.frame_interval.saturating_sub(since)
    }

    /// Mean frames per second over the clock's lifetime
    pub fn average_fps(&self) -> f64 {
        if self.total_time <= 0.0 {
            0.0
        } else {
            (self.frame_count.saturating_sub(1)) as f64 / self.total_time
        }
    }
}
