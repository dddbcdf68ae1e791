//! Frame timing
//!
//! All movement in the scene is scaled by the wall-clock time elapsed since
//! the previous frame. [`FrameClock`] is the producer of that value.

use std::time::Instant;

/// Frame clock supplying the per-tick elapsed time
pub struct FrameClock {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
    max_delta: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Longest step handed out by default
    pub const DEFAULT_MAX_DELTA: f32 = 0.25;

    /// Create a new clock starting now
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
            max_delta: Self::DEFAULT_MAX_DELTA,
        }
    }

    /// Override the largest delta returned by [`tick`](Self::tick)
    pub fn with_max_delta(mut self, max_delta: f32) -> Self {
        self.max_delta = max_delta.max(0.0);
        self
    }

    /// Advance one frame and return the elapsed seconds since the previous call
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame).as_secs_f32();
        self.advance(elapsed);
        self.last_frame = now;
        self.delta_time
    }

    /// Advance by an explicit amount instead of reading the wall clock
    pub fn advance(&mut self, elapsed: f32) {
        self.delta_time = elapsed.clamp(0.0, self.max_delta);
        self.total_time += self.delta_time;
        self.frame_count += 1;
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total elapsed time since clock creation
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_clamps_stalled_frames() {
        let mut clock = FrameClock::new().with_max_delta(0.1);
        clock.advance(0.05);
        assert_eq!(clock.delta_time(), 0.05);

        clock.advance(3.0);
        assert_eq!(clock.delta_time(), 0.1);
        assert_eq!(clock.frame_count(), 2);
        assert!((clock.total_time() - 0.15).abs() < 1e-6);
    }

    #[test]
    fn test_negative_elapsed_is_zero() {
        let mut clock = FrameClock::new();
        clock.advance(-1.0);
        assert_eq!(clock.delta_time(), 0.0);
    }
}
