//! Frame timing for the viewer loop.
//!
//! The simulation itself is tick based and ignores wall time; only auto
//! rotation and the FPS readout use these values.
//!
//! # Example
//!
//! ```ignore
//! use pointswarm::time::FrameClock;
//!
//! let mut clock = FrameClock::new();
//!
//! // In your frame loop:
//! let dt = clock.update();
//! let frame = scene.frame(dt);
//! ```

use std::time::{Duration, Instant};

/// Per-frame delta time, frame counter and a periodically refreshed FPS.
#[derive(Debug)]
pub struct FrameClock {
    last_frame: Instant,
    delta_secs: f32,
    frame_count: u64,
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    fps_update_interval: Duration,
    /// Deltas are clamped to this so a stalled window does not jump the
    /// rotation.
    max_delta: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
            max_delta: 0.25,
        }
    }

    /// Update timing values. Call once per frame. Returns the delta time.
    pub fn update(&mut self) -> f32 {
        self.update_at(Instant::now())
    }

    fn update_at(&mut self, now: Instant) -> f32 {
        let raw_delta = now.duration_since(self.last_frame).as_secs_f32();
        self.delta_secs = raw_delta.min(self.max_delta);
        self.last_frame = now;

        self.frame_count += 1;

        // Update FPS periodically
        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        self.delta_secs
    }

    /// Total frames since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Calculated frames per second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_new() {
        let clock = FrameClock::new();
        assert_eq!(clock.frame(), 0);
        assert_eq!(clock.delta_secs, 0.0);
        assert_eq!(clock.fps(), 0.0);
    }

    #[test]
    fn test_clock_update() {
        let mut clock = FrameClock::new();
        let start = clock.last_frame;
        let dt = clock.update_at(start + Duration::from_millis(16));

        assert!((dt - 0.016).abs() < 1e-4);
        assert_eq!(clock.frame(), 1);
    }

    #[test]
    fn test_delta_is_clamped() {
        let mut clock = FrameClock::new();
        let start = clock.last_frame;
        let dt = clock.update_at(start + Duration::from_secs(5));
        assert_eq!(dt, 0.25);
    }

    #[test]
    fn test_fps_refreshes_after_interval() {
        let mut clock = FrameClock::new();
        let start = clock.last_frame;
        for i in 1..=30 {
            clock.update_at(start + Duration::from_millis(20 * i));
        }
        // 25 frames in the first 500ms.
        assert!((clock.fps() - 50.0).abs() < 0.5, "{}", clock.fps());
    }
}
