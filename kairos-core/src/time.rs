//! Frame pacing and timing statistics

use crate::config::DEFAULT_FRAME_INTERVAL_MS;

/// Smoothing weight of the previous average frame time
const SMOOTHING: f32 = 0.9;

/// Per-frame timing state
///
/// Mutated only through [`FrameClock::commit`], once per committed frame.
/// All millisecond arithmetic wraps, so a rolled-over counter never yields
/// a negative delta.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameClock {
    last_tick_ms: u32,
    previous_ms: u32,
    frame_interval_ms: u32,
    delta_time_s: f32,
    smoothed_frame_time_ms: f32,
    frame_count: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_INTERVAL_MS, 0)
    }
}

impl FrameClock {
    /// Create a clock whose first frame is due `frame_interval_ms` after `now_ms`
    pub const fn new(frame_interval_ms: u32, now_ms: u32) -> Self {
        Self {
            last_tick_ms: now_ms,
            previous_ms: now_ms,
            frame_interval_ms,
            delta_time_s: 0.0,
            smoothed_frame_time_ms: frame_interval_ms as f32,
            frame_count: 0,
        }
    }

    /// Whether a frame is due at `now_ms`
    pub fn is_due(&self, now_ms: u32) -> bool {
        now_ms.wrapping_sub(self.last_tick_ms) >= self.frame_interval_ms
    }

    /// Commit a frame that started at `now_ms`
    pub fn commit(&mut self, now_ms: u32) {
        let frame_ms = now_ms.wrapping_sub(self.previous_ms) as f32;

        self.delta_time_s = frame_ms / 1000.0;
        self.smoothed_frame_time_ms =
            self.smoothed_frame_time_ms * SMOOTHING + frame_ms * (1.0 - SMOOTHING);
        self.previous_ms = now_ms;
        self.frame_count += 1;
        self.last_tick_ms = now_ms;
    }

    /// Slack left in the frame that started at `tick_start_ms`
    ///
    /// Zero once the frame has overrun its interval.
    pub fn remaining_ms(&self, tick_start_ms: u32, now_ms: u32) -> u32 {
        self.frame_interval_ms
            .saturating_sub(now_ms.wrapping_sub(tick_start_ms))
    }

    pub fn frame_interval_ms(&self) -> u32 {
        self.frame_interval_ms
    }

    pub fn last_tick_ms(&self) -> u32 {
        self.last_tick_ms
    }

    /// Seconds between the last two committed frames
    pub fn delta_time(&self) -> f32 {
        self.delta_time_s
    }

    /// Exponentially smoothed frame time in milliseconds
    pub fn smoothed_frame_time_ms(&self) -> f32 {
        self.smoothed_frame_time_ms
    }

    /// Frames per second derived from the smoothed frame time
    pub fn fps(&self) -> f32 {
        1000.0 / self.smoothed_frame_time_ms
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_fps_matches_interval() {
        let clock = FrameClock::new(16, 0);
        assert_eq!(clock.fps(), 62.5);
        assert_eq!(clock.frame_count(), 0);
        assert_eq!(clock.delta_time(), 0.0);
    }

    #[test]
    fn test_due_only_after_interval() {
        let clock = FrameClock::new(16, 100);
        assert!(!clock.is_due(100));
        assert!(!clock.is_due(115));
        assert!(clock.is_due(116));
    }

    #[test]
    fn test_commit_updates_statistics() {
        let mut clock = FrameClock::new(16, 0);
        clock.commit(20);

        assert_eq!(clock.frame_count(), 1);
        assert!((clock.delta_time() - 0.020).abs() < 1e-6);
        // 16 * 0.9 + 20 * 0.1
        assert!((clock.smoothed_frame_time_ms() - 16.4).abs() < 1e-4);
        assert_eq!(clock.last_tick_ms(), 20);
        assert!(!clock.is_due(35));
        assert!(clock.is_due(36));
    }

    #[test]
    fn test_wrapping_counter() {
        let mut clock = FrameClock::new(16, u32::MAX - 5);
        assert!(clock.is_due(10));
        clock.commit(10);
        assert!((clock.delta_time() - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_remaining_saturates() {
        let clock = FrameClock::new(16, 0);
        assert_eq!(clock.remaining_ms(100, 104), 12);
        assert_eq!(clock.remaining_ms(100, 130), 0);
    }
}
