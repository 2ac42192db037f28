//! Frame loop clock on top of the embassy time driver

use embassy_time::{block_for, Duration, Instant};
use kairos_hal::Clock;

/// Millisecond clock backed by the RP2040 timer
///
/// `delay_ms` busy-waits. The sketch is the only task, so there is nothing
/// else to yield to.
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u32 {
        // Wraps after ~49 days; the frame clock uses wrapping arithmetic
        Instant::now().as_millis() as u32
    }

    fn delay_ms(&mut self, ms: u32) {
        block_for(Duration::from_millis(ms as u64));
    }
}
