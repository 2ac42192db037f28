//! Time source abstraction
//!
//! The frame loop paces itself against a monotonic millisecond counter and
//! blocks out the remaining slack of each frame with a delay.

/// Monotonic millisecond clock with a blocking delay
///
/// The counter is allowed to wrap; callers use wrapping subtraction.
pub trait Clock {
    /// Milliseconds since an arbitrary epoch (typically boot)
    fn now_ms(&self) -> u32;

    /// Block the caller for `ms` milliseconds
    ///
    /// This is the only suspension point of the frame loop.
    fn delay_ms(&mut self, ms: u32);

    /// Milliseconds elapsed since `since`, tolerant of counter wrap
    fn elapsed_since(&self, since: u32) -> u32 {
        self.now_ms().wrapping_sub(since)
    }
}

impl<T: Clock + ?Sized> Clock for &mut T {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }

    fn delay_ms(&mut self, ms: u32) {
        (**self).delay_ms(ms)
    }
}
