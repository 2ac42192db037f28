//! Debounced GPIO push button
//!
//! The pin is read once per [`GpioButton::poll`]. A new level is accepted
//! only after it has been read on [`DEBOUNCE_SAMPLES`] consecutive polls;
//! with one poll per frame that filters contact bounce shorter than a
//! frame.

use embedded_hal::digital::InputPin;

/// Consecutive equal reads needed to accept a level change
pub const DEBOUNCE_SAMPLES: u8 = 2;

/// GPIO push button
pub struct GpioButton<P> {
    pin: P,
    /// If true, pressed = pin LOW (button to ground with pull-up)
    active_low: bool,
    /// Accepted level (true = pressed)
    stable: bool,
    /// Reads that disagreed with `stable` in a row
    pending: u8,
}

impl<P: InputPin> GpioButton<P> {
    pub fn new(pin: P, active_low: bool) -> Self {
        Self {
            pin,
            active_low,
            stable: false,
            pending: 0,
        }
    }

    /// Button wired to ground with a pull-up
    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }

    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    /// Read the pin and return the debounced level
    ///
    /// A failed read keeps the last accepted level.
    pub fn poll(&mut self) -> bool {
        let Ok(high) = self.pin.is_high() else {
            return self.stable;
        };

        let pressed = high != self.active_low;
        if pressed == self.stable {
            self.pending = 0;
        } else {
            self.pending += 1;
            if self.pending >= DEBOUNCE_SAMPLES {
                self.stable = pressed;
                self.pending = 0;
            }
        }
        self.stable
    }

    /// Last accepted level
    pub fn is_pressed(&self) -> bool {
        self.stable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::digital::{ErrorKind, ErrorType};

    /// Mock input pin replaying a fixed sequence of levels
    struct MockPin {
        levels: Vec<Result<bool, ErrorKind>>,
    }

    impl MockPin {
        fn new(levels: &[bool]) -> Self {
            Self {
                levels: levels.iter().rev().map(|&l| Ok(l)).collect(),
            }
        }
    }

    impl ErrorType for MockPin {
        type Error = ErrorKind;
    }

    impl InputPin for MockPin {
        fn is_high(&mut self) -> Result<bool, ErrorKind> {
            self.levels.pop().unwrap_or(Ok(false))
        }

        fn is_low(&mut self) -> Result<bool, ErrorKind> {
            self.is_high().map(|h| !h)
        }
    }

    #[test]
    fn test_active_low_press_after_debounce() {
        let pin = MockPin::new(&[true, false, false, false]);
        let mut button = GpioButton::new_active_low(pin);

        assert!(!button.poll());
        assert!(!button.poll());
        assert!(button.poll());
        assert!(button.poll());
    }

    #[test]
    fn test_single_glitch_is_ignored() {
        let pin = MockPin::new(&[true, true, false, true, true]);
        let mut button = GpioButton::new_active_high(pin);

        assert!(!button.poll());
        assert!(button.poll());
        assert!(button.poll());
        assert!(button.poll());
        assert!(button.is_pressed());
    }

    #[test]
    fn test_read_error_keeps_level() {
        let mut pin = MockPin::new(&[true, true]);
        pin.levels.insert(0, Err(ErrorKind::Other));
        let mut button = GpioButton::new_active_high(pin);

        button.poll();
        assert!(button.poll());
        assert!(button.poll());
    }
}
