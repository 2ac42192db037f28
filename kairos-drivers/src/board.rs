//! Board input aggregator
//!
//! [`BoardInput`] polls the three buttons, the touch controller and the
//! motion sensor once per call and packs the results into a
//! [`HardwareSample`]. Touch and IMU are optional; a board without them (or
//! a read that fails) reports `None` and the frame loop keeps its last
//! value. After [`STALE_TOUCH_READS`] failed touch reads in a row the last
//! position is reported as lifted, so a press cannot stick while the
//! controller is unreachable.

use embedded_hal::digital::InputPin;
use kairos_hal::{HardwareSample, InputHardware, TouchSample, BUTTON_COUNT};

use crate::button::GpioButton;
use crate::imu::MotionSensor;
use crate::touch::TouchSensor;

/// Failed touch reads in a row after which the finger counts as lifted
pub const STALE_TOUCH_READS: u8 = 3;

/// Read failures since start-up, per device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReadErrors {
    pub touch: u32,
    pub imu: u32,
}

/// Buttons, touch and IMU of one board
pub struct BoardInput<P, T, M> {
    buttons: [GpioButton<P>; BUTTON_COUNT],
    touch: Option<T>,
    imu: Option<M>,
    errors: ReadErrors,
    /// Last touch read that succeeded
    last_touch: TouchSample,
    /// Touch reads that failed since then
    touch_streak: u8,
}

impl<P, T, M> BoardInput<P, T, M>
where
    P: InputPin,
    T: TouchSensor,
    M: MotionSensor,
{
    /// Buttons are in [`ButtonId`](kairos_hal::ButtonId) order (A, B, C)
    pub fn new(buttons: [GpioButton<P>; BUTTON_COUNT], touch: Option<T>, imu: Option<M>) -> Self {
        Self {
            buttons,
            touch,
            imu,
            errors: ReadErrors::default(),
            last_touch: TouchSample::default(),
            touch_streak: 0,
        }
    }

    pub fn errors(&self) -> ReadErrors {
        self.errors
    }

    pub fn touch_mut(&mut self) -> Option<&mut T> {
        self.touch.as_mut()
    }

    pub fn imu_mut(&mut self) -> Option<&mut M> {
        self.imu.as_mut()
    }
}

impl<P, T, M> InputHardware for BoardInput<P, T, M>
where
    P: InputPin,
    T: TouchSensor,
    M: MotionSensor,
{
    fn sample(&mut self) -> HardwareSample {
        let mut sample = HardwareSample::default();
        for (level, button) in sample.buttons.iter_mut().zip(self.buttons.iter_mut()) {
            *level = button.poll();
        }

        if let Some(touch) = self.touch.as_mut() {
            match touch.read_touch() {
                Ok(t) => {
                    self.last_touch = t;
                    self.touch_streak = 0;
                    sample.touch = Some(t);
                }
                Err(_) => {
                    self.errors.touch = self.errors.touch.wrapping_add(1);
                    self.touch_streak = self.touch_streak.saturating_add(1);
                    #[cfg(feature = "defmt")]
                    defmt::warn!("Touch read failed ({} total)", self.errors.touch);

                    if self.touch_streak >= STALE_TOUCH_READS && self.last_touch.pressed {
                        self.last_touch.pressed = false;
                        sample.touch = Some(self.last_touch);
                    }
                }
            }
        }

        if let Some(imu) = self.imu.as_mut() {
            match imu.read_motion() {
                Ok(m) => sample.imu = Some(m),
                Err(_) => {
                    self.errors.imu = self.errors.imu.wrapping_add(1);
                    #[cfg(feature = "defmt")]
                    defmt::warn!("IMU read failed ({} total)", self.errors.imu);
                }
            }
        }

        sample
    }
}

/// Stand-in for a board without a touch panel
pub struct NoTouch;

impl TouchSensor for NoTouch {
    type Error = ();

    fn read_touch(&mut self) -> Result<TouchSample, ()> {
        Err(())
    }
}

/// Stand-in for a board without a motion sensor
pub struct NoMotion;

impl MotionSensor for NoMotion {
    type Error = ();

    fn read_motion(&mut self) -> Result<kairos_hal::ImuSample, ()> {
        Err(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;
    use kairos_hal::{ImuSample, Vector3};

    struct FixedPin(bool);

    impl ErrorType for FixedPin {
        type Error = Infallible;
    }

    impl InputPin for FixedPin {
        fn is_high(&mut self) -> Result<bool, Infallible> {
            Ok(self.0)
        }

        fn is_low(&mut self) -> Result<bool, Infallible> {
            Ok(!self.0)
        }
    }

    struct ScriptedTouch(Vec<Result<TouchSample, ()>>);

    impl TouchSensor for ScriptedTouch {
        type Error = ();

        fn read_touch(&mut self) -> Result<TouchSample, ()> {
            self.0.pop().unwrap_or(Err(()))
        }
    }

    struct SteadyImu(ImuSample);

    impl MotionSensor for SteadyImu {
        type Error = ();

        fn read_motion(&mut self) -> Result<ImuSample, ()> {
            Ok(self.0)
        }
    }

    fn buttons(levels: [bool; 3]) -> [GpioButton<FixedPin>; 3] {
        levels.map(|l| GpioButton::new_active_high(FixedPin(l)))
    }

    #[test]
    fn test_sample_collects_everything() {
        let touch = TouchSample { x: 7, y: 9, pressed: true };
        let reading = ImuSample {
            accel: Vector3::new(0.0, 0.0, 1.0),
            ..ImuSample::default()
        };
        let mut board = BoardInput::new(
            buttons([true, false, false]),
            Some(ScriptedTouch(vec![Ok(touch)])),
            Some(SteadyImu(reading)),
        );

        board.sample();
        let sample = board.sample();

        assert_eq!(sample.buttons, [true, false, false]);
        assert_eq!(sample.imu, Some(reading));
        // Second touch read fails
        assert_eq!(sample.touch, None);
        assert_eq!(board.errors(), ReadErrors { touch: 1, imu: 0 });
    }

    #[test]
    fn test_failing_touch_releases_after_streak() {
        let press = TouchSample { x: 40, y: 60, pressed: true };
        // Popped from the back: one good press, then failures
        let reads = vec![Err(()), Err(()), Err(()), Err(()), Ok(press)];
        let mut board: BoardInput<_, _, NoMotion> =
            BoardInput::new(buttons([false; 3]), Some(ScriptedTouch(reads)), None);

        assert_eq!(board.sample().touch, Some(press));
        assert_eq!(board.sample().touch, None);
        assert_eq!(board.sample().touch, None);

        let lifted = TouchSample { pressed: false, ..press };
        assert_eq!(board.sample().touch, Some(lifted));
        // Already reported as lifted
        assert_eq!(board.sample().touch, None);
        assert_eq!(board.errors().touch, 4);
    }

    #[test]
    fn test_missing_devices_report_none() {
        let mut board: BoardInput<_, NoTouch, NoMotion> =
            BoardInput::new(buttons([false; 3]), None, None);

        let sample = board.sample();
        assert_eq!(sample.touch, None);
        assert_eq!(sample.imu, None);
        assert_eq!(board.errors(), ReadErrors::default());
    }
}
