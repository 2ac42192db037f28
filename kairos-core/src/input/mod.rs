//! Per-frame input snapshot
//!
//! Hardware is sampled exactly once per committed frame. Everything drawn
//! in that frame observes the same snapshot, and every query here is a
//! side-effect-free read.
//!
//! ```text
//!   InputHardware::sample()
//!            |
//!            v
//!   +------------------+     Button x3  level / edge / hold time
//!   |  InputSnapshot   | --> Touch      current + previous sample
//!   +------------------+     ImuSample  latest raw reading
//! ```

mod button;
mod edge;
mod touch;

pub use button::Button;
pub use edge::Edge;
pub use touch::Touch;

use kairos_hal::{ButtonId, HardwareSample, ImuSample, BUTTON_COUNT};

/// Input state for the current frame
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputSnapshot {
    buttons: [Button; BUTTON_COUNT],
    touch: Touch,
    imu: Option<ImuSample>,
    time_ms: u32,
    refresh_count: u64,
}

impl Default for InputSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSnapshot {
    pub const fn new() -> Self {
        Self {
            buttons: [
                Button::new(ButtonId::A),
                Button::new(ButtonId::B),
                Button::new(ButtonId::C),
            ],
            touch: Touch::new(),
            imu: None,
            time_ms: 0,
            refresh_count: 0,
        }
    }

    /// Latch a hardware sample taken at `now_ms`
    ///
    /// A missing IMU reading keeps the last one.
    pub fn refresh(&mut self, sample: &HardwareSample, now_ms: u32) {
        for (button, &level) in self.buttons.iter_mut().zip(sample.buttons.iter()) {
            button.update(level, now_ms);
        }

        self.touch.refresh(sample.touch);

        if sample.imu.is_some() {
            self.imu = sample.imu;
        }

        self.time_ms = now_ms;
        self.refresh_count += 1;
    }

    pub fn button(&self, id: ButtonId) -> &Button {
        &self.buttons[id.index()]
    }

    pub fn buttons(&self) -> &[Button; BUTTON_COUNT] {
        &self.buttons
    }

    pub fn touch(&self) -> &Touch {
        &self.touch
    }

    /// Latest IMU reading, if one was ever latched
    pub fn imu(&self) -> Option<&ImuSample> {
        self.imu.as_ref()
    }

    /// Clock time of the last refresh
    pub fn time_ms(&self) -> u32 {
        self.time_ms
    }

    /// Number of refreshes since construction
    pub fn refresh_count(&self) -> u64 {
        self.refresh_count
    }
}
