//! Frame controller
//!
//! [`System`] owns the clock, the off-screen surface and the input hardware
//! and drives the frame loop:
//!
//! ```text
//!   while system.update() {         // every frame_interval_ms:
//!                                   //   1. draw print buffer, present
//!                                   //   2. commit timing statistics
//!                                   //   3. sleep out the remaining slack
//!                                   //   4. refresh input snapshot
//!                                   //   5. clear to background
//!       if !system.is_new_frame() {
//!           continue;
//!       }
//!       let mut frame = system.frame();
//!       ...                         // draw and hit-test
//!   }
//! ```
//!
//! Calls to [`System::update`] before the interval has elapsed do nothing,
//! so the host may spin on it. The input snapshot only changes on committed
//! frames; edge queries (`touched`, `released`, `was_pressed`) stay true for
//! every call in between, so draw and hit-test only when
//! [`System::is_new_frame`] is set.

use core::fmt;

use kairos_hal::{Clock, InputHardware};

use crate::canvas::Surface;
use crate::color::Color;
use crate::config::{ConfigError, SystemConfig};
use crate::frame::Frame;
use crate::gui::Style;
use crate::imu::{AttitudeEstimator, EulerAngles};
use crate::input::InputSnapshot;
use crate::math::Vec3f;
use crate::print::PrintBuffer;
use crate::time::FrameClock;

/// Frame loop context
pub struct System<C: Clock, S: Surface, H: InputHardware> {
    clock: C,
    surface: S,
    hardware: H,
    config: SystemConfig,
    timing: FrameClock,
    input: InputSnapshot,
    attitude: AttitudeEstimator,
    background: Color,
    print: PrintBuffer,
    style: Style,
    present_failures: u32,
    new_frame: bool,
}

impl<C: Clock, S: Surface, H: InputHardware> System<C, S, H> {
    /// Validate `config` and prepare the first frame
    ///
    /// The surface is cleared to the background color and the first frame
    /// is due one interval from now.
    pub fn new(config: SystemConfig, clock: C, mut surface: S, hardware: H) -> Result<Self, ConfigError> {
        config.validate()?;

        let timing = FrameClock::new(config.frame_interval_ms, clock.now_ms());
        surface.fill_screen(config.background.to_rgb565());

        Ok(Self {
            clock,
            surface,
            hardware,
            timing,
            input: InputSnapshot::new(),
            attitude: AttitudeEstimator::new(),
            background: config.background,
            print: PrintBuffer::new(),
            style: Style::default(),
            present_failures: 0,
            new_frame: false,
            config,
        })
    }

    /// Advance the frame loop
    ///
    /// Commits a frame once the frame interval has elapsed since the last
    /// one; otherwise returns immediately. Always returns `true`; use
    /// [`is_new_frame`](Self::is_new_frame) to tell the two apart.
    pub fn update(&mut self) -> bool {
        let tick_start = self.clock.now_ms();
        if !self.timing.is_due(tick_start) {
            self.new_frame = false;
            return true;
        }

        self.print.draw(
            &mut self.surface,
            self.config.text_color,
            self.config.text_size,
        );
        if self.surface.present().is_err() {
            self.present_failures = self.present_failures.saturating_add(1);
            #[cfg(feature = "defmt")]
            defmt::warn!("Frame present failed ({} total)", self.present_failures);
        }

        self.timing.commit(tick_start);
        #[cfg(feature = "defmt")]
        defmt::trace!("Frame {} committed", self.timing.frame_count());

        let remaining = self.timing.remaining_ms(tick_start, self.clock.now_ms());
        if remaining > 0 {
            self.clock.delay_ms(remaining);
        }

        let mut sample = self.hardware.sample();
        if !self.config.imu_enabled {
            sample.imu = None;
        }
        self.input.refresh(&sample, self.clock.now_ms());

        self.surface.fill_screen(self.background.to_rgb565());
        self.new_frame = true;

        true
    }

    /// Whether the last [`update`](Self::update) committed a frame
    ///
    /// False before the first commit and after every call that returned
    /// early.
    pub fn is_new_frame(&self) -> bool {
        self.new_frame
    }

    /// Drawing context for the current frame
    pub fn frame(&mut self) -> Frame<'_, S> {
        Frame::new(&mut self.surface, &self.input, &self.style)
    }

    pub fn input(&self) -> &InputSnapshot {
        &self.input
    }

    pub fn width(&self) -> i32 {
        self.surface.size().0
    }

    pub fn height(&self) -> i32 {
        self.surface.size().1
    }

    /// Seconds between the last two committed frames
    pub fn delta_time(&self) -> f32 {
        self.timing.delta_time()
    }

    pub fn fps(&self) -> f32 {
        self.timing.fps()
    }

    pub fn frame_count(&self) -> u64 {
        self.timing.frame_count()
    }

    pub fn timing(&self) -> &FrameClock {
        &self.timing
    }

    /// Milliseconds on the system clock
    pub fn elapsed_ms(&self) -> u32 {
        self.clock.now_ms()
    }

    pub fn elapsed_s(&self) -> f32 {
        self.clock.now_ms() as f32 / 1000.0
    }

    /// Clear color applied from the next committed frame on
    pub fn set_background_color(&mut self, color: Color) {
        self.background = color;
    }

    pub fn background_color(&self) -> Color {
        self.background
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    /// Append a line to the print overlay
    pub fn println(&mut self, args: fmt::Arguments<'_>) {
        self.print.println(args);
    }

    pub fn print(&mut self) -> &mut PrintBuffer {
        &mut self.print
    }

    pub fn clear_print(&mut self) {
        self.print.clear();
    }

    /// Latest acceleration in G, zero without an IMU reading
    pub fn accel(&self) -> Vec3f {
        self.input.imu().map(|s| s.accel.into()).unwrap_or_default()
    }

    /// Latest angular rate in degrees per second
    pub fn gyro(&self) -> Vec3f {
        self.input.imu().map(|s| s.gyro.into()).unwrap_or_default()
    }

    /// Latest magnetic field in microtesla
    pub fn mag(&self) -> Vec3f {
        self.input.imu().map(|s| s.mag.into()).unwrap_or_default()
    }

    /// Fold the latched IMU reading into the attitude estimate
    ///
    /// Integrates over the last frame's delta time. Without a reading the
    /// previous estimate is returned unchanged.
    pub fn update_attitude(&mut self, alpha: f32, gyro_scale: f32) -> EulerAngles {
        match self.input.imu() {
            Some(sample) => {
                self.attitude
                    .update(sample, self.timing.delta_time(), alpha, gyro_scale)
            }
            None => self.attitude.angles(),
        }
    }

    /// [`update_attitude`](Self::update_attitude) with default filter weights
    pub fn angles(&mut self) -> EulerAngles {
        self.update_attitude(crate::imu::DEFAULT_ALPHA, crate::imu::DEFAULT_GYRO_SCALE)
    }

    /// Number of frames the surface failed to present
    pub fn present_failures(&self) -> u32 {
        self.present_failures
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn hardware_mut(&mut self) -> &mut H {
        &mut self.hardware
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
