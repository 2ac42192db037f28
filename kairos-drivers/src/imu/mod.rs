//! Motion sensor implementations

pub mod mpu6886;

pub use mpu6886::{AccelRange, GyroRange, Mpu6886, Mpu6886Config};

use kairos_hal::ImuSample;

/// A motion sensor that delivers one combined reading per poll
pub trait MotionSensor {
    type Error;

    /// Acceleration in G, angular rate in degrees per second and magnetic
    /// field in microtesla (zero without a magnetometer)
    fn read_motion(&mut self) -> Result<ImuSample, Self::Error>;
}
