//! Touch controller implementations

pub mod ft6336;

pub use ft6336::{Ft6336, Ft6336Config};

use kairos_hal::TouchSample;

/// A touch controller that can be polled for the first contact
pub trait TouchSensor {
    type Error;

    /// Read the current contact
    ///
    /// With no finger down the sample reports `pressed == false`.
    fn read_touch(&mut self) -> Result<TouchSample, Self::Error>;
}
