//! Driver error type

/// Errors shared by the bus drivers
///
/// `E` is the error type of the underlying SPI or I2C bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Bus transfer failed
    Bus(E),
    /// A control pin could not be driven or read
    Pin,
    /// The chip answered with an unexpected identity
    UnexpectedId(u8),
    /// Argument does not fit the device
    InvalidInput,
}

