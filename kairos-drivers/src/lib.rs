//! Hardware driver implementations
//!
//! This crate provides blocking `embedded-hal` 1.0 drivers for the parts of
//! a Kairos board and implements the `kairos-hal` traits on top of them:
//!
//! - Display panels (ST7789 over SPI) as a [`DisplaySink`](kairos_hal::DisplaySink)
//! - Touch controllers (FT6336 over I2C)
//! - Motion sensors (MPU6886 over I2C)
//! - Debounced GPIO buttons
//! - [`board::BoardInput`], which bundles the above into an
//!   [`InputHardware`](kairos_hal::InputHardware) sampler

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod board;
pub mod button;
pub mod display;
pub mod error;
pub mod imu;
pub mod touch;

pub use board::BoardInput;
pub use button::GpioButton;
pub use error::Error;
