//! Board-agnostic core of the Kairos frame loop
//!
//! This crate contains everything that does not depend on a specific
//! display controller, touch panel or IMU:
//!
//! - Frame pacing and timing statistics
//! - Per-frame input snapshot with button and touch edge tracking
//! - Complementary-filter attitude estimation
//! - Shapes with drawing and touch hit-testing
//! - Immediate-mode GUI widgets, aligned text and a print overlay
//! - RGB565 sprites with PNG decoding
//!
//! Hardware is reached through the `kairos-hal` traits and the
//! [`canvas::Surface`] trait, implemented by `kairos-display`.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod canvas;
pub mod color;
pub mod config;
pub mod font;
pub mod frame;
pub mod gui;
pub mod image;
pub mod imu;
pub mod input;
pub mod math;
pub mod palette;
pub mod print;
pub mod shapes;
pub mod system;
pub mod time;

pub use canvas::{Canvas, Surface};
pub use color::Color;
pub use config::SystemConfig;
pub use frame::Frame;
pub use system::System;
