//! Off-screen rendering for Kairos
//!
//! This crate provides:
//! - [`FrameBuffer`], a caller-owned RGB565 buffer that implements both the
//!   `kairos_core` [`Canvas`](kairos_core::Canvas) and the embedded-graphics
//!   `DrawTarget`
//! - Presentation of finished frames through a
//!   [`DisplaySink`](kairos_hal::DisplaySink)
//!
//! # Architecture
//!
//! ```text
//!   sketch ──draw──▶ FrameBuffer (&mut [u16]) ──present──▶ DisplaySink
//!                        │
//!                        └── embedded-graphics primitives and mono fonts
//! ```
//!
//! The buffer lives wherever the firmware puts it (usually a static cell),
//! so nothing here allocates.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod framebuffer;
mod raster;

pub use framebuffer::{BufferError, FrameBuffer};
