//! Kairos Hardware Abstraction Layer
//!
//! This crate defines the traits the frame loop uses to talk to a board.
//! Board support code (drivers, firmware) implements them; `kairos-core`
//! only ever calls through them, so the same sketch runs on real hardware
//! and against host-side mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Sketch (kairos-firmware, tests, ...)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  kairos-core (frame loop, input, gui)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  kairos-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ kairos-drivers│       │ host mocks    │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`clock::Clock`] - Millisecond time source and blocking delay
//! - [`display::DisplaySink`] - Physical panel that receives whole frames
//! - [`input::InputHardware`] - One-shot sampler for buttons, touch and IMU

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod display;
pub mod input;

// Re-export key traits at crate root for convenience
pub use clock::Clock;
pub use display::DisplaySink;
pub use input::{
    ButtonId, HardwareSample, ImuSample, InputHardware, TouchSample, Vector3, BUTTON_COUNT,
};
