//! Display panel implementations

pub mod st7789;

pub use st7789::{Orientation, St7789, St7789Config};
