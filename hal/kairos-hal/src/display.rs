//! Display panel abstraction
//!
//! The physical panel is treated as a write-only sink for complete RGB565
//! frames. All drawing happens in an off-screen buffer owned by the frame
//! loop; the panel only ever sees finished frames.

/// Physical display that accepts whole frames
pub trait DisplaySink {
    /// Error type for panel transfers
    type Error;

    /// Panel size in pixels as (width, height)
    fn dimensions(&self) -> (u16, u16);

    /// Write a complete frame to the panel
    ///
    /// `pixels` is row-major RGB565 with exactly `width * height` entries.
    fn write_frame(&mut self, pixels: &[u16]) -> Result<(), Self::Error>;
}

impl<T: DisplaySink + ?Sized> DisplaySink for &mut T {
    type Error = T::Error;

    fn dimensions(&self) -> (u16, u16) {
        (**self).dimensions()
    }

    fn write_frame(&mut self, pixels: &[u16]) -> Result<(), Self::Error> {
        (**self).write_frame(pixels)
    }
}
