//! Sprites backed by a caller-provided pixel buffer
//!
//! An [`Image`] never allocates. It borrows an RGB565 buffer and uses the
//! first `width * height` pixels of it. Every failed operation leaves the
//! image empty.
//!
//! Sketches usually embed their sprites as Base64 text;
//! [`Image::load_base64`] decodes it into a caller scratch buffer and hands
//! the bytes to the PNG decoder.

mod png;

pub use png::MAX_WIDTH as PNG_MAX_WIDTH;

use base64::engine::general_purpose::STANDARD;
use base64::{DecodeSliceError, Engine as _};

use crate::canvas::Canvas;
use crate::color::Color;
use crate::math::Vec2i;

/// Image creation and decoding errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ImageError {
    /// Width or height is zero or negative
    InvalidSize,
    /// Pixel buffer cannot hold the requested size
    BufferTooSmall,
    /// Input does not start with the PNG signature
    InvalidSignature,
    /// IHDR chunk missing or malformed
    InvalidHeader,
    /// Valid PNG using a format this decoder does not handle
    Unsupported,
    /// Compressed image data is corrupt
    Inflate,
    /// Input ended before all rows were decoded
    Truncated,
    /// Unknown scanline filter type
    BadFilter,
    /// Text is empty or not valid padded Base64
    Base64,
}

/// RGB565 sprite
#[derive(Debug)]
pub struct Image<'a> {
    pixels: &'a mut [u16],
    width: i32,
    height: i32,
    valid: bool,
}

impl<'a> Image<'a> {
    /// Empty image over `pixels`
    pub fn new(pixels: &'a mut [u16]) -> Self {
        Self {
            pixels,
            width: 0,
            height: 0,
            valid: false,
        }
    }

    fn reset(&mut self) {
        self.width = 0;
        self.height = 0;
        self.valid = false;
    }

    fn pixel_count(&self) -> usize {
        (self.width * self.height) as usize
    }

    /// Make a `width` x `height` image filled with `background`
    pub fn create(&mut self, width: i32, height: i32, background: Color) -> Result<(), ImageError> {
        self.reset();

        if width <= 0 || height <= 0 {
            return Err(ImageError::InvalidSize);
        }
        let count = (width as usize)
            .checked_mul(height as usize)
            .ok_or(ImageError::BufferTooSmall)?;
        if count > self.pixels.len() {
            return Err(ImageError::BufferTooSmall);
        }

        self.pixels[..count].fill(background.to_rgb565());
        self.width = width;
        self.height = height;
        self.valid = true;
        Ok(())
    }

    /// Decode a PNG file image
    pub fn load_png(&mut self, bytes: &[u8]) -> Result<(), ImageError> {
        self.reset();

        match png::decode(bytes, self.pixels) {
            Ok(header) => {
                self.width = header.width as i32;
                self.height = header.height as i32;
                self.valid = true;
                Ok(())
            }
            Err(e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("PNG decode failed: {:?}", e);
                Err(e)
            }
        }
    }

    /// Decode Base64 text and load the PNG it contains
    ///
    /// `scratch` receives the decoded file and must hold at least three
    /// bytes per four characters of `text`.
    pub fn load_base64(&mut self, text: &[u8], scratch: &mut [u8]) -> Result<(), ImageError> {
        self.reset();

        let len = match STANDARD.decode_slice(text, scratch) {
            Ok(0) => Err(ImageError::Base64),
            Ok(len) => Ok(len),
            Err(DecodeSliceError::OutputSliceTooSmall) => Err(ImageError::BufferTooSmall),
            Err(_) => Err(ImageError::Base64),
        };
        match len {
            Ok(len) => self.load_png(&scratch[..len]),
            Err(e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Base64 decode failed: {:?}", e);
                Err(e)
            }
        }
    }

    /// Draw unscaled with the top-left corner at (x, y)
    pub fn draw(&self, canvas: &mut impl Canvas, x: i32, y: i32) {
        if self.valid {
            canvas.push_sprite(x, y, self.width, self.height, self.pixels());
        }
    }

    /// Draw scaled by (`sx`, `sy`) with the top-left corner at (x, y)
    pub fn draw_scaled(&self, canvas: &mut impl Canvas, x: i32, y: i32, sx: f32, sy: f32) {
        if self.valid {
            canvas.push_sprite_scaled(x, y, self.width, self.height, self.pixels(), sx, sy);
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn size(&self) -> Vec2i {
        Vec2i::new(self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        !self.valid
    }

    /// Pixels in use, row-major
    pub fn pixels(&self) -> &[u16] {
        if self.valid {
            &self.pixels[..self.pixel_count()]
        } else {
            &[]
        }
    }

    pub fn pixels_mut(&mut self) -> &mut [u16] {
        if self.valid {
            let count = self.pixel_count();
            &mut self.pixels[..count]
        } else {
            &mut []
        }
    }
}

#[cfg(test)]
mod tests {
    use super::png::tests::build_png;
    use super::*;
    use crate::canvas::mock::{Op, RecordingCanvas};

    #[test]
    fn test_create_fills_background() {
        let mut buffer = [0u16; 12];
        let mut image = Image::new(&mut buffer);
        image.create(3, 4, Color::new(255, 0, 0)).unwrap();

        assert_eq!(image.size(), Vec2i::new(3, 4));
        assert!(!image.is_empty());
        assert!(image.pixels().iter().all(|&p| p == 0xF800));
    }

    #[test]
    fn test_create_too_large_stays_empty() {
        let mut buffer = [0u16; 12];
        let mut image = Image::new(&mut buffer);
        image.create(2, 2, Color::new(0, 0, 0)).unwrap();

        assert_eq!(
            image.create(4, 4, Color::new(0, 0, 0)),
            Err(ImageError::BufferTooSmall)
        );
        assert!(image.is_empty());
        assert_eq!(image.width(), 0);
        assert_eq!(image.create(0, 4, Color::new(0, 0, 0)), Err(ImageError::InvalidSize));
    }

    #[test]
    fn test_failed_load_reverts_to_empty() {
        let mut buffer = [0u16; 16];
        let mut image = Image::new(&mut buffer);
        image.create(4, 4, Color::new(1, 2, 3)).unwrap();

        assert_eq!(
            image.load_png(&[0x89, b'P', b'N', b'G']),
            Err(ImageError::InvalidSignature)
        );
        assert!(image.is_empty());

        let mut canvas = RecordingCanvas::new(10, 10);
        image.draw(&mut canvas, 0, 0);
        assert!(canvas.ops.is_empty());
    }

    fn to_base64(bytes: &[u8]) -> Vec<u8> {
        let mut text = vec![0u8; bytes.len().div_ceil(3) * 4];
        let len = STANDARD.encode_slice(bytes, &mut text).unwrap();
        text.truncate(len);
        text
    }

    #[test]
    fn test_load_base64_png() {
        let file = build_png(2, 1, 2, &[0, 255, 0, 0, 0, 0, 255]);
        let text = to_base64(&file);
        let mut scratch = [0u8; 256];
        let mut buffer = [0u16; 4];
        let mut image = Image::new(&mut buffer);

        image.load_base64(&text, &mut scratch).unwrap();

        assert_eq!(image.size(), Vec2i::new(2, 1));
        assert_eq!(image.pixels(), [0xF800, 0x001F]);
    }

    #[test]
    fn test_bad_base64_leaves_image_empty() {
        let mut scratch = [0u8; 64];
        let mut buffer = [0u16; 4];
        let mut image = Image::new(&mut buffer);
        image.create(2, 2, Color::new(1, 2, 3)).unwrap();

        assert_eq!(
            image.load_base64(b"iVBO*w0K", &mut scratch),
            Err(ImageError::Base64)
        );
        assert!(image.is_empty());
        assert_eq!(image.load_base64(b"", &mut scratch), Err(ImageError::Base64));
    }

    #[test]
    fn test_base64_scratch_too_small() {
        let text = to_base64(&build_png(1, 1, 0, &[0, 255]));
        let mut scratch = [0u8; 8];
        let mut buffer = [0u16; 4];
        let mut image = Image::new(&mut buffer);

        assert_eq!(
            image.load_base64(&text, &mut scratch),
            Err(ImageError::BufferTooSmall)
        );
        assert!(image.is_empty());
    }

    #[test]
    fn test_load_and_draw() {
        let mut buffer = [0u16; 16];
        let mut image = Image::new(&mut buffer);
        image
            .load_png(&build_png(1, 2, 0, &[0, 255, 0, 0]))
            .unwrap();

        assert_eq!(image.size(), Vec2i::new(1, 2));

        let mut canvas = RecordingCanvas::new(10, 10);
        image.draw(&mut canvas, 3, 4);
        assert_eq!(canvas.ops, [Op::Pixel(3, 4, 0xFFFF), Op::Pixel(3, 5, 0x0000)]);
    }
}
