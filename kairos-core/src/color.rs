//! RGB888 colors and RGB565 packing
//!
//! Callers work in 8-bit-per-channel RGB; the canvas and the panel take
//! packed RGB565. Unpacking replicates the high bits into the vacated low
//! bits so that full-scale channels stay full-scale and RGB565 survives a
//! round trip through [`Color`] unchanged.

use core::ops::Add;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::math;

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Unpack an RGB565 value
    pub const fn from_rgb565(rgb565: u16) -> Self {
        let mut r = ((rgb565 >> 8) & 0xF8) as u8;
        let mut g = ((rgb565 >> 3) & 0xFC) as u8;
        let mut b = ((rgb565 << 3) & 0xF8) as u8;

        r |= r >> 5;
        g |= g >> 6;
        b |= b >> 5;

        Self { r, g, b }
    }

    /// Build from a `0xRRGGBB` integer; the top byte is ignored
    pub const fn from_rgb888(rgb888: u32) -> Self {
        Self {
            r: ((rgb888 >> 16) & 0xFF) as u8,
            g: ((rgb888 >> 8) & 0xFF) as u8,
            b: (rgb888 & 0xFF) as u8,
        }
    }

    /// Pack as `0xRRGGBB`
    pub const fn to_rgb888(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Pack as RGB565 for hardware submission
    pub const fn to_rgb565(self) -> u16 {
        (((self.r & 0xF8) as u16) << 8) | (((self.g & 0xFC) as u16) << 3) | (self.b >> 3) as u16
    }

    /// Interpolate channel-wise towards `other`
    ///
    /// `t` is not clamped; results are saturated to the channel range.
    pub fn lerp(self, other: Color, t: f32) -> Color {
        let channel = |a: u8, b: u8| -> u8 {
            let v = math::lerp(a as f32, b as f32, t);
            v.clamp(0.0, 255.0) as u8
        };

        Color::new(
            channel(self.r, other.r),
            channel(self.g, other.g),
            channel(self.b, other.b),
        )
    }

    /// Build from hue (degrees), saturation and value (both `0.0..=1.0`)
    pub fn from_hsv(h: f32, s: f32, v: f32) -> Color {
        let h = math::wrap(h, 0.0, 360.0);
        let s = s.clamp(0.0, 1.0);
        let v = v.clamp(0.0, 1.0);

        let c = v * s;
        let x = c * (1.0 - libm::fabsf(libm::fmodf(h / 60.0, 2.0) - 1.0));
        let m = v - c;

        let (r, g, b) = match h {
            h if h < 60.0 => (c, x, 0.0),
            h if h < 120.0 => (x, c, 0.0),
            h if h < 180.0 => (0.0, c, x),
            h if h < 240.0 => (0.0, x, c),
            h if h < 300.0 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Color::new(
            ((r + m) * 255.0) as u8,
            ((g + m) * 255.0) as u8,
            ((b + m) * 255.0) as u8,
        )
    }

    /// Convert to (hue in degrees, saturation, value)
    pub fn to_hsv(self) -> (f32, f32, f32) {
        let r = self.r as f32 / 255.0;
        let g = self.g as f32 / 255.0;
        let b = self.b as f32 / 255.0;

        let cmax = r.max(g).max(b);
        let cmin = r.min(g).min(b);
        let diff = cmax - cmin;

        let h = if diff == 0.0 {
            0.0
        } else if cmax == r {
            libm::fmodf(60.0 * ((g - b) / diff) + 360.0, 360.0)
        } else if cmax == g {
            60.0 * ((b - r) / diff) + 120.0
        } else {
            60.0 * ((r - g) / diff) + 240.0
        };

        let s = if cmax == 0.0 { 0.0 } else { diff / cmax };

        (h, s, cmax)
    }
}

impl From<u16> for Color {
    fn from(rgb565: u16) -> Self {
        Color::from_rgb565(rgb565)
    }
}

impl From<Color> for u16 {
    fn from(color: Color) -> Self {
        color.to_rgb565()
    }
}

/// Channel-wise saturating addition
impl Add for Color {
    type Output = Color;

    fn add(self, other: Color) -> Color {
        Color::new(
            self.r.saturating_add(other.r),
            self.g.saturating_add(other.g),
            self.b.saturating_add(other.b),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_primaries() {
        assert_eq!(Color::new(255, 0, 0).to_rgb565(), 0xF800);
        assert_eq!(Color::new(0, 255, 0).to_rgb565(), 0x07E0);
        assert_eq!(Color::new(0, 0, 255).to_rgb565(), 0x001F);
        assert_eq!(Color::new(255, 255, 255).to_rgb565(), 0xFFFF);
    }

    #[test]
    fn test_unpack_replicates_low_bits() {
        assert_eq!(Color::from_rgb565(0xFFFF), Color::new(255, 255, 255));
        assert_eq!(Color::from_rgb565(0x0000), Color::new(0, 0, 0));
        // 0b10000 red -> 0b10000_100
        assert_eq!(Color::from_rgb565(0x8000).r, 0x84);
    }

    #[test]
    fn test_rgb888_roundtrip() {
        let c = Color::from_rgb888(0x12_34_56);
        assert_eq!(c, Color::new(0x12, 0x34, 0x56));
        assert_eq!(c.to_rgb888(), 0x12_34_56);
    }

    #[test]
    fn test_saturating_add() {
        let c = Color::new(200, 10, 0) + Color::new(100, 10, 0);
        assert_eq!(c, Color::new(255, 20, 0));
    }

    #[test]
    fn test_lerp_midpoint() {
        let c = Color::new(0, 0, 0).lerp(Color::new(200, 100, 50), 0.5);
        assert_eq!(c, Color::new(100, 50, 25));
    }

    #[test]
    fn test_hsv_primaries() {
        assert_eq!(Color::from_hsv(0.0, 1.0, 1.0), Color::new(255, 0, 0));
        assert_eq!(Color::from_hsv(120.0, 1.0, 1.0), Color::new(0, 255, 0));
        assert_eq!(Color::from_hsv(240.0, 1.0, 1.0), Color::new(0, 0, 255));
        assert_eq!(Color::from_hsv(480.0, 1.0, 1.0), Color::new(0, 255, 0));
    }

    #[test]
    fn test_to_hsv() {
        let (h, s, v) = Color::new(0, 0, 255).to_hsv();
        assert!((h - 240.0).abs() < 1e-3);
        assert_eq!(s, 1.0);
        assert_eq!(v, 1.0);

        let (h, s, _) = Color::new(128, 128, 128).to_hsv();
        assert_eq!(h, 0.0);
        assert_eq!(s, 0.0);
    }
}
