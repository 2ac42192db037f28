//! Rasterizers the embedded-graphics primitives don't cover

use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
    primitives::Rectangle,
};
use kairos_core::math::{to_degrees, wrap};

/// Ring sector between two radii and two angles
///
/// Angles are in degrees, clockwise from the positive X axis (Y grows
/// downwards). A sweep of 360 degrees or more is a full ring; equal start
/// and end angles give an empty sector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RingSector {
    pub center: Point,
    pub outer: i32,
    pub inner: i32,
    pub start_deg: f32,
    pub sweep_deg: f32,
}

impl RingSector {
    pub fn new(center: Point, outer: i32, inner: i32, start_deg: f32, end_deg: f32) -> Self {
        let (outer, inner) = if inner > outer {
            (inner, outer)
        } else {
            (outer, inner)
        };
        let raw = end_deg - start_deg;
        let sweep_deg = if raw >= 360.0 || raw <= -360.0 {
            360.0
        } else {
            wrap(raw, 0.0, 360.0)
        };

        Self {
            center,
            outer,
            inner: inner.max(0),
            start_deg: wrap(start_deg, 0.0, 360.0),
            sweep_deg,
        }
    }

    pub fn bounding_box(&self) -> Rectangle {
        let side = (2 * self.outer + 1).max(0) as u32;
        Rectangle::with_center(self.center, Size::new_equal(side))
    }

    pub fn is_empty(&self) -> bool {
        self.sweep_deg <= 0.0
    }

    /// Whether the pixel at `p` lies inside the sector
    pub fn contains(&self, p: Point) -> bool {
        if self.is_empty() {
            return false;
        }

        let d = p - self.center;
        let dist2 = d.x * d.x + d.y * d.y;
        if dist2 > self.outer * self.outer || dist2 < self.inner * self.inner {
            return false;
        }
        if self.sweep_deg >= 360.0 || d == Point::zero() {
            return true;
        }

        let angle = to_degrees(libm::atan2f(d.y as f32, d.x as f32));
        wrap(angle - self.start_deg, 0.0, 360.0) <= self.sweep_deg
    }

    /// Whether `p` is inside and has a 4-neighbour outside
    pub fn on_edge(&self, p: Point) -> bool {
        self.contains(p)
            && [
                Point::new(1, 0),
                Point::new(-1, 0),
                Point::new(0, 1),
                Point::new(0, -1),
            ]
            .iter()
            .any(|&n| !self.contains(p + n))
    }

    pub fn fill_pixels(self, color: Rgb565) -> impl Iterator<Item = Pixel<Rgb565>> {
        self.bounding_box()
            .points()
            .filter(move |&p| self.contains(p))
            .map(move |p| Pixel(p, color))
    }

    pub fn edge_pixels(self, color: Rgb565) -> impl Iterator<Item = Pixel<Rgb565>> {
        self.bounding_box()
            .points()
            .filter(move |&p| self.on_edge(p))
            .map(move |p| Pixel(p, color))
    }
}

/// Draw target that blows every pixel up to a `scale` x `scale` block
///
/// Used to enlarge the mono fonts. Pixels are scaled about `origin`, so
/// text anchored there stays anchored.
pub(crate) struct Scaled<'t, T> {
    target: &'t mut T,
    origin: Point,
    scale: u32,
}

impl<'t, T> Scaled<'t, T> {
    pub fn new(target: &'t mut T, origin: Point, scale: u32) -> Self {
        Self {
            target,
            origin,
            scale: scale.max(1),
        }
    }
}

impl<T: DrawTarget<Color = Rgb565>> OriginDimensions for Scaled<'_, T> {
    fn size(&self) -> Size {
        self.target.bounding_box().size
    }
}

impl<T: DrawTarget<Color = Rgb565>> DrawTarget for Scaled<'_, T> {
    type Color = Rgb565;
    type Error = T::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let block = Size::new_equal(self.scale);
        for Pixel(point, color) in pixels {
            let top_left = self.origin + (point - self.origin) * self.scale as i32;
            self.target.fill_solid(&Rectangle::new(top_left, block), color)?;
        }
        Ok(())
    }
}
