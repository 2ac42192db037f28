//! RGB565 frame buffer
//!
//! Drawing lands in a caller-provided `&mut [u16]`, row-major, one entry per
//! pixel. Nothing reaches the panel until [`Surface::present`] hands the
//! whole buffer to the [`DisplaySink`].

use core::convert::Infallible;

use embedded_graphics::{
    mono_font::{ascii::FONT_6X10, MonoFont, MonoTextStyle},
    pixelcolor::{raw::RawU16, Rgb565},
    prelude::*,
    primitives::{
        Circle, Line, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, RoundedRectangle,
        StrokeAlignment, Triangle,
    },
    text::{Baseline, Text},
};
use kairos_core::math::Vec2i;
use kairos_core::{Canvas, Surface};
use kairos_hal::DisplaySink;

use crate::raster::{RingSector, Scaled};

/// Frame buffer construction errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BufferError {
    /// The panel reported a zero width or height
    ZeroSize,
    /// The backing slice cannot hold a full frame
    TooSmall { needed: usize, actual: usize },
}

impl core::fmt::Display for BufferError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ZeroSize => write!(f, "display reports zero size"),
            Self::TooSmall { needed, actual } => {
                write!(f, "frame needs {} pixels, buffer has {}", needed, actual)
            }
        }
    }
}

/// Off-screen frame presented to a [`DisplaySink`]
pub struct FrameBuffer<'a, D> {
    pixels: &'a mut [u16],
    width: u16,
    height: u16,
    sink: D,
}

impl<'a, D: DisplaySink> FrameBuffer<'a, D> {
    /// Wrap `pixels` as a frame sized to `sink`
    ///
    /// Only the first `width * height` entries are used.
    pub fn new(pixels: &'a mut [u16], sink: D) -> Result<Self, BufferError> {
        let (width, height) = sink.dimensions();
        if width == 0 || height == 0 {
            return Err(BufferError::ZeroSize);
        }

        let needed = width as usize * height as usize;
        if pixels.len() < needed {
            return Err(BufferError::TooSmall {
                needed,
                actual: pixels.len(),
            });
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("Frame buffer {}x{}", width, height);

        Ok(Self {
            pixels: &mut pixels[..needed],
            width,
            height,
            sink,
        })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Pixel at (x, y), `None` when out of bounds
    pub fn pixel(&self, x: i32, y: i32) -> Option<u16> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    pub fn pixels(&self) -> &[u16] {
        self.pixels
    }

    pub fn sink(&self) -> &D {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut D {
        &mut self.sink
    }

    /// Give back the buffer and the sink
    pub fn release(self) -> (&'a mut [u16], D) {
        (self.pixels, self.sink)
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    fn set(&mut self, x: i32, y: i32, color: u16) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    fn paint<T>(&mut self, item: &T)
    where
        T: Drawable<Color = Rgb565>,
    {
        // Drawing into memory cannot fail
        let _ = item.draw(self);
    }
}

fn rgb(color: u16) -> Rgb565 {
    Rgb565::from(RawU16::new(color))
}

fn point(p: Vec2i) -> Point {
    Point::new(p.x, p.y)
}

/// One-pixel outline that stays inside the shape's bounds
fn outline(color: u16) -> PrimitiveStyle<Rgb565> {
    PrimitiveStyleBuilder::new()
        .stroke_color(rgb(color))
        .stroke_width(1)
        .stroke_alignment(StrokeAlignment::Inside)
        .build()
}

fn rect(x: i32, y: i32, w: i32, h: i32) -> Option<Rectangle> {
    (w > 0 && h > 0).then(|| Rectangle::new(Point::new(x, y), Size::new(w as u32, h as u32)))
}

fn circle(x: i32, y: i32, r: i32) -> Option<Circle> {
    (r >= 0).then(|| Circle::with_center(Point::new(x, y), (2 * r + 1) as u32))
}

/// Base font scaled by the text size
fn font() -> &'static MonoFont<'static> {
    &FONT_6X10
}

fn advance(font: &MonoFont<'_>) -> i32 {
    (font.character_size.width + font.character_spacing) as i32
}

impl<D: DisplaySink> OriginDimensions for FrameBuffer<'_, D> {
    fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }
}

impl<D: DisplaySink> DrawTarget for FrameBuffer<'_, D> {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set(point.x, point.y, color.into_storage());
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        if area.is_zero_sized() {
            return Ok(());
        }

        let color = color.into_storage();
        let width = self.width as usize;
        let left = area.top_left.x as usize;
        let right = left + area.size.width as usize;
        for y in area.rows() {
            let row = y as usize * width;
            self.pixels[row + left..row + right].fill(color);
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.pixels.fill(color.into_storage());
        Ok(())
    }
}

impl<D: DisplaySink> Canvas for FrameBuffer<'_, D> {
    fn size(&self) -> (i32, i32) {
        (self.width as i32, self.height as i32)
    }

    fn fill_screen(&mut self, color: u16) {
        self.pixels.fill(color);
    }

    fn draw_pixel(&mut self, x: i32, y: i32, color: u16) {
        self.set(x, y, color);
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u16) {
        let line = Line::new(Point::new(x0, y0), Point::new(x1, y1))
            .into_styled(PrimitiveStyle::with_stroke(rgb(color), 1));
        self.paint(&line);
    }

    fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u16) {
        if let Some(r) = rect(x, y, w, h) {
            self.paint(&r.into_styled(outline(color)));
        }
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u16) {
        if let Some(r) = rect(x, y, w, h) {
            let _ = self.fill_solid(&r, rgb(color));
        }
    }

    fn draw_round_rect(&mut self, x: i32, y: i32, w: i32, h: i32, radius: i32, color: u16) {
        if let Some(r) = rect(x, y, w, h) {
            let rounded =
                RoundedRectangle::with_equal_corners(r, Size::new_equal(radius.max(0) as u32));
            self.paint(&rounded.into_styled(outline(color)));
        }
    }

    fn fill_round_rect(&mut self, x: i32, y: i32, w: i32, h: i32, radius: i32, color: u16) {
        if let Some(r) = rect(x, y, w, h) {
            let rounded =
                RoundedRectangle::with_equal_corners(r, Size::new_equal(radius.max(0) as u32));
            self.paint(&rounded.into_styled(PrimitiveStyle::with_fill(rgb(color))));
        }
    }

    fn draw_circle(&mut self, x: i32, y: i32, r: i32, color: u16) {
        if let Some(c) = circle(x, y, r) {
            self.paint(&c.into_styled(outline(color)));
        }
    }

    fn fill_circle(&mut self, x: i32, y: i32, r: i32, color: u16) {
        if let Some(c) = circle(x, y, r) {
            self.paint(&c.into_styled(PrimitiveStyle::with_fill(rgb(color))));
        }
    }

    fn draw_arc(
        &mut self,
        x: i32,
        y: i32,
        outer_r: i32,
        inner_r: i32,
        start_deg: f32,
        end_deg: f32,
        color: u16,
    ) {
        let sector = RingSector::new(Point::new(x, y), outer_r, inner_r, start_deg, end_deg);
        let _ = self.draw_iter(sector.edge_pixels(rgb(color)));
    }

    fn fill_arc(
        &mut self,
        x: i32,
        y: i32,
        outer_r: i32,
        inner_r: i32,
        start_deg: f32,
        end_deg: f32,
        color: u16,
    ) {
        let sector = RingSector::new(Point::new(x, y), outer_r, inner_r, start_deg, end_deg);
        let _ = self.draw_iter(sector.fill_pixels(rgb(color)));
    }

    fn draw_triangle(&mut self, p0: Vec2i, p1: Vec2i, p2: Vec2i, color: u16) {
        let triangle = Triangle::new(point(p0), point(p1), point(p2))
            .into_styled(PrimitiveStyle::with_stroke(rgb(color), 1));
        self.paint(&triangle);
    }

    fn fill_triangle(&mut self, p0: Vec2i, p1: Vec2i, p2: Vec2i, color: u16) {
        let triangle = Triangle::new(point(p0), point(p1), point(p2))
            .into_styled(PrimitiveStyle::with_fill(rgb(color)));
        self.paint(&triangle);
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: u16, size: u8) {
        let origin = Point::new(x, y);
        let style = MonoTextStyle::new(font(), rgb(color));
        let text = Text::with_baseline(text, origin, style, Baseline::Top);

        if size <= 1 {
            self.paint(&text);
        } else {
            let mut scaled = Scaled::new(self, origin, size as u32);
            let _ = text.draw(&mut scaled);
        }
    }

    fn text_width(&self, text: &str, size: u8) -> i32 {
        let widest = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
        widest as i32 * advance(font()) * size.max(1) as i32
    }

    fn font_height(&self, size: u8) -> i32 {
        font().character_size.height as i32 * size.max(1) as i32
    }
}

impl<D: DisplaySink> Surface for FrameBuffer<'_, D> {
    type Error = D::Error;

    fn present(&mut self) -> Result<(), Self::Error> {
        self.sink.write_frame(self.pixels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: u16 = 0xFFFF;
    const RED: u16 = 0xF800;

    struct MockSink {
        size: (u16, u16),
        frames: Vec<Vec<u16>>,
        fail: bool,
    }

    impl MockSink {
        fn new(width: u16, height: u16) -> Self {
            Self {
                size: (width, height),
                frames: Vec::new(),
                fail: false,
            }
        }
    }

    impl DisplaySink for MockSink {
        type Error = &'static str;

        fn dimensions(&self) -> (u16, u16) {
            self.size
        }

        fn write_frame(&mut self, pixels: &[u16]) -> Result<(), Self::Error> {
            if self.fail {
                return Err("bus error");
            }
            self.frames.push(pixels.to_vec());
            Ok(())
        }
    }

    fn lit(fb: &FrameBuffer<'_, MockSink>) -> usize {
        fb.pixels().iter().filter(|&&p| p != 0).count()
    }

    #[test]
    fn test_rejects_short_buffer() {
        let mut pixels = [0u16; 10];
        let err = FrameBuffer::new(&mut pixels, MockSink::new(4, 4)).err();
        assert_eq!(err, Some(BufferError::TooSmall { needed: 16, actual: 10 }));
    }

    #[test]
    fn test_rejects_zero_size() {
        let mut pixels = [0u16; 4];
        let err = FrameBuffer::new(&mut pixels, MockSink::new(0, 4)).err();
        assert_eq!(err, Some(BufferError::ZeroSize));
    }

    #[test]
    fn test_pixels_clip_at_edges() {
        let mut pixels = [0u16; 16];
        let mut fb = FrameBuffer::new(&mut pixels, MockSink::new(4, 4)).unwrap();

        fb.draw_pixel(-1, 0, WHITE);
        fb.draw_pixel(4, 0, WHITE);
        fb.draw_pixel(0, 4, WHITE);
        assert_eq!(lit(&fb), 0);

        fb.draw_pixel(3, 3, WHITE);
        assert_eq!(fb.pixel(3, 3), Some(WHITE));
        assert_eq!(fb.pixel(4, 3), None);
    }

    #[test]
    fn test_fill_rect_is_clipped() {
        let mut pixels = [0u16; 16];
        let mut fb = FrameBuffer::new(&mut pixels, MockSink::new(4, 4)).unwrap();

        fb.fill_rect(-2, -2, 4, 4, RED);
        assert_eq!(lit(&fb), 4);
        assert_eq!(fb.pixel(1, 1), Some(RED));
        assert_eq!(fb.pixel(2, 2), Some(0));

        fb.fill_rect(0, 0, 0, 5, WHITE);
        assert_eq!(lit(&fb), 4);
    }

    #[test]
    fn test_rect_outline_stays_inside() {
        let mut pixels = [0u16; 25];
        let mut fb = FrameBuffer::new(&mut pixels, MockSink::new(5, 5)).unwrap();

        fb.draw_rect(0, 0, 5, 5, WHITE);
        assert_eq!(lit(&fb), 16);
        assert_eq!(fb.pixel(2, 2), Some(0));
        assert_eq!(fb.pixel(4, 4), Some(WHITE));
    }

    #[test]
    fn test_fill_circle_spans_diameter() {
        let mut pixels = [0u16; 121];
        let mut fb = FrameBuffer::new(&mut pixels, MockSink::new(11, 11)).unwrap();

        fb.fill_circle(5, 5, 5, WHITE);
        assert_eq!(fb.pixel(5, 5), Some(WHITE));
        assert_eq!(fb.pixel(0, 5), Some(WHITE));
        assert_eq!(fb.pixel(10, 5), Some(WHITE));
        assert_eq!(fb.pixel(0, 0), Some(0));
    }

    #[test]
    fn test_fill_arc_leaves_hole() {
        let mut pixels = [0u16; 441];
        let mut fb = FrameBuffer::new(&mut pixels, MockSink::new(21, 21)).unwrap();

        fb.fill_arc(10, 10, 10, 5, 0.0, 360.0, WHITE);
        assert_eq!(fb.pixel(10, 10), Some(0));
        assert_eq!(fb.pixel(18, 10), Some(WHITE));
    }

    #[test]
    fn test_zero_length_arc_draws_nothing() {
        let mut pixels = [0u16; 441];
        let mut fb = FrameBuffer::new(&mut pixels, MockSink::new(21, 21)).unwrap();

        fb.fill_arc(10, 10, 10, 2, -90.0, -90.0, WHITE);
        fb.draw_arc(10, 10, 10, 2, 45.0, 45.0, WHITE);
        assert_eq!(lit(&fb), 0);
    }

    #[test]
    fn test_text_metrics_scale() {
        let mut pixels = [0u16; 16];
        let fb = FrameBuffer::new(&mut pixels, MockSink::new(4, 4)).unwrap();

        assert_eq!(fb.text_width("abc", 1), 18);
        assert_eq!(fb.text_width("abc", 2), 36);
        assert_eq!(fb.text_width("ab\nabcd", 1), 24);
        assert_eq!(fb.font_height(1), 10);
        assert_eq!(fb.font_height(3), 30);
    }

    #[test]
    fn test_scaled_text_stays_in_its_box() {
        let mut pixels = [0u16; 64 * 32];
        let mut fb = FrameBuffer::new(&mut pixels, MockSink::new(64, 32)).unwrap();

        fb.draw_text("H", 4, 2, WHITE, 2);
        assert!(lit(&fb) > 0);
        for y in 0..32 {
            for x in 0..64 {
                if fb.pixel(x, y) != Some(0) {
                    assert!((4..16).contains(&x) && (2..22).contains(&y), "({}, {})", x, y);
                }
            }
        }
    }

    #[test]
    fn test_present_hands_whole_frame_to_sink() {
        let mut pixels = [0u16; 6];
        let mut fb = FrameBuffer::new(&mut pixels, MockSink::new(3, 2)).unwrap();

        fb.fill_screen(RED);
        fb.present().unwrap();
        assert_eq!(fb.sink().frames, [vec![RED; 6]]);

        fb.sink_mut().fail = true;
        assert_eq!(fb.present(), Err("bus error"));
    }

    #[test]
    fn test_embedded_graphics_clear() {
        let mut pixels = [0u16; 4];
        let mut fb = FrameBuffer::new(&mut pixels, MockSink::new(2, 2)).unwrap();

        fb.clear(Rgb565::RED).unwrap();
        assert_eq!(fb.pixels(), [RED; 4]);
    }
}
