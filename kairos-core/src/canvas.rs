//! Drawing surface abstraction
//!
//! Everything drawn during a frame goes through [`Canvas`]. Colors are
//! packed RGB565, coordinates are signed pixels with the origin at the
//! top-left corner. Out-of-bounds drawing is clipped by the implementation.
//!
//! [`Surface`] adds the one operation the frame loop needs on top of
//! drawing: pushing the finished frame to the panel.

use crate::math::Vec2i;

/// Segments used to flatten Bézier curves
pub const BEZIER_SEGMENTS: i32 = 24;

/// Off-screen RGB565 drawing target
pub trait Canvas {
    /// Size in pixels as (width, height)
    fn size(&self) -> (i32, i32);

    /// Fill the whole canvas
    fn fill_screen(&mut self, color: u16);

    fn draw_pixel(&mut self, x: i32, y: i32, color: u16);

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u16);

    /// Outline of a `w` x `h` rectangle whose top-left corner is (x, y)
    fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u16);

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u16);

    fn draw_round_rect(&mut self, x: i32, y: i32, w: i32, h: i32, radius: i32, color: u16);

    fn fill_round_rect(&mut self, x: i32, y: i32, w: i32, h: i32, radius: i32, color: u16);

    /// Outline of the circle of radius `r` centred on (x, y)
    fn draw_circle(&mut self, x: i32, y: i32, r: i32, color: u16);

    fn fill_circle(&mut self, x: i32, y: i32, r: i32, color: u16);

    /// Outline of the ring sector between `inner_r` and `outer_r`
    ///
    /// Angles are in degrees, clockwise from the positive X axis.
    #[allow(clippy::too_many_arguments)]
    fn draw_arc(
        &mut self,
        x: i32,
        y: i32,
        outer_r: i32,
        inner_r: i32,
        start_deg: f32,
        end_deg: f32,
        color: u16,
    );

    /// Filled ring sector between `inner_r` and `outer_r`
    #[allow(clippy::too_many_arguments)]
    fn fill_arc(
        &mut self,
        x: i32,
        y: i32,
        outer_r: i32,
        inner_r: i32,
        start_deg: f32,
        end_deg: f32,
        color: u16,
    );

    fn draw_triangle(&mut self, p0: Vec2i, p1: Vec2i, p2: Vec2i, color: u16);

    fn fill_triangle(&mut self, p0: Vec2i, p1: Vec2i, p2: Vec2i, color: u16);

    /// Draw `text` with its top-left corner at (x, y), scaled by `size`
    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: u16, size: u8);

    /// Width of `text` in pixels at `size`
    fn text_width(&self, text: &str, size: u8) -> i32;

    /// Line height in pixels at `size`
    fn font_height(&self, size: u8) -> i32;

    /// Quadratic Bézier curve
    fn draw_bezier3(&mut self, p0: Vec2i, p1: Vec2i, p2: Vec2i, color: u16) {
        let mut last = p0;
        for i in 1..=BEZIER_SEGMENTS {
            let t = i as f32 / BEZIER_SEGMENTS as f32;
            let u = 1.0 - t;
            let point = blend(&[(p0, u * u), (p1, 2.0 * u * t), (p2, t * t)]);
            self.draw_line(last.x, last.y, point.x, point.y, color);
            last = point;
        }
    }

    /// Cubic Bézier curve
    fn draw_bezier4(&mut self, p0: Vec2i, p1: Vec2i, p2: Vec2i, p3: Vec2i, color: u16) {
        let mut last = p0;
        for i in 1..=BEZIER_SEGMENTS {
            let t = i as f32 / BEZIER_SEGMENTS as f32;
            let u = 1.0 - t;
            let point = blend(&[
                (p0, u * u * u),
                (p1, 3.0 * u * u * t),
                (p2, 3.0 * u * t * t),
                (p3, t * t * t),
            ]);
            self.draw_line(last.x, last.y, point.x, point.y, color);
            last = point;
        }
    }

    /// Copy a row-major `w` x `h` block of pixels to (x, y)
    fn push_sprite(&mut self, x: i32, y: i32, w: i32, h: i32, pixels: &[u16]) {
        for (row, line) in pixels.chunks(w.max(1) as usize).take(h.max(0) as usize).enumerate() {
            for (col, &color) in line.iter().enumerate() {
                self.draw_pixel(x + col as i32, y + row as i32, color);
            }
        }
    }

    /// Copy a pixel block, scaling each source pixel to `sx` x `sy` pixels
    ///
    /// Scale factors below one pixel are rounded up so nothing disappears.
    #[allow(clippy::too_many_arguments)]
    fn push_sprite_scaled(
        &mut self,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        pixels: &[u16],
        sx: f32,
        sy: f32,
    ) {
        if sx <= 0.0 || sy <= 0.0 {
            return;
        }

        for (row, line) in pixels.chunks(w.max(1) as usize).take(h.max(0) as usize).enumerate() {
            let top = y + (row as f32 * sy) as i32;
            let bottom = y + ((row + 1) as f32 * sy) as i32;
            for (col, &color) in line.iter().enumerate() {
                let left = x + (col as f32 * sx) as i32;
                let right = x + ((col + 1) as f32 * sx) as i32;
                self.fill_rect(
                    left,
                    top,
                    (right - left).max(1),
                    (bottom - top).max(1),
                    color,
                );
            }
        }
    }
}

fn blend(weighted: &[(Vec2i, f32)]) -> Vec2i {
    let (mut x, mut y) = (0.0f32, 0.0f32);
    for &(p, w) in weighted {
        x += p.x as f32 * w;
        y += p.y as f32 * w;
    }
    Vec2i::new(libm::roundf(x) as i32, libm::roundf(y) as i32)
}

/// A canvas that can be pushed to a physical display
pub trait Surface: Canvas {
    type Error;

    /// Push the current contents to the display
    fn present(&mut self) -> Result<(), Self::Error>;
}

#[cfg(test)]
pub(crate) mod mock {
    //! Canvas that records draw calls instead of rasterizing them

    use std::string::String;
    use std::vec::Vec;

    use super::*;

    /// Glyph cell width at size 1
    pub const CHAR_W: i32 = 6;
    /// Glyph cell height at size 1
    pub const CHAR_H: i32 = 8;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Op {
        Fill(u16),
        Pixel(i32, i32, u16),
        Line(i32, i32, i32, i32, u16),
        Rect(i32, i32, i32, i32, u16),
        FillRect(i32, i32, i32, i32, u16),
        RoundRect(i32, i32, i32, i32, i32, u16),
        FillRoundRect(i32, i32, i32, i32, i32, u16),
        Circle(i32, i32, i32, u16),
        FillCircle(i32, i32, i32, u16),
        Arc(i32, i32, i32, i32, u16),
        FillArc(i32, i32, i32, i32, u16),
        Triangle(Vec2i, Vec2i, Vec2i, u16),
        FillTriangle(Vec2i, Vec2i, Vec2i, u16),
        Text(String, i32, i32, u16, u8),
    }

    pub struct RecordingCanvas {
        pub width: i32,
        pub height: i32,
        pub ops: Vec<Op>,
    }

    impl RecordingCanvas {
        pub fn new(width: i32, height: i32) -> Self {
            Self {
                width,
                height,
                ops: Vec::new(),
            }
        }

        pub fn texts(&self) -> Vec<&str> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Text(text, ..) => Some(text.as_str()),
                    _ => None,
                })
                .collect()
        }
    }

    impl Canvas for RecordingCanvas {
        fn size(&self) -> (i32, i32) {
            (self.width, self.height)
        }

        fn fill_screen(&mut self, color: u16) {
            self.ops.push(Op::Fill(color));
        }

        fn draw_pixel(&mut self, x: i32, y: i32, color: u16) {
            self.ops.push(Op::Pixel(x, y, color));
        }

        fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u16) {
            self.ops.push(Op::Line(x0, y0, x1, y1, color));
        }

        fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u16) {
            self.ops.push(Op::Rect(x, y, w, h, color));
        }

        fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u16) {
            self.ops.push(Op::FillRect(x, y, w, h, color));
        }

        fn draw_round_rect(&mut self, x: i32, y: i32, w: i32, h: i32, r: i32, color: u16) {
            self.ops.push(Op::RoundRect(x, y, w, h, r, color));
        }

        fn fill_round_rect(&mut self, x: i32, y: i32, w: i32, h: i32, r: i32, color: u16) {
            self.ops.push(Op::FillRoundRect(x, y, w, h, r, color));
        }

        fn draw_circle(&mut self, x: i32, y: i32, r: i32, color: u16) {
            self.ops.push(Op::Circle(x, y, r, color));
        }

        fn fill_circle(&mut self, x: i32, y: i32, r: i32, color: u16) {
            self.ops.push(Op::FillCircle(x, y, r, color));
        }

        fn draw_arc(&mut self, x: i32, y: i32, outer: i32, inner: i32, _: f32, _: f32, c: u16) {
            self.ops.push(Op::Arc(x, y, outer, inner, c));
        }

        fn fill_arc(&mut self, x: i32, y: i32, outer: i32, inner: i32, _: f32, _: f32, c: u16) {
            self.ops.push(Op::FillArc(x, y, outer, inner, c));
        }

        fn draw_triangle(&mut self, p0: Vec2i, p1: Vec2i, p2: Vec2i, color: u16) {
            self.ops.push(Op::Triangle(p0, p1, p2, color));
        }

        fn fill_triangle(&mut self, p0: Vec2i, p1: Vec2i, p2: Vec2i, color: u16) {
            self.ops.push(Op::FillTriangle(p0, p1, p2, color));
        }

        fn draw_text(&mut self, text: &str, x: i32, y: i32, color: u16, size: u8) {
            self.ops.push(Op::Text(text.into(), x, y, color, size));
        }

        fn text_width(&self, text: &str, size: u8) -> i32 {
            text.chars().count() as i32 * CHAR_W * size as i32
        }

        fn font_height(&self, size: u8) -> i32 {
            CHAR_H * size as i32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::{Op, RecordingCanvas};
    use super::*;

    #[test]
    fn test_bezier_endpoints() {
        let mut canvas = RecordingCanvas::new(100, 100);
        canvas.draw_bezier3(Vec2i::new(0, 0), Vec2i::new(50, 100), Vec2i::new(100, 0), 1);

        assert_eq!(canvas.ops.len(), BEZIER_SEGMENTS as usize);
        assert_eq!(canvas.ops.first(), Some(&Op::Line(0, 0, 4, 8, 1)));
        match canvas.ops.last() {
            Some(Op::Line(_, _, x1, y1, _)) => assert_eq!((*x1, *y1), (100, 0)),
            other => panic!("unexpected op {:?}", other),
        }
    }

    #[test]
    fn test_push_sprite_rows() {
        let mut canvas = RecordingCanvas::new(10, 10);
        canvas.push_sprite(5, 5, 2, 2, &[1, 2, 3, 4]);
        assert_eq!(
            canvas.ops,
            [
                Op::Pixel(5, 5, 1),
                Op::Pixel(6, 5, 2),
                Op::Pixel(5, 6, 3),
                Op::Pixel(6, 6, 4),
            ]
        );
    }

    #[test]
    fn test_push_sprite_scaled_blocks() {
        let mut canvas = RecordingCanvas::new(10, 10);
        canvas.push_sprite_scaled(0, 0, 2, 1, &[7, 8], 2.0, 3.0);
        assert_eq!(
            canvas.ops,
            [Op::FillRect(0, 0, 2, 3, 7), Op::FillRect(2, 0, 2, 3, 8)]
        );
    }
}
