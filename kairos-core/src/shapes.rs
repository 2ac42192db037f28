//! Geometric primitives with drawing and touch hit-testing
//!
//! Shapes are plain `Copy` values. They never own a canvas or input state:
//! drawing takes the canvas and hit-testing takes the [`Touch`] of the
//! current frame.

use crate::canvas::Canvas;
use crate::color::Color;
use crate::input::Touch;
use crate::math::Vec2i;

/// Absolute tolerance of the triangle area test
const TRIANGLE_EPSILON: f32 = 0.1;

/// Anything that can be hit-tested against a touch point
///
/// The touch predicates test containment at the latest touch position
/// only. In particular [`released`](TouchTarget::released) accepts a touch
/// that began outside the shape and was dragged in before lifting.
pub trait TouchTarget {
    fn contains(&self, point: Vec2i) -> bool;

    /// Touch position is over the shape, pressed or not
    fn touch_over(&self, touch: &Touch) -> bool {
        self.contains(touch.pos())
    }

    /// Touch began inside the shape this frame
    fn touched(&self, touch: &Touch) -> bool {
        touch.down() && self.contains(touch.pos())
    }

    /// Touch ended inside the shape this frame
    fn released(&self, touch: &Touch) -> bool {
        touch.up() && self.contains(touch.pos())
    }

    /// Touch is held inside the shape
    fn pressed(&self, touch: &Touch) -> bool {
        touch.pressed() && self.contains(touch.pos())
    }
}

/// Circle given by centre and radius
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Circle {
    pub center: Vec2i,
    pub r: i32,
}

impl Circle {
    pub const fn new(x: i32, y: i32, r: i32) -> Self {
        Self {
            center: Vec2i::new(x, y),
            r,
        }
    }

    pub fn draw(&self, canvas: &mut impl Canvas, color: Color) {
        canvas.fill_circle(self.center.x, self.center.y, self.r, color.to_rgb565());
    }

    pub fn draw_frame(&self, canvas: &mut impl Canvas, color: Color) {
        canvas.draw_circle(self.center.x, self.center.y, self.r, color.to_rgb565());
    }

    /// Outline of a `thickness`-wide arc along the rim
    ///
    /// The ring spans radii `r - thickness` to `r`. `thickness` is a width,
    /// not the inner radius that M5GFX-style `drawArc(x, y, r, r1, ...)`
    /// takes; a sketch passing `r1` there should pass `r - r1` here.
    pub fn draw_arc(
        &self,
        canvas: &mut impl Canvas,
        thickness: i32,
        start_deg: f32,
        end_deg: f32,
        color: Color,
    ) {
        canvas.draw_arc(
            self.center.x,
            self.center.y,
            self.r,
            self.inner_radius(thickness),
            start_deg,
            end_deg,
            color.to_rgb565(),
        );
    }

    /// Filled `thickness`-wide arc along the rim
    ///
    /// Same ring as [`draw_arc`](Self::draw_arc): radii `r - thickness`
    /// to `r`, clamped at zero.
    pub fn fill_arc(
        &self,
        canvas: &mut impl Canvas,
        thickness: i32,
        start_deg: f32,
        end_deg: f32,
        color: Color,
    ) {
        canvas.fill_arc(
            self.center.x,
            self.center.y,
            self.r,
            self.inner_radius(thickness),
            start_deg,
            end_deg,
            color.to_rgb565(),
        );
    }

    fn inner_radius(&self, thickness: i32) -> i32 {
        (self.r - thickness).max(0)
    }
}

impl TouchTarget for Circle {
    /// Boundary inclusive
    fn contains(&self, point: Vec2i) -> bool {
        let dx = (point.x - self.center.x) as i64;
        let dy = (point.y - self.center.y) as i64;
        let r = self.r as i64;
        dx * dx + dy * dy <= r * r
    }
}

/// Axis-aligned rectangle given by top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn pos(&self) -> Vec2i {
        Vec2i::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2i {
        Vec2i::new(self.w, self.h)
    }

    pub fn center(&self) -> Vec2i {
        Vec2i::new(self.x + self.w / 2, self.y + self.h / 2)
    }

    pub fn draw(&self, canvas: &mut impl Canvas, color: Color) {
        canvas.fill_rect(self.x, self.y, self.w, self.h, color.to_rgb565());
    }

    pub fn draw_frame(&self, canvas: &mut impl Canvas, color: Color) {
        canvas.draw_rect(self.x, self.y, self.w, self.h, color.to_rgb565());
    }

    /// Filled with rounded corners
    pub fn draw_round(&self, canvas: &mut impl Canvas, radius: i32, color: Color) {
        canvas.fill_round_rect(self.x, self.y, self.w, self.h, radius, color.to_rgb565());
    }

    /// Outline with rounded corners
    pub fn draw_round_frame(&self, canvas: &mut impl Canvas, radius: i32, color: Color) {
        canvas.draw_round_rect(self.x, self.y, self.w, self.h, radius, color.to_rgb565());
    }
}

impl TouchTarget for Rect {
    /// Left and top edges inclusive, right and bottom edges exclusive
    fn contains(&self, point: Vec2i) -> bool {
        let (px, py) = (point.x as i64, point.y as i64);
        let (x, y) = (self.x as i64, self.y as i64);
        px >= x && px < x + self.w as i64 && py >= y && py < y + self.h as i64
    }
}

/// Triangle given by its three corners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Triangle {
    pub p0: Vec2i,
    pub p1: Vec2i,
    pub p2: Vec2i,
}

impl Triangle {
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            p0: Vec2i::new(x0, y0),
            p1: Vec2i::new(x1, y1),
            p2: Vec2i::new(x2, y2),
        }
    }

    pub fn draw(&self, canvas: &mut impl Canvas, color: Color) {
        canvas.fill_triangle(self.p0, self.p1, self.p2, color.to_rgb565());
    }

    pub fn draw_frame(&self, canvas: &mut impl Canvas, color: Color) {
        canvas.draw_triangle(self.p0, self.p1, self.p2, color.to_rgb565());
    }

    /// Unsigned area
    pub fn area(&self) -> f32 {
        area(self.p0, self.p1, self.p2)
    }
}

fn area(a: Vec2i, b: Vec2i, c: Vec2i) -> f32 {
    let (ax, ay) = (a.x as f32, a.y as f32);
    let (bx, by) = (b.x as f32, b.y as f32);
    let (cx, cy) = (c.x as f32, c.y as f32);
    libm::fabsf((ax * (by - cy) + bx * (cy - ay) + cx * (ay - by)) / 2.0)
}

impl TouchTarget for Triangle {
    /// Sub-triangle areas around `point` sum to the whole area
    fn contains(&self, point: Vec2i) -> bool {
        let whole = self.area();
        let parts = area(point, self.p1, self.p2)
            + area(self.p0, point, self.p2)
            + area(self.p0, self.p1, point);
        libm::fabsf(whole - parts) < TRIANGLE_EPSILON
    }
}

/// Line segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Line {
    pub start: Vec2i,
    pub end: Vec2i,
}

impl Line {
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            start: Vec2i::new(x0, y0),
            end: Vec2i::new(x1, y1),
        }
    }

    pub fn draw(&self, canvas: &mut impl Canvas, color: Color) {
        canvas.draw_line(
            self.start.x,
            self.start.y,
            self.end.x,
            self.end.y,
            color.to_rgb565(),
        );
    }
}

/// Quadratic Bézier curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bezier3 {
    pub points: [Vec2i; 3],
}

impl Bezier3 {
    pub const fn new(p0: Vec2i, p1: Vec2i, p2: Vec2i) -> Self {
        Self {
            points: [p0, p1, p2],
        }
    }

    pub fn draw(&self, canvas: &mut impl Canvas, color: Color) {
        let [p0, p1, p2] = self.points;
        canvas.draw_bezier3(p0, p1, p2, color.to_rgb565());
    }
}

/// Cubic Bézier curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bezier4 {
    pub points: [Vec2i; 4],
}

impl Bezier4 {
    pub const fn new(p0: Vec2i, p1: Vec2i, p2: Vec2i, p3: Vec2i) -> Self {
        Self {
            points: [p0, p1, p2, p3],
        }
    }

    pub fn draw(&self, canvas: &mut impl Canvas, color: Color) {
        let [p0, p1, p2, p3] = self.points;
        canvas.draw_bezier4(p0, p1, p2, p3, color.to_rgb565());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::mock::{Op, RecordingCanvas};
    use kairos_hal::TouchSample;

    fn touch_sequence(samples: &[(i32, i32, bool)]) -> Touch {
        let mut touch = Touch::new();
        for &(x, y, pressed) in samples {
            touch.refresh(Some(TouchSample { x, y, pressed }));
        }
        touch
    }

    #[test]
    fn test_rect_half_open() {
        let rect = Rect::new(10, 20, 30, 40);
        assert!(rect.contains(Vec2i::new(10, 20)));
        assert!(rect.contains(Vec2i::new(39, 59)));
        assert!(!rect.contains(Vec2i::new(40, 20)));
        assert!(!rect.contains(Vec2i::new(10, 60)));
        assert!(!rect.contains(Vec2i::new(9, 20)));
    }

    #[test]
    fn test_circle_boundary_inclusive() {
        let circle = Circle::new(0, 0, 5);
        assert!(circle.contains(Vec2i::new(5, 0)));
        assert!(circle.contains(Vec2i::new(3, 4)));
        assert!(!circle.contains(Vec2i::new(4, 4)));
        assert!(!circle.contains(Vec2i::new(6, 0)));
    }

    #[test]
    fn test_circle_large_coordinates() {
        let circle = Circle::new(0, 0, 100_000);
        assert!(circle.contains(Vec2i::new(100_000, 0)));
        assert!(!circle.contains(Vec2i::new(100_000, 1)));
    }

    #[test]
    fn test_triangle_contains() {
        let tri = Triangle::new(0, 0, 10, 0, 0, 10);
        assert!(tri.contains(Vec2i::new(2, 2)));
        assert!(tri.contains(Vec2i::new(0, 0)));
        assert!(tri.contains(Vec2i::new(5, 5)));
        assert!(!tri.contains(Vec2i::new(6, 6)));
        assert!(!tri.contains(Vec2i::new(-1, 0)));
    }

    #[test]
    fn test_touch_predicates() {
        let rect = Rect::new(0, 0, 10, 10);

        let touch = touch_sequence(&[(5, 5, true)]);
        assert!(rect.touched(&touch));
        assert!(rect.pressed(&touch));
        assert!(!rect.released(&touch));

        let touch = touch_sequence(&[(5, 5, true), (5, 5, false)]);
        assert!(rect.released(&touch));
        assert!(!rect.pressed(&touch));
        assert!(rect.touch_over(&touch));
    }

    #[test]
    fn test_drag_out_release_is_rejected() {
        let rect = Rect::new(0, 0, 10, 10);
        let touch = touch_sequence(&[(5, 5, true), (50, 50, true), (50, 50, false)]);
        assert!(!rect.released(&touch));
    }

    #[test]
    fn test_draw_converts_color() {
        let mut canvas = RecordingCanvas::new(100, 100);
        Circle::new(1, 2, 3).draw(&mut canvas, Color::new(255, 0, 0));
        Rect::new(1, 2, 3, 4).draw_round_frame(&mut canvas, 2, Color::new(0, 0, 255));
        Circle::new(50, 50, 10).fill_arc(&mut canvas, 4, 0.0, 90.0, Color::new(0, 0, 0));

        assert_eq!(
            canvas.ops,
            [
                Op::FillCircle(1, 2, 3, 0xF800),
                Op::RoundRect(1, 2, 3, 4, 2, 0x001F),
                Op::FillArc(50, 50, 10, 6, 0),
            ]
        );
    }

    #[test]
    fn test_arc_thickness_is_width_from_rim() {
        let mut canvas = RecordingCanvas::new(100, 100);
        let ring = Circle::new(20, 20, 12);

        // Inner radius 8 expressed as a width
        ring.draw_arc(&mut canvas, 12 - 8, 0.0, 90.0, Color::new(0, 0, 0));
        // Wider than the radius fills to the centre
        ring.fill_arc(&mut canvas, 40, 0.0, 90.0, Color::new(0, 0, 0));

        assert_eq!(canvas.ops, [Op::Arc(20, 20, 12, 8, 0), Op::FillArc(20, 20, 12, 0, 0)]);
    }
}
