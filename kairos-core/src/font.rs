//! Aligned text drawing

use crate::canvas::Canvas;
use crate::color::Color;
use crate::shapes::Rect;

/// Horizontal anchor of the draw position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HorizontalAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical anchor of the draw position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VerticalAlign {
    Top,
    Center,
    Bottom,
    /// Draw position is the glyph cell origin
    #[default]
    Baseline,
}

/// Text style: alignment plus integer scale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Font {
    pub h_align: HorizontalAlign,
    pub v_align: VerticalAlign,
    pub size: u8,
}

impl Default for Font {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Font {
    pub const fn new(size: u8) -> Self {
        Self {
            h_align: HorizontalAlign::Left,
            v_align: VerticalAlign::Baseline,
            size,
        }
    }

    pub const fn with_horizontal_align(mut self, align: HorizontalAlign) -> Self {
        self.h_align = align;
        self
    }

    pub const fn with_vertical_align(mut self, align: VerticalAlign) -> Self {
        self.v_align = align;
        self
    }

    pub const fn with_size(mut self, size: u8) -> Self {
        self.size = size;
        self
    }

    pub fn text_width(&self, canvas: &impl Canvas, text: &str) -> i32 {
        canvas.text_width(text, self.size)
    }

    pub fn text_height(&self, canvas: &impl Canvas) -> i32 {
        canvas.font_height(self.size)
    }

    /// Top-left corner of `text` anchored at (x, y)
    pub fn origin(&self, canvas: &impl Canvas, text: &str, x: i32, y: i32) -> (i32, i32) {
        let ox = match self.h_align {
            HorizontalAlign::Left => x,
            HorizontalAlign::Center => x - self.text_width(canvas, text) / 2,
            HorizontalAlign::Right => x - self.text_width(canvas, text),
        };

        let oy = match self.v_align {
            VerticalAlign::Top | VerticalAlign::Baseline => y,
            VerticalAlign::Center => y - self.text_height(canvas) / 2,
            VerticalAlign::Bottom => y - self.text_height(canvas),
        };

        (ox, oy)
    }

    pub fn draw(&self, canvas: &mut impl Canvas, text: &str, x: i32, y: i32, color: Color) {
        let (ox, oy) = self.origin(canvas, text, x, y);
        canvas.draw_text(text, ox, oy, color.to_rgb565(), self.size);
    }

    /// Bounding box of `text` drawn with its top-left corner at (x, y)
    pub fn region(&self, canvas: &impl Canvas, text: &str, x: i32, y: i32) -> Rect {
        Rect::new(
            x,
            y,
            self.text_width(canvas, text),
            self.text_height(canvas),
        )
    }
}
