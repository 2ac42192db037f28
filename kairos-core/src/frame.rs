//! Per-frame drawing context

use crate::canvas::Canvas;
use crate::gui::Style;
use crate::input::{InputSnapshot, Touch};

/// Everything user code needs between two committed frames
///
/// Borrowed from [`System::frame`](crate::system::System::frame). The
/// canvas is written to, the input snapshot and style are read-only.
pub struct Frame<'a, C: Canvas> {
    pub canvas: &'a mut C,
    pub input: &'a InputSnapshot,
    pub style: &'a Style,
}

impl<'a, C: Canvas> Frame<'a, C> {
    pub fn new(canvas: &'a mut C, input: &'a InputSnapshot, style: &'a Style) -> Self {
        Self {
            canvas,
            input,
            style,
        }
    }

    pub fn touch(&self) -> &Touch {
        self.input.touch()
    }
}
