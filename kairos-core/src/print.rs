//! Line-oriented debug text overlay
//!
//! Text written here accumulates until cleared and is drawn over the frame
//! from the top-left corner just before each blit.

use core::fmt::{self, Write};

use heapless::String;

use crate::canvas::Canvas;
use crate::color::Color;

/// Capacity of the print buffer in bytes
pub const PRINT_CAPACITY: usize = 512;

/// Accumulated print text
///
/// Writes past the capacity are truncated at a character boundary.
#[derive(Debug, Clone, Default)]
pub struct PrintBuffer {
    text: String<PRINT_CAPACITY>,
    truncated: bool,
}

impl PrintBuffer {
    pub const fn new() -> Self {
        Self {
            text: String::new(),
            truncated: false,
        }
    }

    /// Append `args` followed by a newline
    pub fn println(&mut self, args: fmt::Arguments<'_>) {
        // Overflow is recorded in `truncated`
        let _ = self.write_fmt(args);
        let _ = self.write_str("\n");
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.truncated = false;
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether any text was dropped since the last clear
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Draw each line below the previous one, starting at the top-left
    pub fn draw(&self, canvas: &mut impl Canvas, color: Color, size: u8) {
        if self.text.is_empty() {
            return;
        }

        let line_height = canvas.font_height(size);
        let color = color.to_rgb565();
        for (row, line) in self.text.lines().enumerate() {
            if !line.is_empty() {
                canvas.draw_text(line, 0, row as i32 * line_height, color, size);
            }
        }
    }
}

impl Write for PrintBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if self.text.push(c).is_err() {
                self.truncated = true;
                return Err(fmt::Error);
            }
        }
        Ok(())
    }
}
