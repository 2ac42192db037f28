//! Immediate-mode widgets
//!
//! Each widget draws itself into the frame and reports interaction in the
//! same call. Nothing is retained between frames: the visual state is
//! recomputed from the touch snapshot every time, and the only thing a
//! widget changes is the value the caller passes in.

use crate::canvas::Canvas;
use crate::color::Color;
use crate::font::{Font, HorizontalAlign, VerticalAlign};
use crate::frame::Frame;
use crate::input::Touch;
use crate::math::Vec2i;
use crate::palette;
use crate::shapes::{Circle, Line, Rect, TouchTarget};

const BUTTON_CORNER_RADIUS: i32 = 4;
const CHECKBOX_CORNER_RADIUS: i32 = 2;
const SLIDER_TRACK_HEIGHT: i32 = 6;

/// Default label column of [`slider_labeled`]
pub const DEFAULT_LABEL_WIDTH: i32 = 80;

const DISABLED_FRAME: Color = Color::new(160, 160, 160);
const TRACK_COLOR: Color = Color::new(220, 220, 220);
const TRACK_FRAME: Color = Color::new(180, 180, 180);
const DISABLED_THUMB: Color = Color::new(240, 240, 240);

/// Widget metrics and colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Style {
    pub font_size: u8,
    pub padding: i32,
    pub margin: i32,
    /// Height of a widget row
    pub height: i32,
    /// Default widget width
    pub width: i32,
    pub text_color: Color,
    pub background_color: Color,
    pub active_color: Color,
    pub disabled_color: Color,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            font_size: 2,
            padding: 4,
            margin: 4,
            height: 24,
            width: 120,
            text_color: palette::BLACK,
            background_color: palette::WHITE,
            active_color: Color::new(0, 120, 215),
            disabled_color: Color::new(200, 200, 200),
        }
    }
}

impl Style {
    fn label_font(&self, h_align: HorizontalAlign) -> Font {
        Font::new(self.font_size)
            .with_horizontal_align(h_align)
            .with_vertical_align(VerticalAlign::Center)
    }

    fn label_color(&self, enabled: bool) -> Color {
        if enabled {
            self.text_color
        } else {
            self.disabled_color
        }
    }
}

/// Visual state of a widget for the current frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WidgetState {
    Idle,
    /// Touch is over the widget but not pressed
    Hover,
    /// Touch is held on the widget
    Active,
    Disabled,
}

impl WidgetState {
    pub fn of(target: &impl TouchTarget, touch: &Touch, enabled: bool) -> Self {
        if !enabled {
            WidgetState::Disabled
        } else if target.pressed(touch) {
            WidgetState::Active
        } else if target.touch_over(touch) {
            WidgetState::Hover
        } else {
            WidgetState::Idle
        }
    }
}

pub fn button_region(style: &Style, pos: Vec2i, width: i32) -> Rect {
    Rect::new(pos.x, pos.y, width, style.height)
}

pub fn slider_region(style: &Style, pos: Vec2i, width: i32) -> Rect {
    Rect::new(pos.x, pos.y, width, style.height)
}

pub fn checkbox_region(style: &Style, pos: Vec2i) -> Rect {
    Rect::new(pos.x, pos.y, style.height, style.height)
}

/// Hit area of the `index`-th radio button of a group at `pos`
pub fn radio_button_region(style: &Style, pos: Vec2i, index: usize) -> Rect {
    Rect::new(
        pos.x,
        pos.y + index as i32 * (style.height + style.margin),
        style.height,
        style.height,
    )
}

/// Push button
///
/// Returns true in the frame the touch is lifted over an enabled button.
pub fn button<C: Canvas>(
    frame: &mut Frame<'_, C>,
    label: &str,
    pos: Vec2i,
    width: i32,
    enabled: bool,
) -> bool {
    let (style, touch) = (frame.style, frame.input.touch());
    let canvas = &mut *frame.canvas;
    let region = button_region(style, pos, width);

    let state = WidgetState::of(&region, touch, enabled);
    let (fill, outline) = match state {
        WidgetState::Active => (style.active_color, style.text_color),
        WidgetState::Hover => (
            style.background_color.lerp(style.active_color, 0.5),
            style.text_color,
        ),
        WidgetState::Idle => (style.background_color, style.text_color),
        WidgetState::Disabled => (style.disabled_color, DISABLED_FRAME),
    };
    region.draw_round(canvas, BUTTON_CORNER_RADIUS, fill);
    region.draw_round_frame(canvas, BUTTON_CORNER_RADIUS, outline);

    style.label_font(HorizontalAlign::Center).draw(
        canvas,
        label,
        pos.x + width / 2,
        pos.y + style.height / 2,
        style.label_color(enabled),
    );

    enabled && region.released(touch)
}

/// Horizontal slider over `min..=max`
///
/// While the touch is held on the slider `value` follows the touch X
/// position. Returns true when `value` was written.
pub fn slider<C: Canvas>(
    frame: &mut Frame<'_, C>,
    value: &mut f32,
    pos: Vec2i,
    min: f32,
    max: f32,
    width: i32,
    enabled: bool,
) -> bool {
    let (style, touch) = (frame.style, frame.input.touch());
    let canvas = &mut *frame.canvas;
    let region = slider_region(style, pos, width);

    region.draw_round(canvas, BUTTON_CORNER_RADIUS, style.background_color);
    region.draw_round_frame(canvas, BUTTON_CORNER_RADIUS, style.text_color);

    let track_x = pos.x + style.padding;
    let track_y = pos.y + (style.height - SLIDER_TRACK_HEIGHT) / 2;
    let track_w = width - style.padding * 2;
    let track = Rect::new(track_x, track_y, track_w, SLIDER_TRACK_HEIGHT);

    // Drawn from the value on entry; a drag shows up next frame
    let normalized = ((*value - min) / (max - min)).clamp(0.0, 1.0);
    let thumb_x = track_x + (normalized * (track_w - style.height / 2) as f32) as i32;
    let thumb = Circle::new(
        thumb_x + style.height / 4,
        pos.y + style.height / 2,
        style.height / 3,
    );

    if !enabled {
        track.draw_round(canvas, BUTTON_CORNER_RADIUS, style.disabled_color);
        track.draw_round_frame(canvas, BUTTON_CORNER_RADIUS, TRACK_FRAME);
        thumb.draw(canvas, DISABLED_THUMB);
        thumb.draw_frame(canvas, TRACK_FRAME);
        return false;
    }

    track.draw_round(canvas, BUTTON_CORNER_RADIUS, TRACK_COLOR);
    track.draw_round_frame(canvas, BUTTON_CORNER_RADIUS, TRACK_FRAME);

    let active_w = (normalized * track_w as f32) as i32;
    if active_w > 0 {
        Rect::new(track_x, track_y, active_w, SLIDER_TRACK_HEIGHT).draw_round(
            canvas,
            BUTTON_CORNER_RADIUS,
            style.active_color,
        );
    }

    let mut changed = false;
    if region.pressed(touch) && track_w > 0 {
        let t = ((touch.pos().x - track_x) as f32 / track_w as f32).clamp(0.0, 1.0);
        *value = min + (max - min) * t;
        changed = true;
    }

    thumb.draw(canvas, palette::WHITE);
    thumb.draw_frame(canvas, style.text_color);

    changed
}

/// [`slider`] with a text label column in front of it
#[allow(clippy::too_many_arguments)]
pub fn slider_labeled<C: Canvas>(
    frame: &mut Frame<'_, C>,
    label: &str,
    value: &mut f32,
    pos: Vec2i,
    min: f32,
    max: f32,
    label_width: i32,
    slider_width: i32,
    enabled: bool,
) -> bool {
    let style = frame.style;
    let canvas = &mut *frame.canvas;
    let background = Rect::new(
        pos.x,
        pos.y,
        label_width + style.margin + slider_width,
        style.height,
    );
    background.draw_round(canvas, BUTTON_CORNER_RADIUS, style.background_color);
    background.draw_round_frame(canvas, BUTTON_CORNER_RADIUS, style.text_color);

    style.label_font(HorizontalAlign::Left).draw(
        canvas,
        label,
        pos.x + style.padding,
        pos.y + style.height / 2,
        style.label_color(enabled),
    );

    let slider_pos = Vec2i::new(pos.x + label_width + style.margin, pos.y);
    slider(frame, value, slider_pos, min, max, slider_width, enabled)
}

/// Check box with a label; toggles when the touch is lifted over the box
pub fn checkbox<C: Canvas>(
    frame: &mut Frame<'_, C>,
    checked: &mut bool,
    label: &str,
    pos: Vec2i,
    width: i32,
    enabled: bool,
) -> bool {
    let (style, touch) = (frame.style, frame.input.touch());
    let canvas = &mut *frame.canvas;
    let r = CHECKBOX_CORNER_RADIUS;

    let background = Rect::new(pos.x, pos.y, width, style.height);
    background.draw_round(canvas, r, style.background_color);
    background.draw_round_frame(canvas, r, style.text_color);

    let region = checkbox_region(style, pos);
    let inner = Rect::new(pos.x + 4, pos.y + 4, style.height - 8, style.height - 8);
    let mut changed = false;

    if enabled {
        region.draw_round_frame(canvas, r, style.text_color);
        if *checked {
            inner.draw_round(canvas, r, style.active_color);

            let cx = pos.x + style.height / 2;
            let cy = pos.y + style.height / 2;
            Line::new(cx - 5, cy, cx - 2, cy + 3).draw(canvas, palette::WHITE);
            Line::new(cx - 2, cy + 3, cx + 4, cy - 4).draw(canvas, palette::WHITE);
        }

        if region.released(touch) {
            *checked = !*checked;
            changed = true;
        }
    } else {
        region.draw_round_frame(canvas, r, style.disabled_color);
        if *checked {
            inner.draw_round(canvas, r, style.disabled_color);
        }
    }

    style.label_font(HorizontalAlign::Left).draw(
        canvas,
        label,
        pos.x + style.height + style.margin,
        pos.y + style.height / 2,
        style.label_color(enabled),
    );

    changed
}

/// Vertical group of mutually exclusive options
///
/// Returns true when `index` was changed.
pub fn radio_buttons<C: Canvas>(
    frame: &mut Frame<'_, C>,
    index: &mut usize,
    options: &[&str],
    pos: Vec2i,
    width: i32,
    enabled: bool,
) -> bool {
    if options.is_empty() {
        return false;
    }

    let (style, touch) = (frame.style, frame.input.touch());
    let canvas = &mut *frame.canvas;

    let count = options.len() as i32;
    let total_height = count * style.height + (count - 1) * style.margin;
    let background = Rect::new(pos.x, pos.y, width, total_height);
    background.draw_round(canvas, BUTTON_CORNER_RADIUS, style.background_color);
    background.draw_round_frame(canvas, BUTTON_CORNER_RADIUS, style.text_color);

    let (ring, dot) = if enabled {
        (style.text_color, style.active_color)
    } else {
        (style.disabled_color, style.disabled_color)
    };

    let mut changed = false;
    for (i, option) in options.iter().enumerate() {
        let region = radio_button_region(style, pos, i);
        let center = region.pos() + Vec2i::new(region.h / 2, region.h / 2);

        Circle::new(center.x, center.y, region.h / 2 - 2).draw_frame(canvas, ring);
        if i == *index {
            Circle::new(center.x, center.y, region.h / 4 - 2).draw(canvas, dot);
        }

        if enabled && region.released(touch) {
            *index = i;
            changed = true;
        }

        style.label_font(HorizontalAlign::Left).draw(
            canvas,
            option,
            region.x + style.height + style.margin,
            region.y + style.height / 2,
            style.label_color(enabled),
        );
    }

    changed
}
