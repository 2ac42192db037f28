//! Demo sketch
//!
//! Exercises the whole surface of the library once per frame: shapes that
//! follow the touch point, the widget set, the print overlay, a sprite and
//! the attitude estimate.

use kairos_core::canvas::Surface;
use kairos_core::color::Color;
use kairos_core::font::{Font, HorizontalAlign, VerticalAlign};
use kairos_core::gui;
use kairos_core::image::Image;
use kairos_core::math::{wrap, Vec2i};
use kairos_core::palette;
use kairos_core::shapes::{Bezier3, Circle, Rect, TouchTarget, Triangle};
use kairos_core::System;
use kairos_hal::{ButtonId, Clock, InputHardware};

const SPRITE_SIDE: i32 = 32;
const SHAPES: [&str; 3] = ["Circle", "Rect", "Tri"];

pub struct Demo<'a> {
    sprite: Image<'a>,
    level: f32,
    show_horizon: bool,
    shape: usize,
    hue: f32,
    taps: u32,
}

impl<'a> Demo<'a> {
    pub fn new(sprite_pixels: &'a mut [u16]) -> Self {
        let mut sprite = Image::new(sprite_pixels);
        if sprite.create(SPRITE_SIDE, SPRITE_SIDE, palette::BLACK).is_ok() {
            for (i, px) in sprite.pixels_mut().iter_mut().enumerate() {
                let x = (i as i32 % SPRITE_SIDE) as u8;
                let y = (i as i32 / SPRITE_SIDE) as u8;
                *px = Color::new(x * 8, y * 8, 160).to_rgb565();
            }
        } else {
            defmt::warn!("Sprite buffer too small");
        }

        Self {
            sprite,
            level: 50.0,
            show_horizon: true,
            shape: 0,
            hue: 200.0,
            taps: 0,
        }
    }

    /// Draw one frame; call when `System::is_new_frame` is set
    pub fn run<C, S, H>(&mut self, system: &mut System<C, S, H>)
    where
        C: Clock,
        S: Surface,
        H: InputHardware,
    {
        let input = system.input();
        if input.button(ButtonId::A).was_pressed() {
            self.hue = wrap(self.hue + 40.0, 0.0, 360.0);
            system.set_background_color(Color::from_hsv(self.hue, 0.5, 0.25));
        }
        if system.input().button(ButtonId::C).pressed_for(1000) {
            self.level = 50.0;
        }

        let angles = system.angles();
        let (fps, frames) = (system.fps(), system.frame_count());
        system.clear_print();
        system.println(format_args!("{:.0} fps  #{}", fps, frames));
        system.println(format_args!(
            "r {:.0} p {:.0} y {:.0}",
            angles.roll, angles.pitch, angles.yaw
        ));

        let width = system.width();
        let height = system.height();
        let mut frame = system.frame();

        if self.show_horizon {
            let tilt = (angles.roll * 2.0) as i32;
            gauge(&mut frame, Vec2i::new(width / 2, 64), tilt, self.level);
        }

        let touch = *frame.touch();
        if touch.pressed() {
            let p = touch.pos();
            let color = Color::from_hsv(self.hue, 1.0, 1.0);
            match self.shape {
                0 => Circle::new(p.x, p.y, 20).draw(frame.canvas, color),
                1 => Rect::new(p.x - 20, p.y - 20, 40, 40).draw(frame.canvas, color),
                _ => Triangle::new(p.x, p.y - 24, p.x - 22, p.y + 16, p.x + 22, p.y + 16)
                    .draw(frame.canvas, color),
            }
        }

        let sprite_area = Rect::new(width - 2 * SPRITE_SIDE - 8, 8, 2 * SPRITE_SIDE, 2 * SPRITE_SIDE);
        self.sprite
            .draw_scaled(frame.canvas, sprite_area.x, sprite_area.y, 2.0, 2.0);
        if sprite_area.touched(&touch) {
            self.taps += 1;
        }

        let left = 8;
        let row = frame.style.height + frame.style.margin;
        let mut y = height - 4 * row - 8;

        gui::slider_labeled(
            &mut frame,
            "Level",
            &mut self.level,
            Vec2i::new(left, y),
            0.0,
            100.0,
            gui::DEFAULT_LABEL_WIDTH,
            140,
            true,
        );
        y += row;

        gui::checkbox(
            &mut frame,
            &mut self.show_horizon,
            "Horizon",
            Vec2i::new(left, y),
            140,
            true,
        );
        gui::radio_buttons(
            &mut frame,
            &mut self.shape,
            &SHAPES,
            Vec2i::new(left + 160, y),
            100,
            true,
        );
        y += row;

        if gui::button(&mut frame, "Reset", Vec2i::new(left, y), 100, self.taps > 0) {
            self.taps = 0;
            defmt::info!("Sprite taps reset");
        }

        Font::new(1)
            .with_horizontal_align(HorizontalAlign::Right)
            .with_vertical_align(VerticalAlign::Bottom)
            .draw(
                frame.canvas,
                "kairos",
                width - 4,
                height - 4,
                palette::LIGHTGRAY,
            );
    }
}

/// Tilting horizon line inside a ring whose fill tracks `level` (0..=100)
fn gauge<C: kairos_core::Canvas>(
    frame: &mut kairos_core::Frame<'_, C>,
    center: Vec2i,
    tilt: i32,
    level: f32,
) {
    let ring = Circle::new(center.x, center.y, 48);
    ring.draw_arc(frame.canvas, 8, 0.0, 360.0, palette::DIMGRAY);
    ring.fill_arc(
        frame.canvas,
        8,
        -90.0,
        -90.0 + 3.6 * level,
        palette::ORANGE,
    );

    let from = Vec2i::new(center.x - 36, center.y + tilt);
    let to = Vec2i::new(center.x + 36, center.y - tilt);
    let bend = Vec2i::new(center.x, center.y - 12);
    Bezier3::new(from, bend, to).draw(frame.canvas, palette::WHITE);
}
