//! Named color constants

use crate::color::Color;

// Basic colors
pub const BLACK: Color = Color::new(0, 0, 0);
pub const WHITE: Color = Color::new(255, 255, 255);
pub const RED: Color = Color::new(255, 0, 0);
pub const GREEN: Color = Color::new(0, 128, 0);
pub const BLUE: Color = Color::new(0, 0, 255);
pub const YELLOW: Color = Color::new(255, 255, 0);
pub const MAGENTA: Color = Color::new(255, 0, 255);
pub const CYAN: Color = Color::new(0, 255, 255);

// Gray shades
pub const DIMGRAY: Color = Color::new(105, 105, 105);
pub const GRAY: Color = Color::new(128, 128, 128);
pub const DARKGRAY: Color = Color::new(169, 169, 169);
pub const SILVER: Color = Color::new(192, 192, 192);
pub const LIGHTGRAY: Color = Color::new(211, 211, 211);
pub const GAINSBORO: Color = Color::new(220, 220, 220);
pub const WHITESMOKE: Color = Color::new(245, 245, 245);

// Warm colors
pub const ORANGE: Color = Color::new(255, 165, 0);
pub const DARKORANGE: Color = Color::new(255, 140, 0);
pub const CORAL: Color = Color::new(255, 127, 80);
pub const TOMATO: Color = Color::new(255, 99, 71);
pub const ORANGERED: Color = Color::new(255, 69, 0);
pub const CRIMSON: Color = Color::new(220, 20, 60);
pub const FIREBRICK: Color = Color::new(178, 34, 34);
pub const DARKRED: Color = Color::new(139, 0, 0);
pub const MAROON: Color = Color::new(128, 0, 0);

// Cool colors
pub const NAVY: Color = Color::new(0, 0, 128);
pub const DARKBLUE: Color = Color::new(0, 0, 139);
pub const MEDIUMBLUE: Color = Color::new(0, 0, 205);
pub const ROYALBLUE: Color = Color::new(65, 105, 225);
pub const STEELBLUE: Color = Color::new(70, 130, 180);
pub const DEEPSKYBLUE: Color = Color::new(0, 191, 255);
pub const DODGERBLUE: Color = Color::new(30, 144, 255);
pub const CORNFLOWERBLUE: Color = Color::new(100, 149, 237);

// Green shades
pub const DARKGREEN: Color = Color::new(0, 100, 0);
pub const FORESTGREEN: Color = Color::new(34, 139, 34);
pub const SEAGREEN: Color = Color::new(46, 139, 87);
pub const LIMEGREEN: Color = Color::new(50, 205, 50);
pub const SPRINGGREEN: Color = Color::new(0, 255, 127);
pub const LIME: Color = Color::new(0, 255, 0);

// Purple shades
pub const INDIGO: Color = Color::new(75, 0, 130);
pub const PURPLE: Color = Color::new(128, 0, 128);
pub const DARKMAGENTA: Color = Color::new(139, 0, 139);
pub const DARKVIOLET: Color = Color::new(148, 0, 211);
pub const DARKORCHID: Color = Color::new(153, 50, 204);
pub const BLUEVIOLET: Color = Color::new(138, 43, 226);

// Special colors
pub const DEFAULT_LETTERBOX: Color = Color::new(1, 2, 3);
pub const DEFAULT_BACKGROUND: Color = Color::new(11, 22, 33);
