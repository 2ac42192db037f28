//! Board constants
//!
//! Pinout (RP2040):
//!
//! | Signal        | GPIO |
//! |---------------|------|
//! | LCD SCK       | 18   |
//! | LCD MOSI      | 19   |
//! | LCD CS        | 17   |
//! | LCD DC        | 16   |
//! | LCD RST       | 20   |
//! | LCD backlight | 21   |
//! | I2C0 SDA      | 4    |
//! | I2C0 SCL      | 5    |
//! | Button A      | 13   |
//! | Button B      | 14   |
//! | Button C      | 15   |
//!
//! Touch (FT6336) and IMU (MPU6886) share I2C0.

use kairos_drivers::display::{Orientation, St7789Config};
use kairos_drivers::imu::Mpu6886Config;
use kairos_drivers::touch::Ft6336Config;

pub const LCD_WIDTH: u16 = 320;
pub const LCD_HEIGHT: u16 = 240;
pub const FRAME_PIXELS: usize = LCD_WIDTH as usize * LCD_HEIGHT as usize;

/// ST7789 write clock
pub const LCD_SPI_HZ: u32 = 62_500_000;
pub const I2C_HZ: u32 = 400_000;

/// Pixels reserved for the demo sprite
pub const SPRITE_PIXELS: usize = 32 * 32;

pub fn lcd_config() -> St7789Config {
    St7789Config {
        width: LCD_WIDTH,
        height: LCD_HEIGHT,
        orientation: Orientation::Landscape,
        invert: true,
        ..St7789Config::default()
    }
}

pub fn touch_config() -> Ft6336Config {
    Ft6336Config {
        width: LCD_WIDTH,
        height: LCD_HEIGHT,
        ..Ft6336Config::default()
    }
}

pub fn imu_config() -> Mpu6886Config {
    Mpu6886Config::default()
}
