//! Kairos demo firmware
//!
//! Runs the demo sketch on an RP2040 board with an ST7789 panel, an FT6336
//! touch controller, an MPU6886 IMU and three push buttons.
//!
//! The whole program is one embassy task: `System::update` paces the loop
//! and blocks between frames.

#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_rp::spi::{self, Spi};
use embassy_time::Delay;
use embedded_hal::delay::DelayNs;
use embedded_hal_bus::i2c::RefCellDevice;
use embedded_hal_bus::spi::ExclusiveDevice;
use static_cell::{ConstStaticCell, StaticCell};
use {defmt_rtt as _, panic_probe as _};

use kairos_core::config::SystemConfig;
use kairos_core::System;
use kairos_display::FrameBuffer;
use kairos_drivers::display::St7789;
use kairos_drivers::imu::Mpu6886;
use kairos_drivers::touch::Ft6336;
use kairos_drivers::{BoardInput, GpioButton};

use crate::board::{FRAME_PIXELS, SPRITE_PIXELS};
use crate::clock::EmbassyClock;
use crate::demo::Demo;

mod board;
mod clock;
mod demo;

type I2cBus = I2c<'static, I2C0, i2c::Blocking>;

// Off-screen frame (150 KiB) and sprite storage
static FRAME: ConstStaticCell<[u16; FRAME_PIXELS]> = ConstStaticCell::new([0; FRAME_PIXELS]);
static SPRITE: ConstStaticCell<[u16; SPRITE_PIXELS]> = ConstStaticCell::new([0; SPRITE_PIXELS]);

// Touch and IMU share I2C0
static I2C_BUS: StaticCell<RefCell<I2cBus>> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Kairos firmware starting...");

    let p = embassy_rp::init(Default::default());
    let mut delay = Delay;

    // Panel reset and backlight
    let mut lcd_rst = Output::new(p.PIN_20, Level::Low);
    let _backlight = Output::new(p.PIN_21, Level::High);
    delay.delay_ms(10);
    lcd_rst.set_high();
    delay.delay_ms(120);

    // ST7789 on SPI0 (write-only)
    let mut spi_config = spi::Config::default();
    spi_config.frequency = board::LCD_SPI_HZ;
    let spi_bus = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, spi_config);
    let lcd_cs = Output::new(p.PIN_17, Level::High);
    let lcd_dc = Output::new(p.PIN_16, Level::Low);
    let spi_dev = unwrap!(ExclusiveDevice::new_no_delay(spi_bus, lcd_cs));

    let mut lcd = St7789::new(spi_dev, lcd_dc, board::lcd_config());
    if let Err(e) = lcd.init(&mut delay) {
        error!("Panel init failed: {:?}", Debug2Format(&e));
    }

    // Touch and IMU on I2C0
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = board::I2C_HZ;
    let i2c_bus = I2C_BUS.init(RefCell::new(I2c::new_blocking(
        p.I2C0, p.PIN_5, p.PIN_4, i2c_config,
    )));

    let mut touch = Ft6336::new(RefCellDevice::new(i2c_bus), board::touch_config());
    let touch = match touch.init() {
        Ok(()) => Some(touch),
        Err(e) => {
            warn!("No touch panel: {:?}", Debug2Format(&e));
            None
        }
    };

    let mut imu = Mpu6886::new(RefCellDevice::new(i2c_bus), board::imu_config());
    let imu = match imu.init(&mut delay) {
        Ok(()) => Some(imu),
        Err(e) => {
            warn!("No IMU: {:?}", Debug2Format(&e));
            None
        }
    };

    // Buttons to ground, A/B/C
    let buttons = [
        GpioButton::new_active_low(Input::new(p.PIN_13, Pull::Up)),
        GpioButton::new_active_low(Input::new(p.PIN_14, Pull::Up)),
        GpioButton::new_active_low(Input::new(p.PIN_15, Pull::Up)),
    ];
    let hardware = BoardInput::new(buttons, touch, imu);

    let surface = unwrap!(FrameBuffer::new(FRAME.take(), lcd));

    let config = SystemConfig {
        text_size: 1,
        ..SystemConfig::default()
    };
    let mut system = unwrap!(System::new(config, EmbassyClock, surface, hardware));
    let mut demo = Demo::new(SPRITE.take());

    info!(
        "Frame loop running ({}x{}, {} ms)",
        system.width(),
        system.height(),
        config.frame_interval_ms
    );

    while system.update() {
        if !system.is_new_frame() {
            continue;
        }

        demo.run(&mut system);

        if system.frame_count() % 600 == 0 {
            debug!(
                "{} frames, {} fps, {} present failures",
                system.frame_count(),
                system.fps(),
                system.present_failures()
            );
        }
    }
}
