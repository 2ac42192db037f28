//! FT6336 capacitive touch controller (I2C)
//!
//! Polled in its default mode: each read fetches the touch count and the
//! first contact's coordinates in one burst starting at TD_STATUS.
//!
//! While no finger is down the last contact position is reported with
//! `pressed == false`, so a release carries the position it happened at.

use embedded_hal::i2c::I2c;
use kairos_hal::TouchSample;

use super::TouchSensor;
use crate::error::Error;

/// Fixed 7-bit I2C address
pub const ADDRESS: u8 = 0x38;

/// FT6336 registers
#[allow(dead_code)]
pub mod reg {
    pub const DEV_MODE: u8 = 0x00;
    pub const TD_STATUS: u8 = 0x02;
    pub const P1_XH: u8 = 0x03;
    pub const P1_XL: u8 = 0x04;
    pub const P1_YH: u8 = 0x05;
    pub const P1_YL: u8 = 0x06;
    pub const TH_GROUP: u8 = 0x80;
    pub const PERIOD_ACTIVE: u8 = 0x88;
    pub const CHIP_ID: u8 = 0xA3;
    pub const G_MODE: u8 = 0xA4;
    pub const FOCALTECH_ID: u8 = 0xA8;
}

/// Vendor ID reported by FOCALTECH_ID
pub const FOCALTECH_ID: u8 = 0x11;

/// Largest number of simultaneous contacts the chip tracks
const MAX_POINTS: u8 = 2;

/// Mapping from controller coordinates to screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ft6336Config {
    /// Screen width after the mapping
    pub width: u16,
    /// Screen height after the mapping
    pub height: u16,
    pub swap_xy: bool,
    pub mirror_x: bool,
    pub mirror_y: bool,
}

impl Default for Ft6336Config {
    fn default() -> Self {
        Self {
            width: 320,
            height: 240,
            swap_xy: false,
            mirror_x: false,
            mirror_y: false,
        }
    }
}

impl Ft6336Config {
    fn map(&self, raw_x: u16, raw_y: u16) -> (i32, i32) {
        let (mut x, mut y) = if self.swap_xy {
            (raw_y as i32, raw_x as i32)
        } else {
            (raw_x as i32, raw_y as i32)
        };
        if self.mirror_x {
            x = self.width as i32 - 1 - x;
        }
        if self.mirror_y {
            y = self.height as i32 - 1 - y;
        }
        (x, y)
    }
}

/// FT6336 driver
pub struct Ft6336<I2C> {
    i2c: I2C,
    config: Ft6336Config,
    last: TouchSample,
}

impl<I2C: I2c> Ft6336<I2C> {
    pub fn new(i2c: I2C, config: Ft6336Config) -> Self {
        Self {
            i2c,
            config,
            last: TouchSample::default(),
        }
    }

    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Check the vendor ID and switch to polling mode
    pub fn init(&mut self) -> Result<(), Error<I2C::Error>> {
        let id = self.read_register(reg::FOCALTECH_ID)?;
        if id != FOCALTECH_ID {
            return Err(Error::UnexpectedId(id));
        }
        self.write_register(reg::G_MODE, 0x00)?;

        #[cfg(feature = "defmt")]
        defmt::info!("FT6336 ready (chip {:#x})", self.read_register(reg::CHIP_ID)?);
        Ok(())
    }

    /// Number of fingers currently down
    pub fn touch_count(&mut self) -> Result<u8, Error<I2C::Error>> {
        let count = self.read_register(reg::TD_STATUS)? & 0x0F;
        Ok(if count > MAX_POINTS { 0 } else { count })
    }

    /// Poll the first contact
    pub fn read(&mut self) -> Result<TouchSample, Error<I2C::Error>> {
        let mut buf = [0u8; 5];
        self.i2c
            .write_read(ADDRESS, &[reg::TD_STATUS], &mut buf)
            .map_err(Error::Bus)?;

        let count = buf[0] & 0x0F;
        if count == 0 || count > MAX_POINTS {
            self.last.pressed = false;
            return Ok(self.last);
        }

        let raw_x = (((buf[1] & 0x0F) as u16) << 8) | buf[2] as u16;
        let raw_y = (((buf[3] & 0x0F) as u16) << 8) | buf[4] as u16;
        let (x, y) = self.config.map(raw_x, raw_y);

        self.last = TouchSample {
            x,
            y,
            pressed: true,
        };
        Ok(self.last)
    }

    fn read_register(&mut self, register: u8) -> Result<u8, Error<I2C::Error>> {
        let mut value = [0u8];
        self.i2c
            .write_read(ADDRESS, &[register], &mut value)
            .map_err(Error::Bus)?;
        Ok(value[0])
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), Error<I2C::Error>> {
        self.i2c
            .write(ADDRESS, &[register, value])
            .map_err(Error::Bus)
    }
}

impl<I2C: I2c> TouchSensor for Ft6336<I2C> {
    type Error = Error<I2C::Error>;

    fn read_touch(&mut self) -> Result<TouchSample, Self::Error> {
        self.read()
    }
}
