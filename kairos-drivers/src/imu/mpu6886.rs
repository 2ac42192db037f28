//! MPU6886 6-axis accelerometer and gyroscope (I2C)
//!
//! One burst read of 14 bytes from ACCEL_XOUT_H yields accel, die
//! temperature and gyro as big-endian `i16`s. The chip has no magnetometer,
//! so readings report a zero field.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use kairos_hal::{ImuSample, Vector3};

use super::MotionSensor;
use crate::error::Error;

/// 7-bit I2C address with AD0 low
pub const ADDRESS: u8 = 0x68;

/// Value of WHO_AM_I
pub const WHO_AM_I_VALUE: u8 = 0x19;

/// MPU6886 registers
#[allow(dead_code)]
pub mod reg {
    pub const SMPLRT_DIV: u8 = 0x19;
    pub const CONFIG: u8 = 0x1A;
    pub const GYRO_CONFIG: u8 = 0x1B;
    pub const ACCEL_CONFIG: u8 = 0x1C;
    pub const ACCEL_CONFIG2: u8 = 0x1D;
    pub const ACCEL_XOUT_H: u8 = 0x3B;
    pub const TEMP_OUT_H: u8 = 0x41;
    pub const GYRO_XOUT_H: u8 = 0x43;
    pub const PWR_MGMT_1: u8 = 0x6B;
    pub const PWR_MGMT_2: u8 = 0x6C;
    pub const WHO_AM_I: u8 = 0x75;
}

/// Accelerometer full-scale range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelRange {
    G2,
    G4,
    #[default]
    G8,
    G16,
}

impl AccelRange {
    fn bits(self) -> u8 {
        (self as u8) << 3
    }

    /// G per LSB
    pub fn scale(self) -> f32 {
        let full = match self {
            Self::G2 => 2.0,
            Self::G4 => 4.0,
            Self::G8 => 8.0,
            Self::G16 => 16.0,
        };
        full / 32768.0
    }
}

/// Gyroscope full-scale range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroRange {
    Dps250,
    Dps500,
    Dps1000,
    #[default]
    Dps2000,
}

impl GyroRange {
    fn bits(self) -> u8 {
        (self as u8) << 3
    }

    /// Degrees per second per LSB
    pub fn scale(self) -> f32 {
        let full = match self {
            Self::Dps250 => 250.0,
            Self::Dps500 => 500.0,
            Self::Dps1000 => 1000.0,
            Self::Dps2000 => 2000.0,
        };
        full / 32768.0
    }
}

/// Sensor configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Mpu6886Config {
    pub accel_range: AccelRange,
    pub gyro_range: GyroRange,
}

/// MPU6886 driver
pub struct Mpu6886<I2C> {
    i2c: I2C,
    config: Mpu6886Config,
    /// Die temperature from the last read, in Celsius
    temperature_c: f32,
}

impl<I2C: I2c> Mpu6886<I2C> {
    pub fn new(i2c: I2C, config: Mpu6886Config) -> Self {
        Self {
            i2c,
            config,
            temperature_c: 0.0,
        }
    }

    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Verify the chip, reset it and apply the configured ranges
    pub fn init(&mut self, delay: &mut impl DelayNs) -> Result<(), Error<I2C::Error>> {
        let id = self.read_register(reg::WHO_AM_I)?;
        if id != WHO_AM_I_VALUE {
            return Err(Error::UnexpectedId(id));
        }

        self.write_register(reg::PWR_MGMT_1, 0x00)?;
        delay.delay_ms(10);
        // Device reset
        self.write_register(reg::PWR_MGMT_1, 0x80)?;
        delay.delay_ms(10);
        // Auto-select the PLL clock
        self.write_register(reg::PWR_MGMT_1, 0x01)?;
        delay.delay_ms(10);

        self.write_register(reg::ACCEL_CONFIG, self.config.accel_range.bits())?;
        self.write_register(reg::GYRO_CONFIG, self.config.gyro_range.bits())?;
        // 176 Hz DLPF, 1 kHz / (1 + 5) output rate
        self.write_register(reg::CONFIG, 0x01)?;
        self.write_register(reg::SMPLRT_DIV, 0x05)?;
        self.write_register(reg::ACCEL_CONFIG2, 0x00)?;
        self.write_register(reg::PWR_MGMT_2, 0x00)?;
        delay.delay_ms(1);

        #[cfg(feature = "defmt")]
        defmt::info!(
            "MPU6886 ready ({}, {})",
            self.config.accel_range,
            self.config.gyro_range
        );
        Ok(())
    }

    /// Burst-read accel, temperature and gyro
    pub fn read(&mut self) -> Result<ImuSample, Error<I2C::Error>> {
        let mut buf = [0u8; 14];
        self.i2c
            .write_read(ADDRESS, &[reg::ACCEL_XOUT_H], &mut buf)
            .map_err(Error::Bus)?;

        let word = |i: usize| i16::from_be_bytes([buf[i], buf[i + 1]]) as f32;
        let a = self.config.accel_range.scale();
        let g = self.config.gyro_range.scale();

        self.temperature_c = word(6) / 326.8 + 25.0;

        Ok(ImuSample {
            accel: Vector3::new(word(0) * a, word(2) * a, word(4) * a),
            gyro: Vector3::new(word(8) * g, word(10) * g, word(12) * g),
            mag: Vector3::ZERO,
        })
    }

    pub fn temperature_c(&self) -> f32 {
        self.temperature_c
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

impl<I2C: I2c> MotionSensor for Mpu6886<I2C> {
    type Error = Error<I2C::Error>;

    fn read_motion(&mut self) -> Result<ImuSample, Self::Error> {
        self.read()
    }
}
