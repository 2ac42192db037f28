//! ST7789 TFT panel (4-wire SPI)
//!
//! The panel is driven write-only. Every frame is a full-window RAMWR of
//! big-endian RGB565 pixels, so the controller's GRAM always holds the last
//! finished frame.
//!
//! # Wiring
//!
//! - SPI (mode 0, CS handled by the [`SpiDevice`])
//! - DC: low for commands, high for parameters and pixel data
//! - RST is optional and left to the board code

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;
use kairos_hal::DisplaySink;

use crate::error::Error;

/// ST7789 commands
#[allow(dead_code)]
pub mod cmd {
    pub const NOP: u8 = 0x00;
    pub const SWRESET: u8 = 0x01;
    pub const SLPIN: u8 = 0x10;
    pub const SLPOUT: u8 = 0x11;
    pub const NORON: u8 = 0x13;
    pub const INVOFF: u8 = 0x20;
    pub const INVON: u8 = 0x21;
    pub const DISPOFF: u8 = 0x28;
    pub const DISPON: u8 = 0x29;
    pub const CASET: u8 = 0x2A;
    pub const RASET: u8 = 0x2B;
    pub const RAMWR: u8 = 0x2C;
    pub const MADCTL: u8 = 0x36;
    pub const COLMOD: u8 = 0x3A;
}

/// MADCTL bits
pub mod madctl {
    pub const MY: u8 = 0x80;
    pub const MX: u8 = 0x40;
    pub const MV: u8 = 0x20;
    pub const BGR: u8 = 0x08;
}

/// 16 bits per pixel on both interfaces
const COLMOD_RGB565: u8 = 0x55;

/// Pixels converted per SPI write
const CHUNK_PIXELS: usize = 256;

/// Panel orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Orientation {
    Portrait,
    #[default]
    Landscape,
    PortraitFlipped,
    LandscapeFlipped,
}

impl Orientation {
    fn madctl(self) -> u8 {
        match self {
            Self::Portrait => 0,
            Self::Landscape => madctl::MX | madctl::MV,
            Self::PortraitFlipped => madctl::MX | madctl::MY,
            Self::LandscapeFlipped => madctl::MY | madctl::MV,
        }
    }
}

/// Panel configuration
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct St7789Config {
    /// Visible width in the chosen orientation
    pub width: u16,
    /// Visible height in the chosen orientation
    pub height: u16,
    pub orientation: Orientation,
    /// Most IPS modules need color inversion on
    pub invert: bool,
    /// Module wired with blue and red swapped
    pub bgr: bool,
    /// Column offset of the visible window in GRAM
    pub x_offset: u16,
    /// Row offset of the visible window in GRAM
    pub y_offset: u16,
}

impl Default for St7789Config {
    fn default() -> Self {
        Self {
            width: 320,
            height: 240,
            orientation: Orientation::Landscape,
            invert: true,
            bgr: false,
            x_offset: 0,
            y_offset: 0,
        }
    }
}

/// ST7789 driver
pub struct St7789<SPI, DC> {
    spi: SPI,
    dc: DC,
    config: St7789Config,
}

impl<SPI, DC> St7789<SPI, DC>
where
    SPI: SpiDevice<u8>,
    DC: OutputPin,
{
    pub fn new(spi: SPI, dc: DC, config: St7789Config) -> Self {
        Self { spi, dc, config }
    }

    pub fn config(&self) -> &St7789Config {
        &self.config
    }

    /// Releases owned bus and pin
    pub fn release(self) -> (SPI, DC) {
        (self.spi, self.dc)
    }

    /// Run the power-up sequence and switch the panel on
    pub fn init(&mut self, delay: &mut impl DelayNs) -> Result<(), Error<SPI::Error>> {
        self.command(cmd::SWRESET, &[])?;
        delay.delay_ms(150);
        self.command(cmd::SLPOUT, &[])?;
        delay.delay_ms(120);

        self.command(cmd::COLMOD, &[COLMOD_RGB565])?;
        let mut mad = self.config.orientation.madctl();
        if self.config.bgr {
            mad |= madctl::BGR;
        }
        self.command(cmd::MADCTL, &[mad])?;
        self.command(
            if self.config.invert {
                cmd::INVON
            } else {
                cmd::INVOFF
            },
            &[],
        )?;
        self.command(cmd::NORON, &[])?;
        delay.delay_ms(10);
        self.command(cmd::DISPON, &[])?;
        delay.delay_ms(10);

        #[cfg(feature = "defmt")]
        defmt::info!(
            "ST7789 ready ({}x{})",
            self.config.width,
            self.config.height
        );
        Ok(())
    }

    /// Blank or unblank the panel without touching GRAM
    pub fn set_display_on(&mut self, on: bool) -> Result<(), Error<SPI::Error>> {
        self.command(if on { cmd::DISPON } else { cmd::DISPOFF }, &[])
    }

    /// Send a command byte followed by its parameters
    pub fn command(&mut self, command: u8, params: &[u8]) -> Result<(), Error<SPI::Error>> {
        self.dc.set_low().map_err(|_| Error::Pin)?;
        self.spi.write(&[command]).map_err(Error::Bus)?;

        if !params.is_empty() {
            self.dc.set_high().map_err(|_| Error::Pin)?;
            self.spi.write(params).map_err(Error::Bus)?;
        }
        Ok(())
    }

    /// Select the GRAM window for the next RAMWR (inclusive corners)
    fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), Error<SPI::Error>> {
        let (xo, yo) = (self.config.x_offset, self.config.y_offset);
        let [a, b] = (x0 + xo).to_be_bytes();
        let [c, d] = (x1 + xo).to_be_bytes();
        self.command(cmd::CASET, &[a, b, c, d])?;

        let [a, b] = (y0 + yo).to_be_bytes();
        let [c, d] = (y1 + yo).to_be_bytes();
        self.command(cmd::RASET, &[a, b, c, d])
    }
}

impl<SPI, DC> DisplaySink for St7789<SPI, DC>
where
    SPI: SpiDevice<u8>,
    DC: OutputPin,
{
    type Error = Error<SPI::Error>;

    fn dimensions(&self) -> (u16, u16) {
        (self.config.width, self.config.height)
    }

    fn write_frame(&mut self, pixels: &[u16]) -> Result<(), Self::Error> {
        let (width, height) = self.dimensions();
        if pixels.len() != width as usize * height as usize {
            return Err(Error::InvalidInput);
        }

        self.set_window(0, 0, width - 1, height - 1)?;
        self.command(cmd::RAMWR, &[])?;
        self.dc.set_high().map_err(|_| Error::Pin)?;

        let mut bytes = [0u8; CHUNK_PIXELS * 2];
        for chunk in pixels.chunks(CHUNK_PIXELS) {
            for (dst, px) in bytes.chunks_exact_mut(2).zip(chunk) {
                dst.copy_from_slice(&px.to_be_bytes());
            }
            self.spi
                .write(&bytes[..chunk.len() * 2])
                .map_err(Error::Bus)?;
        }
        Ok(())
    }
}
