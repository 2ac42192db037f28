//! Runtime configuration
//!
//! Boards build a [`SystemConfig`] in code. With the `serde` feature the
//! same type can be deserialized from a stored blob.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::palette;

/// Default frame interval (~60 Hz)
pub const DEFAULT_FRAME_INTERVAL_MS: u32 = 16;

/// Default text scale for the print buffer
pub const DEFAULT_TEXT_SIZE: u8 = 2;

/// Frame loop configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SystemConfig {
    /// Minimum time between committed frames
    pub frame_interval_ms: u32,
    /// Initial clear color of the canvas
    pub background: Color,
    /// Scale factor of the print buffer font
    pub text_size: u8,
    /// Color of the print buffer text
    pub text_color: Color,
    /// Latch IMU samples into the input snapshot
    pub imu_enabled: bool,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
            background: palette::BLACK,
            text_size: DEFAULT_TEXT_SIZE,
            text_color: palette::WHITE,
            imu_enabled: true,
        }
    }
}

impl SystemConfig {
    /// Check the configuration for values the frame loop cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_interval_ms == 0 {
            return Err(ConfigError::ZeroFrameInterval);
        }
        if self.text_size == 0 {
            return Err(ConfigError::ZeroTextSize);
        }
        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Frame interval must be at least 1 ms
    ZeroFrameInterval,
    /// Text scale must be at least 1
    ZeroTextSize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SystemConfig::default();
        assert_eq!(config.frame_interval_ms, 16);
        assert_eq!(config.text_size, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_interval() {
        let config = SystemConfig {
            frame_interval_ms: 0,
            ..SystemConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroFrameInterval));
    }
}
