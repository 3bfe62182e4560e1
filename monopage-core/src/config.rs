//! Persisted engine settings
//!
//! The settings a front panel typically lets a user change, serialized
//! with postcard so they can live in a flash page or EEPROM.

use serde::{Deserialize, Serialize};

use crate::draw::DrawMode;
use crate::flush::FlushMode;
use crate::scroll::{DEFAULT_SPEED, MAX_SPEED, MIN_SPEED};

/// Magic number to identify stored display settings
pub const CONFIG_MAGIC: u16 = 0x4D50; // "MP"

/// Current settings layout version
pub const CONFIG_VERSION: u8 = 1;

/// Buffer size that always fits an encoded [`DisplayConfig`]
pub const MAX_CONFIG_SIZE: usize = 32;

/// Settings persistence errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Serialization failed (buffer too small)
    Serialize,
    /// Deserialization failed
    Deserialize,
    /// Invalid magic or version
    InvalidFormat,
}

/// Engine settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    /// Must equal [`CONFIG_MAGIC`]
    pub magic: u16,
    /// Must equal [`CONFIG_VERSION`]
    pub version: u8,
    /// Mode for text and primitives
    pub draw_mode: DrawMode,
    /// Blank columns (rows for vertical text) between glyphs
    pub char_spacing: u8,
    pub scroll_enabled: bool,
    /// Horizontal speed, 1..=10 (10 px/s per step)
    pub scroll_speed: u8,
    pub scroll_loop: bool,
    /// Vertical speed, 1..=10
    pub vertical_scroll_speed: u8,
    pub vertical_scroll_loop: bool,
    pub flush_mode: FlushMode,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayConfig {
    pub const fn new() -> Self {
        Self {
            magic: CONFIG_MAGIC,
            version: CONFIG_VERSION,
            draw_mode: DrawMode::Replace,
            char_spacing: 1,
            scroll_enabled: false,
            scroll_speed: DEFAULT_SPEED,
            scroll_loop: true,
            vertical_scroll_speed: DEFAULT_SPEED,
            vertical_scroll_loop: true,
            flush_mode: FlushMode::Paged,
        }
    }

    /// Check if the magic and version match
    pub fn is_valid(&self) -> bool {
        self.magic == CONFIG_MAGIC && self.version == CONFIG_VERSION
    }

    /// Clamps every field into its legal range.
    pub fn validated(mut self) -> Self {
        self.scroll_speed = self.scroll_speed.clamp(MIN_SPEED, MAX_SPEED);
        self.vertical_scroll_speed = self.vertical_scroll_speed.clamp(MIN_SPEED, MAX_SPEED);
        self
    }

    /// Serializes into `buf`, returning the used prefix.
    pub fn encode<'b>(&self, buf: &'b mut [u8]) -> Result<&'b mut [u8], ConfigError> {
        postcard::to_slice(self, buf).map_err(|_| ConfigError::Serialize)
    }

    /// Deserializes and validates stored settings.
    pub fn decode(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = postcard::from_bytes(bytes).map_err(|_| ConfigError::Deserialize)?;
        if !config.is_valid() {
            #[cfg(feature = "defmt")]
            defmt::warn!("display config has bad magic/version");
            return Err(ConfigError::InvalidFormat);
        }
        Ok(config.validated())
    }
}
