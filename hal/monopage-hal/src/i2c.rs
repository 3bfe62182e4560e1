//! I2C bus abstractions
//!
//! Provides the I2C master trait panel drivers talk to, plus an adapter
//! that lifts any `embedded-hal` 1.0 I2C peripheral onto it.

use embedded_hal::i2c::{Error as _, ErrorKind, NoAcknowledgeSource};

/// I2C bus master
///
/// Write-only: OLED controllers on I2C take commands and pixel data but
/// have nothing to read back. Every call is a bounded, blocking
/// transaction; the timeout is owned by the implementation.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;
}

/// I2C configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self::FAST
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self { frequency: 100_000 };

    /// Fast mode (400 kHz), what most SSD1306 modules are run at
    pub const FAST: Self = Self { frequency: 400_000 };

    /// Fast mode plus (1 MHz)
    pub const FAST_PLUS: Self = Self {
        frequency: 1_000_000,
    };
}

/// Chip-independent I2C failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// Bus error (misplaced start/stop)
    Bus,
    /// Arbitration lost
    ArbitrationLost,
    /// NACK received, device not answering at this address
    Nack,
    /// Receive overrun
    Overrun,
    /// Other error
    Other,
}

impl From<ErrorKind> for BusError {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Bus => BusError::Bus,
            ErrorKind::ArbitrationLoss => BusError::ArbitrationLost,
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)
            | ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data)
            | ErrorKind::NoAcknowledge(NoAcknowledgeSource::Unknown) => BusError::Nack,
            ErrorKind::Overrun => BusError::Overrun,
            _ => BusError::Other,
        }
    }
}

/// Adapter from an `embedded-hal` 1.0 I2C peripheral to [`I2cBus`]
#[derive(Debug)]
pub struct EmbeddedHalBus<T> {
    inner: T,
}

impl<T> EmbeddedHalBus<T> {
    /// Wrap a blocking embedded-hal I2C peripheral
    pub const fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Release the wrapped peripheral
    pub fn release(self) -> T {
        self.inner
    }
}

impl<T> I2cBus for EmbeddedHalBus<T>
where
    T: embedded_hal::i2c::I2c,
{
    type Error = BusError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.inner
            .write(address, data)
            .map_err(|e| BusError::from(e.kind()))
    }
}
