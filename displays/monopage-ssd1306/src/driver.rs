//! SSD1306 panel over I2C
//!
//! The driver owns the bus handle and the panel state (connection, contrast,
//! inversion). Pixel data never lives here: the rendering engine keeps the
//! framebuffer and pushes it through the [`Transport`] impl.

use monopage_core::Transport;
use monopage_hal::{I2cBus, I2cConfig};

use crate::commands::{self as cmd, MAX_COMMANDS};

/// Default 7-bit address (SA0 low)
pub const DEFAULT_ADDRESS: u8 = 0x3C;

/// Alternate 7-bit address (SA0 high)
pub const ALTERNATE_ADDRESS: u8 = 0x3D;

/// Contrast programmed by the init sequence unless configured otherwise
pub const DEFAULT_CONTRAST: u8 = 0xCF;

/// Panel wiring and power-up settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelConfig {
    /// 7-bit I2C address
    pub address: u8,
    /// Glass height in rows (64 or 32)
    pub height: u8,
    /// Initial contrast
    pub contrast: u8,
    /// Mount the panel upside down
    pub rotate_180: bool,
    /// Init attempts made by [`Ssd1306::connect`]
    pub connect_retries: u8,
    /// Bus speed the board code should configure the peripheral with
    pub bus: I2cConfig,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            height: 64,
            contrast: DEFAULT_CONTRAST,
            rotate_180: false,
            connect_retries: 3,
            bus: I2cConfig::FAST,
        }
    }
}

/// Panel driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelError<E> {
    /// Bus transaction failed
    Bus(E),
    /// Command batch longer than one transaction allows
    TooManyCommands,
    /// Panel has not completed initialisation
    NotConnected,
}

/// SSD1306 OLED driver
pub struct Ssd1306<B> {
    bus: B,
    config: PanelConfig,
    connected: bool,
    powered: bool,
    inverted: bool,
    contrast: u8,
}

impl<B> Ssd1306<B>
where
    B: I2cBus,
{
    /// Create a driver; nothing is sent until [`connect`](Self::connect).
    pub fn new(bus: B, config: PanelConfig) -> Self {
        Self {
            bus,
            config,
            connected: false,
            powered: false,
            inverted: false,
            contrast: config.contrast,
        }
    }

    /// Send one command batch, `[0x00, cmds..]`, in a single transaction
    fn write_commands(&mut self, cmds: &[u8]) -> Result<(), PanelError<B::Error>> {
        if cmds.is_empty() {
            return Ok(());
        }
        if cmds.len() > MAX_COMMANDS {
            return Err(PanelError::TooManyCommands);
        }

        let mut buf = [0u8; MAX_COMMANDS + 1];
        buf[0] = monopage_core::flush::COMMAND_PREFIX;
        buf[1..=cmds.len()].copy_from_slice(cmds);
        self.bus
            .write(self.config.address, &buf[..=cmds.len()])
            .map_err(PanelError::Bus)
    }

    /// Send commands to a connected panel
    pub fn send_commands(&mut self, cmds: &[u8]) -> Result<(), PanelError<B::Error>> {
        if !self.connected {
            return Err(PanelError::NotConnected);
        }
        self.write_commands(cmds)
    }

    /// Run the power-up sequence once
    pub fn init(&mut self) -> Result<(), PanelError<B::Error>> {
        self.connected = false;
        let seq = cmd::init_sequence(&self.config);
        self.write_commands(&seq)?;
        self.write_commands(&cmd::mux_ratio(self.config.height))?;

        self.connected = true;
        self.powered = true;
        self.inverted = false;
        self.contrast = self.config.contrast;
        Ok(())
    }

    /// Initialise the panel, retrying up to `connect_retries` times
    ///
    /// The panel counts as ready only after a complete init sequence was
    /// acknowledged.
    pub fn connect(&mut self) -> Result<(), PanelError<B::Error>> {
        let attempts = self.config.connect_retries.max(1);
        let mut last_error = PanelError::NotConnected;

        for _attempt in 1..=attempts {
            match self.init() {
                Ok(()) => {
                    #[cfg(feature = "defmt")]
                    defmt::info!(
                        "SSD1306 at {=u8:#x} ready after {} attempt(s)",
                        self.config.address,
                        _attempt
                    );
                    return Ok(());
                }
                Err(e) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("SSD1306 init attempt {} failed", _attempt);
                    last_error = e;
                }
            }
        }

        Err(last_error)
    }

    /// Set display contrast (0-255)
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), PanelError<B::Error>> {
        self.send_commands(&[cmd::SET_CONTRAST, contrast])?;
        self.contrast = contrast;
        Ok(())
    }

    /// Turn the panel on or off (pixel memory is kept)
    pub fn set_power(&mut self, on: bool) -> Result<(), PanelError<B::Error>> {
        let c = if on { cmd::DISPLAY_ON } else { cmd::DISPLAY_OFF };
        self.send_commands(&[c])?;
        self.powered = on;
        Ok(())
    }

    /// Mirror left to right
    pub fn flip_horizontal(&mut self, flip: bool) -> Result<(), PanelError<B::Error>> {
        let c = if flip {
            cmd::SEG_REMAP_FLIPPED
        } else {
            cmd::SEG_REMAP_NORMAL
        };
        self.send_commands(&[c])
    }

    /// Mirror top to bottom
    pub fn flip_vertical(&mut self, flip: bool) -> Result<(), PanelError<B::Error>> {
        let c = if flip {
            cmd::COM_SCAN_FLIPPED
        } else {
            cmd::COM_SCAN_NORMAL
        };
        self.send_commands(&[c])
    }

    /// Both mirrors at once
    pub fn set_rotation_180(&mut self, rotate: bool) -> Result<(), PanelError<B::Error>> {
        self.send_commands(&cmd::orientation(rotate))
    }

    /// Invert display colors
    pub fn set_inverted(&mut self, inverted: bool) -> Result<(), PanelError<B::Error>> {
        let c = if inverted {
            cmd::SET_INVERSE
        } else {
            cmd::SET_NORMAL
        };
        self.send_commands(&[c])?;
        self.inverted = inverted;
        Ok(())
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn is_powered(&self) -> bool {
        self.powered
    }

    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    pub fn contrast(&self) -> u8 {
        self.contrast
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Release the bus
    pub fn release(self) -> B {
        self.bus
    }
}

impl<B> Transport for Ssd1306<B>
where
    B: I2cBus,
{
    type Error = B::Error;

    fn transmit(&mut self, payload: &[u8]) -> Result<(), Self::Error> {
        self.bus.write(self.config.address, payload)
    }

    fn is_ready(&self) -> bool {
        self.connected
    }
}
