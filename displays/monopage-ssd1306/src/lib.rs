//! SSD1306 OLED panel driver
//!
//! Drives 128x64 and 128x32 SSD1306 modules over I2C and plugs into the
//! monopage engine as its [`Transport`](monopage_core::Transport).
//!
//! ```ignore
//! let bus = EmbeddedHalBus::new(i2c);
//! let mut panel = Ssd1306::new(bus, PanelConfig::default());
//! panel.connect()?;
//! display.flush(&mut panel, FlushMode::Paged)?;
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod commands;
pub mod driver;

pub use driver::{PanelConfig, PanelError, Ssd1306, ALTERNATE_ADDRESS, DEFAULT_ADDRESS};
