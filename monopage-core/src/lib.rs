//! monopage rendering engine
//!
//! Draws text and vector shapes into a 1-bit page-addressed framebuffer
//! (SSD1306 layout: 8-row pages, one byte per column, bit 0 on top) and
//! streams it to a panel through a [`Transport`].
//!
//! # Layers
//!
//! - [`framebuffer`] and [`draw`]: the pixel store and the five draw modes
//! - [`raster`]: lines, circles, rectangles, bitmaps, Bezier curves
//! - [`font`] and [`text`]: glyph lookup, byte decoding, text runs
//! - [`layout`], [`scroll`] and [`compositor`]: placing text on screen
//! - [`engine`]: the [`Display`] context tying it all together
//! - [`flush`] and [`transport`]: uploading a finished frame
//! - [`config`]: persisted engine settings
//!
//! ```ignore
//! let mut display = Display128x64::new(&FONT);
//! display.set_cursor(Cursor::new(0, 16).with_align(Align::Center));
//! display.print("12:45")?;
//! display.draw_print(now_ms);
//! display.frame_mut().round_rect(0, 12, 128, 24, 4, DrawMode::Or, Fill::Outline);
//! display.flush(&mut panel, FlushMode::Paged)?;
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod compositor;
pub mod config;
pub mod draw;
pub mod engine;
pub mod flush;
pub mod font;
pub mod framebuffer;
pub mod layout;
pub mod raster;
pub mod scroll;
pub mod text;
pub mod transport;

#[cfg(test)]
mod fixtures;

pub use compositor::{Align, Cursor};
pub use config::{ConfigError, DisplayConfig};
pub use draw::DrawMode;
pub use engine::{Display, Display128x32, Display128x64};
pub use flush::{FlushError, FlushMode};
pub use font::{Font, FontKind, Glyph, GlyphSource};
pub use framebuffer::{FrameBuffer, FrameBuffer128x32, FrameBuffer128x64};
pub use raster::Fill;
pub use text::TextError;
pub use transport::Transport;
