//! monopage Hardware Abstraction Layer
//!
//! This crate defines the bus traits that panel drivers are written
//! against, so the same driver runs on any chip HAL or on a host test
//! double.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  monopage-core (rendering engine)       │
//! └─────────────────────────────────────────┘
//!                     │ Transport
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  monopage-ssd1306 (panel driver)        │
//! └─────────────────────────────────────────┘
//!                     │ I2cBus
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  monopage-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!          any embedded-hal 1.0 I2C
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - I2C bus operations

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod i2c;

pub use i2c::{BusError, EmbeddedHalBus, I2cBus, I2cConfig};
