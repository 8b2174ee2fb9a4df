//! irscope Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits the firmware's text
//! sink is built on, so the formatting side can be exercised on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (irscope-firmware)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  irscope-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ irscope-hal-  │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::UartTx`] - Serial transmit
//! - [`serial::SerialWriter`] - `core::fmt::Write` text sink over a `UartTx`
//! - [`i2c::I2cConfig`] - I2C bus settings

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod i2c;
pub mod serial;
pub mod uart;

// Re-export key types at crate root for convenience
pub use i2c::I2cConfig;
pub use serial::SerialWriter;
pub use uart::{UartConfig, UartTx};
