//! RP2040-specific HAL for the irscope IR code recorder
//!
//! This crate provides RP2040 implementations of the shared `irscope-hal`
//! traits, plus RP2040-specific functionality:
//!
//! - Dynamic pin allocation for config-driven setup
//! - Blocking UART transmitter (implements `irscope_hal::UartTx`)
//! - IR receiver edge timing (mark/space durations with a message timeout)

#![no_std]

pub mod capture;
pub mod pins;
pub mod uart;

pub use capture::IrReceiver;
pub use pins::{BoardPeripherals, PinBank, PinError};
pub use uart::BlockingUartTx;
