//! Display sink for small monochrome OLED panels
//!
//! This crate provides:
//! - `Panel` trait for pixel buffers that can be pushed to hardware
//! - `Framebuffer`, an in-memory 1-bit page buffer
//! - `Ssd1306`, an I2C driver for 128x64 SSD1306 panels
//! - `TextCanvas`, the `DisplaySink` implementation: text cursor, four text
//!   scales, rectangles and the bottom-edge overflow policy
//!
//! # Architecture
//!
//! ```text
//! PresentationRouter ──DisplaySink──▶ TextCanvas ──Panel──▶ Ssd1306 / Framebuffer
//! ```
//!
//! Text rendering uses the `embedded-graphics` mono fonts; everything is
//! drawn into RAM and only `flush` touches the bus.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod canvas;
pub mod framebuffer;
pub mod panel;
pub mod ssd1306;

// Re-export key types
pub use canvas::TextCanvas;
pub use framebuffer::Framebuffer;
pub use panel::Panel;
pub use ssd1306::Ssd1306;
