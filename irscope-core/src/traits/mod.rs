//! Hardware abstraction traits
//!
//! These traits define the interface between the recorder logic and the
//! decode engine / display implementations.

pub mod decoder;
pub mod display;

pub use decoder::DecodeEngine;
pub use display::{Color, DisplayError, DisplaySink, DisplaySinkExt, TextScale};
