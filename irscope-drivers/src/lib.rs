//! IR decode engine
//!
//! This crate provides the concrete implementation of the
//! [`DecodeEngine`](irscope_core::traits::DecodeEngine) trait defined in
//! irscope-core:
//!
//! - Raw mark/space capture buffer
//! - Protocol decoders (NEC, unknown-protocol hash)
//! - Text renderers (hex code, human-readable summary, source-code form)
//! - Capture engine tying a capture source to the decoders

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod decoder;
pub mod engine;
pub mod render;

pub use decoder::{Decoded, DecoderConfig, Protocol, RawCapture};
pub use engine::{CaptureEngine, CaptureSource};
