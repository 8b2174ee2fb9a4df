//! Board-agnostic core logic for the irscope IR code recorder
//!
//! This crate contains everything between the decode engine and the two
//! output sinks that does not depend on specific hardware:
//!
//! - Decoded event model
//! - Hardware abstraction traits (decode engine, display sink)
//! - Capture poller (repeat suppression)
//! - Presentation router (clear-window state machine, dual-format rendering)
//! - Recorder context tying the pieces together
//! - Configuration types and the embedded TOML parser

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod event;
pub mod poller;
pub mod recorder;
pub mod router;
pub mod traits;

pub use event::DecodedEvent;
pub use poller::{CapturePoller, PollerStats};
pub use recorder::Recorder;
pub use router::{ClearWindow, PresentationRouter, SinkError, TickOutcome};
