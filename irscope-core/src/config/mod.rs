//! Configuration types and parser
//!
//! The firmware embeds a `recorder.toml` file and parses it at boot with
//! [`parse_config`]. Every field has a default matching the reference
//! device, so an empty file is a valid configuration.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;
