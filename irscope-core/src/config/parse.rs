//! Simple TOML parser for recorder configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! `recorder.toml`. It does NOT support the full TOML grammar and does not
//! allocate.
//!
//! Supported features:
//! - Key = value pairs (string, integer, hex integer)
//! - [section] headers
//! - Comments (# ...)
//!
//! NOT supported:
//! - Arrays and inline tables
//! - Multi-line strings
//! - Dotted keys

use super::types::{ConfigError, OverflowPolicy, PinConfig, RecorderConfig};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Line is neither a header nor a key/value pair
    InvalidLine,
    /// Invalid value type or out of range for the field
    InvalidValue,
    /// Invalid pin string
    InvalidPin,
    /// Unknown overflow policy name
    InvalidPolicy,
    /// Parsed values failed validation
    Invalid(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(e: ConfigError) -> Self {
        ParseError::Invalid(e)
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Receiver,
    Display,
    Presentation,
    Serial,
}

/// Parse TOML configuration into a validated RecorderConfig
///
/// Keys that are not set keep their defaults. Unknown keys are ignored so
/// that older firmware accepts newer files.
pub fn parse_config(input: &str) -> Result<RecorderConfig, ParseError> {
    let mut config = RecorderConfig::new();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidLine)?;
        apply_value(section, key, value, &mut config)?;
    }

    config.validate()?;
    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "receiver" => Ok(Section::Receiver),
        "display" => Ok(Section::Display),
        "presentation" => Ok(Section::Presentation),
        "serial" => Ok(Section::Serial),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove inline comments
    let value = if let Some(hash_pos) = value.find('#') {
        // Make sure # is not inside a string
        let quote_count = value[..hash_pos].matches('"').count();
        if quote_count % 2 == 0 {
            value[..hash_pos].trim()
        } else {
            value
        }
    } else {
        value
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> &str {
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        &value[1..value.len() - 1]
    } else {
        // Allow unquoted strings for simple values
        value
    }
}

/// Parse a decimal or `0x` hex integer, with optional `_` separators
fn parse_int<T: TryFrom<u64>>(value: &str) -> Result<T, ParseError> {
    let mut digits: heapless::String<24> = heapless::String::new();
    for ch in value.chars().filter(|c| *c != '_') {
        digits.push(ch).map_err(|_| ParseError::InvalidValue)?;
    }

    let raw = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        u64::from_str_radix(hex, 16)
    } else {
        digits.parse::<u64>()
    }
    .map_err(|_| ParseError::InvalidValue)?;

    T::try_from(raw).map_err(|_| ParseError::InvalidValue)
}

/// Parse a pin string like "gpio14", "!gpio14", "^!gpio14"
fn parse_pin(value: &str) -> Result<PinConfig, ParseError> {
    let mut rest = parse_string(value);
    let mut pin = PinConfig::default();

    loop {
        if let Some(r) = rest.strip_prefix('^') {
            pin.pull_up = true;
            rest = r;
        } else if let Some(r) = rest.strip_prefix('!') {
            pin.inverted = true;
            rest = r;
        } else {
            break;
        }
    }

    let number = rest.strip_prefix("gpio").ok_or(ParseError::InvalidPin)?;
    pin.pin = number.parse().map_err(|_| ParseError::InvalidPin)?;
    Ok(pin)
}

/// Parse an overflow policy name
fn parse_policy(value: &str) -> Result<OverflowPolicy, ParseError> {
    match parse_string(value) {
        "clip" => Ok(OverflowPolicy::Clip),
        "wrap" => Ok(OverflowPolicy::Wrap),
        "truncate_oldest" => Ok(OverflowPolicy::TruncateOldest),
        _ => Err(ParseError::InvalidPolicy),
    }
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut RecorderConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Receiver => {
            let r = &mut config.receiver;
            match key {
                "pin" => r.pin = parse_pin(value)?,
                "capture_buffer_size" => r.capture_buffer_size = parse_int(value)?,
                "timeout_ms" => r.timeout_ms = parse_int(value)?,
                "min_unknown_size" => r.min_unknown_size = parse_int(value)?,
                "tolerance_percent" => r.tolerance_percent = parse_int(value)?,
                _ => {} // Ignore unknown keys
            }
        }
        Section::Display => {
            let d = &mut config.display;
            match key {
                "i2c_address" => d.i2c_address = parse_int(value)?,
                "i2c_frequency" => d.i2c_frequency = parse_int(value)?,
                "width" => d.width = parse_int(value)?,
                "height" => d.height = parse_int(value)?,
                _ => {}
            }
        }
        Section::Presentation => {
            let p = &mut config.presentation;
            match key {
                "clear_window_ms" => p.clear_window_ms = parse_int(value)?,
                "marker_size" => p.marker_size = parse_int(value)?,
                "overflow" => p.overflow = parse_policy(value)?,
                _ => {}
            }
        }
        Section::Serial => {
            if key == "baudrate" {
                config.serial.baudrate = parse_int(value)?;
            }
        }
        Section::Root => {}
    }

    Ok(())
}
