//! Protocol decoders
//!
//! Decoders are tried in order; the hash decoder catches anything long
//! enough that no protocol decoder recognised.

pub mod capture;
pub mod hash;
pub mod nec;
pub mod timing;

pub use capture::RawCapture;
pub use timing::Tolerance;

use irscope_core::config::ReceiverConfig;

/// Recognised protocol families
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Protocol {
    /// NEC and extended NEC (32-bit frames, 9 ms leader)
    Nec,
    /// Unrecognised; value is a hash of the timings
    Unknown,
}

impl Protocol {
    /// Protocol name as shown to the user
    pub const fn name(self) -> &'static str {
        match self {
            Protocol::Nec => "NEC",
            Protocol::Unknown => "UNKNOWN",
        }
    }
}

/// Decoder settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecoderConfig {
    /// Timing slack for protocol matching
    pub tolerance: Tolerance,
    /// Smallest unrecognised capture worth hashing
    pub min_unknown_size: u16,
}

impl From<&ReceiverConfig> for DecoderConfig {
    fn from(config: &ReceiverConfig) -> Self {
        Self {
            tolerance: Tolerance::new(config.tolerance_percent),
            min_unknown_size: config.min_unknown_size,
        }
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self::from(&ReceiverConfig::default())
    }
}

/// Decoder output
///
/// Address and command use 0 for "not applicable".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Decoded {
    /// Protocol family
    pub protocol: Protocol,
    /// Repeat frame (button held)
    pub repeat: bool,
    /// Full code, MSB first as transmitted
    pub value: u64,
    /// Number of data bits in `value`
    pub bits: u16,
    /// Device address
    pub address: u64,
    /// Command byte
    pub command: u64,
}

/// Decode a capture
///
/// Returns `None` for noise: nothing recognised and shorter than the
/// unknown-size threshold.
pub fn decode(capture: &RawCapture, config: &DecoderConfig) -> Option<Decoded> {
    let entries = capture.entries();

    if let Some(frame) = nec::decode(entries, config.tolerance) {
        return Some(match frame {
            nec::Nec::Frame {
                value,
                address,
                command,
            } => Decoded {
                protocol: Protocol::Nec,
                repeat: false,
                value: u64::from(value),
                bits: nec::NEC_BITS,
                address: u64::from(address),
                command: u64::from(command),
            },
            nec::Nec::Repeat => Decoded {
                protocol: Protocol::Nec,
                repeat: true,
                value: u64::from(nec::REPEAT_VALUE),
                bits: 0,
                address: 0,
                command: 0,
            },
        });
    }

    hash::decode(entries, config.min_unknown_size).map(|hash| Decoded {
        protocol: Protocol::Unknown,
        repeat: false,
        value: u64::from(hash),
        bits: 32,
        address: 0,
        command: 0,
    })
}
