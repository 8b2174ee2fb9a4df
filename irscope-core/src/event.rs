//! Decoded IR event model
//!
//! A [`DecodedEvent`] is what the decode engine hands to the rest of the
//! system: the protocol it recognised, the numeric fields it pulled out of
//! the pulse train, and the textual renderings it produced for them.

use heapless::String;

/// Maximum protocol name length
pub const PROTOCOL_LEN: usize = 24;

/// Maximum hex code rendering length ("0x" + 16 digits fits comfortably)
pub const HEX_CODE_LEN: usize = 24;

/// Maximum human-readable summary length
pub const HUMAN_READABLE_LEN: usize = 256;

/// Maximum source-code rendering length
pub const SOURCE_CODE_LEN: usize = 1536;

/// Maximum AC description length
pub const AC_DESCRIPTION_LEN: usize = 128;

/// A decoded infrared event
///
/// Produced by a [`DecodeEngine`](crate::traits::DecodeEngine) and consumed
/// read-only by the poller and router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedEvent {
    /// Protocol name (e.g. "NEC"); empty means unknown
    pub protocol: String<PROTOCOL_LEN>,
    /// Hardware repeat code (button held), not a new press
    pub repeat: bool,
    /// Capture buffer was too small; remaining fields may be partial
    pub overflow: bool,
    /// Decoded address, if meaningful for the protocol
    pub address: Option<u64>,
    /// Decoded command, if meaningful for the protocol
    pub command: Option<u64>,
    /// Full decoded value (0 when not meaningful)
    pub value: u64,
    /// Number of data bits in `value`
    pub bits: u16,
    /// Hex rendering of the code, e.g. "0x20DF40BF"
    pub hex_code: String<HEX_CODE_LEN>,
    /// Basic human-readable summary (newline-terminated lines)
    pub human_readable: String<HUMAN_READABLE_LEN>,
    /// Source-code form (raw timings and decoded constants)
    pub source_code: String<SOURCE_CODE_LEN>,
    /// Air-conditioner state description; empty for non-AC protocols
    pub ac_description: String<AC_DESCRIPTION_LEN>,
}

impl DecodedEvent {
    /// Create an event for the given protocol with all other fields empty
    ///
    /// Protocol names longer than [`PROTOCOL_LEN`] are truncated.
    pub fn new(protocol: &str) -> Self {
        let mut name = String::new();
        for ch in protocol.chars() {
            if name.push(ch).is_err() {
                break;
            }
        }
        Self {
            protocol: name,
            repeat: false,
            overflow: false,
            address: None,
            command: None,
            value: 0,
            bits: 0,
            hex_code: String::new(),
            human_readable: String::new(),
            source_code: String::new(),
            ac_description: String::new(),
        }
    }

    /// Convert an engine field where 0 means "not applicable"
    ///
    /// A genuinely zero address or command cannot be told apart from an
    /// absent one at this boundary.
    pub const fn field(raw: u64) -> Option<u64> {
        if raw == 0 {
            None
        } else {
            Some(raw)
        }
    }

    /// Protocol name as a string slice
    pub fn protocol_name(&self) -> &str {
        self.protocol.as_str()
    }

    /// Check if the engine produced an AC description
    pub fn has_ac_description(&self) -> bool {
        !self.ac_description.is_empty()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DecodedEvent {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "DecodedEvent {{ protocol: {}, repeat: {}, overflow: {}, address: {}, command: {}, value: {:#x} }}",
            self.protocol.as_str(),
            self.repeat,
            self.overflow,
            self.address,
            self.command,
            self.value
        );
    }
}
