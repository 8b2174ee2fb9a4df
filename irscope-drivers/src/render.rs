//! Text renderings of a decode
//!
//! Builds the [`DecodedEvent`] handed to the recorder, including the three
//! engine-side text forms:
//!
//! - hex code: `0x20DF40BF`
//! - human-readable summary: `Protocol  : NEC` / `Code      : 0x20DF40BF (32 Bits)`
//! - source-code form: the raw timings as a `uint16_t` array plus the
//!   decoded constants, ready to paste into a sender sketch
//!
//! Renderings that do not fit their buffer are cut short.

use core::fmt::{self, Write};

use heapless::String;
use irscope_core::event::DecodedEvent;

use crate::decoder::{Decoded, Protocol, RawCapture};

/// Writer that silently drops whatever does not fit
struct Truncating<'a, const N: usize>(&'a mut String<N>);

impl<const N: usize> Write for Truncating<'_, N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for ch in s.chars() {
            if self.0.push(ch).is_err() {
                break;
            }
        }
        Ok(())
    }
}

/// Build the event for a decode of `capture`
pub fn to_event(decoded: &Decoded, capture: &RawCapture) -> DecodedEvent {
    let mut event = DecodedEvent::new(decoded.protocol.name());
    event.repeat = decoded.repeat;
    event.overflow = capture.overflow();
    event.address = DecodedEvent::field(decoded.address);
    event.command = DecodedEvent::field(decoded.command);
    event.value = decoded.value;
    event.bits = decoded.bits;

    let _ = write_hex(&mut Truncating(&mut event.hex_code), decoded.value);
    let _ = write_human_readable(&mut Truncating(&mut event.human_readable), decoded);
    let _ = write_source_code(&mut Truncating(&mut event.source_code), decoded, capture);
    event
}

/// `0x` followed by upper-case hex digits, no padding
pub fn write_hex<W: Write + ?Sized>(w: &mut W, value: u64) -> fmt::Result {
    write!(w, "0x{:X}", value)
}

/// Basic two-line summary
pub fn write_human_readable<W: Write + ?Sized>(w: &mut W, decoded: &Decoded) -> fmt::Result {
    write!(w, "Protocol  : {}", decoded.protocol.name())?;
    if decoded.repeat {
        w.write_str(" (Repeat)")?;
    }
    w.write_str("\nCode      : ")?;
    write_hex(w, decoded.value)?;
    writeln!(w, " ({} Bits)", decoded.bits)
}

/// Raw timing array and decoded constants
pub fn write_source_code<W: Write + ?Sized>(
    w: &mut W,
    decoded: &Decoded,
    capture: &RawCapture,
) -> fmt::Result {
    write!(w, "uint16_t rawData[{}] = {{", capture.len())?;
    for (i, duration) in capture.entries().iter().enumerate() {
        if i > 0 {
            w.write_str(", ")?;
        }
        write!(w, "{}", duration)?;
    }
    writeln!(w, "}};  // {} {:X}", decoded.protocol.name(), decoded.value)?;

    if decoded.address != 0 || decoded.command != 0 {
        writeln!(w, "uint32_t address = 0x{:X};", decoded.address)?;
        writeln!(w, "uint32_t command = 0x{:X};", decoded.command)?;
    }
    if decoded.protocol != Protocol::Unknown {
        writeln!(w, "uint64_t data = 0x{:X};", decoded.value)?;
    }
    Ok(())
}
