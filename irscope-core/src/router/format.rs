//! Output formatting for both sinks
//!
//! Address and command fields are shown as the raw byte followed by its
//! one's complement, mirroring how NEC-style remotes transmit them, plus the
//! decimal value: `0x04FB (4)`.

use core::fmt::{self, Write};

use heapless::String;

use crate::event::DecodedEvent;
use crate::traits::{DisplayError, DisplaySink, DisplaySinkExt};

/// First line of every diagnostic record
pub const RECORD_BEGIN: &str = "[====== IRSCOPE - BEGIN ======]";

/// Last line of every diagnostic record
pub const RECORD_END: &str = "[====== IRSCOPE - END ======]";

/// Maximum length of one display summary line
pub const SUMMARY_LINE_LEN: usize = 64;

/// Raw value, its complement byte, and the decimal value
///
/// The complement is taken over the low byte, so wide values still render
/// a two-digit complement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComplementHex(pub u64);

impl fmt::Display for ComplementHex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let complement = !(self.0 as u8);
        write!(f, "0x{:02X}{:02X} ({})", self.0, complement, self.0)
    }
}

/// 64-bit value as two zero-padded 32-bit hex groups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueHex(pub u64);

impl fmt::Display for ValueHex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let high = (self.0 >> 32) as u32;
        let low = self.0 as u32;
        write!(f, "0x{:08X}{:08X}", high, low)
    }
}

/// Address and command that are worth showing
///
/// Zero means "not applicable" however the engine reports it.
fn shown_fields(event: &DecodedEvent) -> (Option<u64>, Option<u64>) {
    let nonzero = |v: &u64| *v != 0;
    (event.address.filter(nonzero), event.command.filter(nonzero))
}

/// Settings that annotate a diagnostic record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordContext {
    /// Capture buffer size, named in the overflow warning
    pub capture_buffer_size: u16,
    /// Tolerance in effect, when it differs from the engine default
    pub custom_tolerance: Option<u8>,
}

/// Write the verbose diagnostic record for the text sink
pub fn write_record<W: Write + ?Sized>(
    w: &mut W,
    event: &DecodedEvent,
    ctx: &RecordContext,
) -> fmt::Result {
    writeln!(w, "{}", RECORD_BEGIN)?;
    writeln!(w, "Protocol: {}", event.protocol_name())?;

    if event.overflow {
        writeln!(
            w,
            "WARNING: IR code is too big for buffer (>= {}). \
             This result shouldn't be trusted until this is resolved. \
             Increase capture_buffer_size.",
            ctx.capture_buffer_size
        )?;
    }

    if let Some(tolerance) = ctx.custom_tolerance {
        writeln!(w, "Tolerance : {}%", tolerance)?;
    }

    writeln!(w, "[human-readable]:")?;
    write_block(w, &event.human_readable)?;

    if event.has_ac_description() {
        writeln!(w, "[ac-description]:")?;
        writeln!(w, "Mesg Desc.: {}", event.ac_description)?;
    }

    writeln!(w, "[source-code]:")?;
    write_block(w, &event.source_code)?;

    let (address, command) = shown_fields(event);
    if let Some(address) = address {
        writeln!(w, "Address: {}", ComplementHex(address))?;
    }
    if let Some(command) = command {
        writeln!(w, "Command: {}", ComplementHex(command))?;
    }
    if event.value != 0 {
        writeln!(w, "Value  : {}", ValueHex(event.value))?;
    }

    writeln!(w, "{}", RECORD_END)
}

/// Write engine-provided text, making sure it ends with a newline
fn write_block<W: Write + ?Sized>(w: &mut W, text: &str) -> fmt::Result {
    w.write_str(text)?;
    if !text.ends_with('\n') {
        w.write_char('\n')?;
    }
    Ok(())
}

/// Draw the compact summary at the display cursor
///
/// One field per line; lines too long for the buffer are cut short.
pub fn draw_summary<D: DisplaySink + ?Sized>(
    display: &mut D,
    event: &DecodedEvent,
) -> Result<(), DisplayError> {
    let mut line: String<SUMMARY_LINE_LEN> = String::new();

    let _ = write!(line, "Protocol: {}", event.protocol_name());
    display.draw_line(&line)?;

    line.clear();
    let _ = write!(line, "Code: {}", event.hex_code);
    display.draw_line(&line)?;

    let (address, command) = shown_fields(event);
    if let Some(address) = address {
        line.clear();
        let _ = write!(line, "Address: {}", ComplementHex(address));
        display.draw_line(&line)?;
    }

    if let Some(command) = command {
        line.clear();
        let _ = write!(line, "Command: {}", ComplementHex(command));
        display.draw_line(&line)?;
    }

    Ok(())
}
