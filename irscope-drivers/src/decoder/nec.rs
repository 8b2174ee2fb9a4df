//! NEC protocol decoder
//!
//! Frame: 9 ms leader mark, 4.5 ms space, 32 data bits (560 µs mark, then
//! 560 µs space for 0 or 1690 µs for 1), 560 µs stop mark. A held button
//! sends repeat frames: 9 ms mark, 2.25 ms space, stop mark.
//!
//! Bits are assembled MSB-first as received, so the familiar LG code
//! `0x20DF40BF` carries address `0x04` and command `0x02` in bit-reversed
//! bytes.

use super::timing::Tolerance;

const TICK: u32 = 560;
const HDR_MARK: u32 = 16 * TICK;
const HDR_SPACE: u32 = 8 * TICK;
const BIT_MARK: u32 = TICK;
const ONE_SPACE: u32 = 3 * TICK;
const ZERO_SPACE: u32 = TICK;
const RPT_SPACE: u32 = 4 * TICK;

/// Data bits in a full frame
pub const NEC_BITS: u16 = 32;

/// Entries in a full frame: leader pair, 32 bit pairs, stop mark
pub const FRAME_LEN: usize = 2 + 2 * NEC_BITS as usize + 1;

/// Entries in a repeat frame
pub const REPEAT_LEN: usize = 3;

/// Value reported for repeat frames
pub const REPEAT_VALUE: u32 = 0xFFFF_FFFF;

/// A decoded NEC transmission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Nec {
    /// Full frame
    Frame {
        /// Raw 32-bit value, MSB-first
        value: u32,
        /// 8-bit address, or 16-bit for the extended form
        address: u16,
        /// 8-bit command
        command: u8,
    },
    /// Button-held repeat
    Repeat,
}

/// Decode an NEC frame or repeat
pub fn decode(entries: &[u16], tol: Tolerance) -> Option<Nec> {
    if entries.len() < REPEAT_LEN || !tol.mark(entries[0], HDR_MARK) {
        return None;
    }

    if entries.len() <= REPEAT_LEN + 1
        && tol.space(entries[1], RPT_SPACE)
        && tol.mark(entries[2], BIT_MARK)
    {
        return Some(Nec::Repeat);
    }

    if entries.len() < FRAME_LEN || !tol.space(entries[1], HDR_SPACE) {
        return None;
    }

    let mut value: u32 = 0;
    for pair in entries[2..FRAME_LEN - 1].chunks_exact(2) {
        if !tol.mark(pair[0], BIT_MARK) {
            return None;
        }
        value <<= 1;
        if tol.space(pair[1], ONE_SPACE) {
            value |= 1;
        } else if !tol.space(pair[1], ZERO_SPACE) {
            return None;
        }
    }

    if !tol.mark(entries[FRAME_LEN - 1], BIT_MARK) {
        return None;
    }

    let command_raw = (value >> 8) as u8;
    if command_raw ^ 0xFF != value as u8 {
        return None;
    }

    let address = (value >> 24) as u8;
    let address_inv = (value >> 16) as u8;
    let address = if address ^ 0xFF == address_inv {
        u16::from(address.reverse_bits())
    } else {
        ((value >> 16) as u16).reverse_bits()
    };

    Some(Nec::Frame {
        value,
        address,
        command: command_raw.reverse_bits(),
    })
}

/// Build ideal frame timings for a value, MSB-first
#[cfg(test)]
pub(crate) fn frame_timings(value: u32) -> std::vec::Vec<u32> {
    let mut out = std::vec![9000, 4500];
    for bit in (0..32).rev() {
        out.push(560);
        out.push(if value & (1 << bit) != 0 { 1690 } else { 560 });
    }
    out.push(560);
    out
}
