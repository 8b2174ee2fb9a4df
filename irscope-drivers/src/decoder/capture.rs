//! Raw capture buffer
//!
//! Holds one pulse train as alternating mark/space durations in
//! microseconds, starting with the first mark. The idle gap before the
//! first mark and the timeout gap after the last one are not stored.

use heapless::Vec;
use irscope_core::config::MAX_CAPTURE_SIZE;

/// Storage capacity in entries
pub const CAPTURE_CAPACITY: usize = MAX_CAPTURE_SIZE as usize;

/// One captured pulse train
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCapture {
    entries: Vec<u16, CAPTURE_CAPACITY>,
    limit: u16,
    overflow: bool,
}

impl RawCapture {
    /// Create an empty capture holding at most `limit` entries
    pub fn new(limit: u16) -> Self {
        Self {
            entries: Vec::new(),
            limit: limit.min(MAX_CAPTURE_SIZE),
            overflow: false,
        }
    }

    /// Build a capture from known durations (µs)
    ///
    /// Entries beyond the limit set the overflow flag.
    pub fn from_durations(limit: u16, durations: &[u32]) -> Self {
        let mut capture = Self::new(limit);
        for &duration in durations {
            capture.push(duration);
        }
        capture
    }

    /// Append a duration in microseconds
    ///
    /// Durations longer than `u16::MAX` are clamped. Returns `false` and
    /// sets the overflow flag once the buffer is full.
    pub fn push(&mut self, duration_us: u32) -> bool {
        if self.entries.len() >= usize::from(self.limit) {
            self.overflow = true;
            return false;
        }
        let duration = duration_us.min(u32::from(u16::MAX)) as u16;
        self.entries.push(duration).is_ok()
    }

    /// Forget all entries and the overflow flag
    pub fn clear(&mut self) {
        self.entries.clear();
        self.overflow = false;
    }

    /// Durations captured so far
    pub fn entries(&self) -> &[u16] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing was captured
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if the pulse train did not fit
    pub fn overflow(&self) -> bool {
        self.overflow
    }

    /// Entry limit
    pub fn limit(&self) -> u16 {
        self.limit
    }
}
