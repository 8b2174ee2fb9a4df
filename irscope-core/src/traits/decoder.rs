//! Decode engine trait

use crate::event::DecodedEvent;

/// Infrared decode engine
///
/// Demodulated pulse trains are captured and decoded outside the recorder
/// logic. The engine buffers at most one pending decode; the poller drains it
/// once per tick.
pub trait DecodeEngine {
    /// Take the next complete decode, if one is ready
    ///
    /// Must not block. Returns `None` when no complete pulse train has been
    /// captured since the last call. Repeat codes are returned like any other
    /// decode; filtering them is the caller's business.
    fn try_decode(&mut self) -> Option<DecodedEvent>;
}
