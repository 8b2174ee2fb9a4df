//! Capture poller
//!
//! Drains the decode engine once per tick and filters out repeat codes.
//! Repeats neither clear nor redraw anything; they are only counted.

use crate::event::DecodedEvent;
use crate::traits::DecodeEngine;

/// Poller statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollerStats {
    /// Events forwarded to the router
    pub decoded: u32,
    /// Repeat codes dropped
    pub repeats: u32,
    /// Forwarded events that had the overflow flag set
    pub overflows: u32,
    /// Time of the last forwarded event (ms)
    pub last_decode_ms: Option<u64>,
}

/// Non-blocking poller over a decode engine
pub struct CapturePoller<E: DecodeEngine> {
    engine: E,
    stats: PollerStats,
}

impl<E: DecodeEngine> CapturePoller<E> {
    /// Create a poller that owns the engine
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            stats: PollerStats::default(),
        }
    }

    /// Ask the engine for one complete, non-repeat event
    ///
    /// Calls [`DecodeEngine::try_decode`] exactly once. Overflowed events are
    /// returned unchanged; the flag is a data quality annotation, not an
    /// error. `now_ms` only stamps the statistics.
    pub fn poll(&mut self, now_ms: u64) -> Option<DecodedEvent> {
        let event = self.engine.try_decode()?;

        if event.repeat {
            self.stats.repeats = self.stats.repeats.wrapping_add(1);
            return None;
        }

        self.stats.decoded = self.stats.decoded.wrapping_add(1);
        if event.overflow {
            self.stats.overflows = self.stats.overflows.wrapping_add(1);
        }
        self.stats.last_decode_ms = Some(now_ms);

        Some(event)
    }

    /// Statistics since creation
    pub fn stats(&self) -> &PollerStats {
        &self.stats
    }

    /// Borrow the engine
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Mutably borrow the engine
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Engine that hands out queued results, one per call
    pub struct QueuedEngine {
        pub queue: VecDeque<Option<DecodedEvent>>,
        pub calls: usize,
    }

    impl QueuedEngine {
        pub fn new() -> Self {
            Self {
                queue: VecDeque::new(),
                calls: 0,
            }
        }

        pub fn push(&mut self, event: DecodedEvent) {
            self.queue.push_back(Some(event));
        }

        pub fn push_idle(&mut self) {
            self.queue.push_back(None);
        }
    }

    impl DecodeEngine for QueuedEngine {
        fn try_decode(&mut self) -> Option<DecodedEvent> {
            self.calls += 1;
            self.queue.pop_front().flatten()
        }
    }

    fn repeat_event() -> DecodedEvent {
        let mut event = DecodedEvent::new("NEC");
        event.repeat = true;
        event
    }

    #[test]
    fn test_nothing_pending() {
        let mut poller = CapturePoller::new(QueuedEngine::new());
        assert_eq!(poller.poll(100), None);
        assert_eq!(poller.engine().calls, 1);
        assert_eq!(*poller.stats(), PollerStats::default());
    }

    #[test]
    fn test_forwards_event_unchanged() {
        let mut engine = QueuedEngine::new();
        let mut event = DecodedEvent::new("NEC");
        event.address = Some(4);
        engine.push(event.clone());

        let mut poller = CapturePoller::new(engine);
        assert_eq!(poller.poll(250), Some(event));
        assert_eq!(poller.stats().decoded, 1);
        assert_eq!(poller.stats().last_decode_ms, Some(250));
    }

    #[test]
    fn test_repeat_suppressed() {
        let mut engine = QueuedEngine::new();
        engine.push(repeat_event());
        engine.push(repeat_event());

        let mut poller = CapturePoller::new(engine);
        assert_eq!(poller.poll(10), None);
        assert_eq!(poller.poll(20), None);
        assert_eq!(poller.stats().repeats, 2);
        assert_eq!(poller.stats().decoded, 0);
        assert_eq!(poller.stats().last_decode_ms, None);
    }

    #[test]
    fn test_overflow_propagated() {
        let mut engine = QueuedEngine::new();
        let mut event = DecodedEvent::new("UNKNOWN");
        event.overflow = true;
        engine.push(event);

        let mut poller = CapturePoller::new(engine);
        let polled = poller.poll(5).unwrap();
        assert!(polled.overflow);
        assert_eq!(poller.stats().overflows, 1);
    }

    #[test]
    fn test_one_engine_call_per_poll() {
        let mut engine = QueuedEngine::new();
        engine.push_idle();
        engine.push(DecodedEvent::new("NEC"));
        engine.push(repeat_event());

        let mut poller = CapturePoller::new(engine);
        assert!(poller.poll(0).is_none());
        assert!(poller.poll(10).is_some());
        assert!(poller.poll(20).is_none());
        assert_eq!(poller.engine().calls, 3);
    }
}
