//! Inter-task communication channels
//!
//! The capture task publishes finished pulse trains through a single-slot
//! signal; the poll loop drains it without blocking. A capture that arrives
//! before the previous one was taken replaces it.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use irscope_drivers::{CaptureSource, RawCapture};

/// Latest complete pulse train from the capture task
pub static CAPTURE_SIGNAL: Signal<CriticalSectionRawMutex, RawCapture> = Signal::new();

/// [`CaptureSource`] over [`CAPTURE_SIGNAL`]
pub struct SignalSource;

impl CaptureSource for SignalSource {
    fn try_take(&mut self) -> Option<RawCapture> {
        CAPTURE_SIGNAL.try_take()
    }
}
