//! IR capture task
//!
//! Times receiver edges into a [`RawCapture`] and hands each finished pulse
//! train to the poll loop.

use core::mem;

use defmt::*;
use irscope_drivers::RawCapture;
use irscope_hal_rp2040::IrReceiver;

use crate::channels::CAPTURE_SIGNAL;

/// Capture task - one pulse train per message timeout
#[embassy_executor::task]
pub async fn capture_task(mut receiver: IrReceiver, limit: u16) {
    info!("Capture task started (buffer {} entries)", limit);

    let mut capture = RawCapture::new(limit);

    loop {
        receiver.wait_for_mark().await;

        // Edges past the buffer limit only set the overflow flag, but are
        // still consumed so the next capture starts on a fresh message.
        while let Some(duration_us) = receiver.next_edge().await {
            capture.push(duration_us);
        }

        trace!(
            "Capture complete: {} entries, overflow={}",
            capture.len(),
            capture.overflow()
        );

        CAPTURE_SIGNAL.signal(mem::replace(&mut capture, RawCapture::new(limit)));
    }
}
