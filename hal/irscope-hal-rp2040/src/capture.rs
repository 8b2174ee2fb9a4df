//! IR receiver edge timing
//!
//! A demodulating receiver module drives its output to the active level
//! while the 38 kHz carrier is present. Every edge ends one mark or space;
//! the time since the previous edge is that period's duration. A gap longer
//! than the message timeout ends the pulse train.

use embassy_rp::gpio::{AnyPin, Input, Pull};
use embassy_rp::Peri;
use embassy_time::{with_timeout, Duration, Instant};
use irscope_core::config::PinConfig;

/// Edge timer on the receiver output pin
pub struct IrReceiver {
    input: Input<'static>,
    active_low: bool,
    timeout: Duration,
    last_edge: Instant,
}

impl IrReceiver {
    /// Configure the receive pin
    ///
    /// `timeout_ms` is the gap after the last edge that ends a message.
    pub fn new(pin: Peri<'static, AnyPin>, config: &PinConfig, timeout_ms: u8) -> Self {
        let pull = if config.pull_up { Pull::Up } else { Pull::None };
        Self {
            input: Input::new(pin, pull),
            active_low: config.inverted,
            timeout: Duration::from_millis(u64::from(timeout_ms)),
            last_edge: Instant::now(),
        }
    }

    /// Wait for the first mark of a pulse train
    ///
    /// A mark already in progress has an unknown start, so it is skipped and
    /// timing begins at the next active edge.
    pub async fn wait_for_mark(&mut self) {
        if self.active_low {
            if self.input.is_low() {
                self.input.wait_for_rising_edge().await;
            }
            self.input.wait_for_falling_edge().await;
        } else {
            if self.input.is_high() {
                self.input.wait_for_falling_edge().await;
            }
            self.input.wait_for_rising_edge().await;
        }
        self.last_edge = Instant::now();
    }

    /// Duration in µs of the period that the next edge ends
    ///
    /// Returns `None` once the line has been quiet for the message timeout.
    pub async fn next_edge(&mut self) -> Option<u32> {
        with_timeout(self.timeout, self.input.wait_for_any_edge())
            .await
            .ok()?;
        let now = Instant::now();
        let elapsed = now.saturating_duration_since(self.last_edge);
        self.last_edge = now;
        Some(u32::try_from(elapsed.as_micros()).unwrap_or(u32::MAX))
    }
}
