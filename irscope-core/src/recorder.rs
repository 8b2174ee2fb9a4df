//! Recorder context
//!
//! The single long-lived owner of everything the poll loop touches: the
//! capture poller (and through it the decode engine), the presentation
//! router with its clear-window state, and both output sinks. Built once at
//! bring-up; a device reset is the only way to start over.

use core::fmt::Write;

use crate::config::{PinConfig, RecorderConfig};
use crate::poller::{CapturePoller, PollerStats};
use crate::router::{ClearWindow, PresentationRouter, SinkError, TickOutcome};
use crate::traits::{DecodeEngine, DisplaySink, DisplaySinkExt, TextScale};

/// Boot splash shown until the first event arrives
pub const SPLASH_TEXT: &str = "Waiting\nfor\nIR Code...";

/// IR code recorder
pub struct Recorder<E, D, W>
where
    E: DecodeEngine,
    D: DisplaySink,
    W: Write,
{
    poller: CapturePoller<E>,
    router: PresentationRouter,
    display: D,
    text: W,
    receive_pin: PinConfig,
}

impl<E, D, W> Recorder<E, D, W>
where
    E: DecodeEngine,
    D: DisplaySink,
    W: Write,
{
    /// Create a recorder from an initialised engine and sinks
    pub fn new(engine: E, display: D, text: W, config: &RecorderConfig) -> Self {
        Self {
            poller: CapturePoller::new(engine),
            router: PresentationRouter::new(&config.presentation, &config.receiver),
            display,
            text,
            receive_pin: config.receiver.pin,
        }
    }

    /// Show the boot splash
    pub fn show_splash(&mut self) -> Result<(), SinkError> {
        self.display.clear()?;
        self.display.set_cursor(0, 0);
        self.display.set_text_scale(TextScale::Medium);
        self.display.draw_line(SPLASH_TEXT)?;
        self.display.flush()?;
        Ok(())
    }

    /// Write the start-up banner to the text sink
    pub fn announce(&mut self) -> Result<(), SinkError> {
        writeln!(
            self.text,
            "\nIRscope is now running and waiting for IR input on Pin {}",
            self.receive_pin.pin
        )?;
        Ok(())
    }

    /// Run one poll tick
    pub fn tick(&mut self, now_ms: u64) -> Result<TickOutcome, SinkError> {
        let event = self.poller.poll(now_ms);
        self.router
            .tick(now_ms, event.as_ref(), &mut self.display, &mut self.text)
    }

    /// Clear-window state
    pub fn window(&self) -> &ClearWindow {
        self.router.window()
    }

    /// Milliseconds since the last event was shown
    pub fn since_last_shown(&self, now_ms: u64) -> u64 {
        self.router.since_last_shown(now_ms)
    }

    /// Poller statistics
    pub fn stats(&self) -> &PollerStats {
        self.poller.stats()
    }

    /// Borrow the display sink
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Borrow the text sink
    pub fn text(&self) -> &W {
        &self.text
    }

    /// Mutably borrow the decode engine
    pub fn engine_mut(&mut self) -> &mut E {
        self.poller.engine_mut()
    }
}
