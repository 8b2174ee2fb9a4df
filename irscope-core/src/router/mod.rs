//! Presentation router
//!
//! Decides, on every poll tick, what the two sinks should show:
//!
//! - **Idle tick** (no event): once the clear window has passed, a small
//!   "ready" marker is drawn in the bottom-right corner. It tells the user
//!   that the next button press will start a fresh screen.
//! - **Event tick**: a verbose record goes to the text sink, then the screen
//!   is cleared (window expired) or appended to (same action), the compact
//!   summary is drawn, the panel is flushed and the render time recorded.
//!
//! Appended summaries can run past the bottom of the panel. What happens
//! then is up to the display sink's overflow policy.

pub mod format;
pub mod window;

use core::fmt;

pub use format::{ComplementHex, RecordContext, ValueHex, RECORD_BEGIN, RECORD_END};
pub use window::ClearWindow;

use crate::config::{PresentationConfig, ReceiverConfig};
use crate::event::DecodedEvent;
use crate::traits::{Color, DisplayError, DisplaySink, TextScale};

/// Errors from either output sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SinkError {
    /// Display sink failed
    Display(DisplayError),
    /// Text sink rejected a write
    Text,
}

impl From<DisplayError> for SinkError {
    fn from(e: DisplayError) -> Self {
        SinkError::Display(e)
    }
}

impl From<fmt::Error> for SinkError {
    fn from(_: fmt::Error) -> Self {
        SinkError::Text
    }
}

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// Nothing to draw
    Idle,
    /// Ready marker drawn this tick
    MarkerDrawn,
    /// Event rendered to both sinks
    Presented {
        /// Screen was cleared before drawing
        cleared: bool,
    },
}

/// Clear-window state machine and dual-format renderer
#[derive(Debug, Clone)]
pub struct PresentationRouter {
    window: ClearWindow,
    marker_size: u8,
    record: RecordContext,
}

impl PresentationRouter {
    /// Create a router
    ///
    /// The clear window comes from `presentation`; the receiver settings are
    /// only used to annotate diagnostic records.
    pub fn new(presentation: &PresentationConfig, receiver: &ReceiverConfig) -> Self {
        Self {
            window: ClearWindow::new(presentation.clear_window_ms),
            marker_size: presentation.marker_size,
            record: RecordContext {
                capture_buffer_size: receiver.capture_buffer_size,
                custom_tolerance: receiver
                    .has_custom_tolerance()
                    .then_some(receiver.tolerance_percent),
            },
        }
    }

    /// Clear-window state
    pub fn window(&self) -> &ClearWindow {
        &self.window
    }

    /// Milliseconds since the last event was shown
    pub fn since_last_shown(&self, now_ms: u64) -> u64 {
        self.window.elapsed(now_ms)
    }

    /// Process one poll tick
    pub fn tick<D, W>(
        &mut self,
        now_ms: u64,
        event: Option<&DecodedEvent>,
        display: &mut D,
        text: &mut W,
    ) -> Result<TickOutcome, SinkError>
    where
        D: DisplaySink + ?Sized,
        W: fmt::Write + ?Sized,
    {
        match event {
            Some(event) => self.present(now_ms, event, display, text),
            None => Ok(self.idle(now_ms, display)?),
        }
    }

    /// Idle tick: draw the ready marker once the window has passed
    ///
    /// The marker is drawn without clearing, and only once per idle period.
    pub fn idle<D>(&mut self, now_ms: u64, display: &mut D) -> Result<TickOutcome, DisplayError>
    where
        D: DisplaySink + ?Sized,
    {
        if !self.window.is_expired(now_ms) || self.window.marker_drawn() {
            return Ok(TickOutcome::Idle);
        }

        let (width, height) = display.size();
        let size = u32::from(self.marker_size);
        let x = width.saturating_sub(size) as i32;
        let y = height.saturating_sub(size) as i32;
        display.fill_rect(x, y, size, size, Color::Foreground)?;
        display.flush()?;

        self.window.mark_marker_drawn();
        Ok(TickOutcome::MarkerDrawn)
    }

    /// Event tick: render to both sinks
    ///
    /// The text record is written first and independently of the display;
    /// a text sink error is reported only after the display was updated.
    pub fn present<D, W>(
        &mut self,
        now_ms: u64,
        event: &DecodedEvent,
        display: &mut D,
        text: &mut W,
    ) -> Result<TickOutcome, SinkError>
    where
        D: DisplaySink + ?Sized,
        W: fmt::Write + ?Sized,
    {
        let text_result = format::write_record(text, event, &self.record);

        let cleared = self.window.is_expired(now_ms);
        if cleared {
            display.clear()?;
            self.window.reset_marker();
            display.set_cursor(0, 0);
        }

        display.set_text_scale(TextScale::Small);
        format::draw_summary(display, event)?;
        display.flush()?;

        self.window.mark_shown(now_ms);

        text_result?;
        Ok(TickOutcome::Presented { cleared })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::string::String as StdString;
    use std::vec::Vec;

    /// Display operation, as recorded by the mock sink
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Op {
        Clear,
        Cursor(i32, i32),
        Scale(TextScale),
        Text(StdString),
        Rect(i32, i32, u32, u32, Color),
        Flush,
    }

    /// Display sink that records every call
    pub struct RecordingDisplay {
        pub ops: Vec<Op>,
        pub cursor: (i32, i32),
        pub fail_flush: bool,
    }

    impl RecordingDisplay {
        pub fn new() -> Self {
            Self {
                ops: Vec::new(),
                cursor: (0, 0),
                fail_flush: false,
            }
        }

        /// Text lines drawn since the last clear
        pub fn lines_since_clear(&self) -> Vec<StdString> {
            let start = self
                .ops
                .iter()
                .rposition(|op| *op == Op::Clear)
                .map_or(0, |i| i + 1);
            let mut text = StdString::new();
            for op in &self.ops[start..] {
                if let Op::Text(t) = op {
                    text.push_str(t);
                }
            }
            text.lines().map(StdString::from).collect()
        }

        pub fn count(&self, wanted: &Op) -> usize {
            self.ops.iter().filter(|op| *op == wanted).count()
        }

        pub fn has_rect(&self) -> bool {
            self.ops.iter().any(|op| matches!(op, Op::Rect(..)))
        }
    }

    impl DisplaySink for RecordingDisplay {
        fn clear(&mut self) -> Result<(), DisplayError> {
            self.ops.push(Op::Clear);
            Ok(())
        }

        fn set_cursor(&mut self, x: i32, y: i32) {
            self.cursor = (x, y);
            self.ops.push(Op::Cursor(x, y));
        }

        fn cursor(&self) -> (i32, i32) {
            self.cursor
        }

        fn set_text_scale(&mut self, scale: TextScale) {
            self.ops.push(Op::Scale(scale));
        }

        fn draw_text(&mut self, text: &str) -> Result<(), DisplayError> {
            for ch in text.chars() {
                if ch == '\n' {
                    self.cursor = (0, self.cursor.1 + 8);
                } else {
                    self.cursor.0 += 6;
                }
            }
            self.ops.push(Op::Text(StdString::from(text)));
            Ok(())
        }

        fn fill_rect(
            &mut self,
            x: i32,
            y: i32,
            width: u32,
            height: u32,
            color: Color,
        ) -> Result<(), DisplayError> {
            self.ops.push(Op::Rect(x, y, width, height, color));
            Ok(())
        }

        fn flush(&mut self) -> Result<(), DisplayError> {
            if self.fail_flush {
                return Err(DisplayError::Communication);
            }
            self.ops.push(Op::Flush);
            Ok(())
        }

        fn size(&self) -> (u32, u32) {
            (128, 64)
        }
    }

    pub fn nec_event() -> DecodedEvent {
        let mut event = DecodedEvent::new("NEC");
        event.address = Some(0x04);
        event.command = Some(0x02);
        event.value = 0x20DF40BF;
        event.bits = 32;
        let _ = event.hex_code.push_str("0x20DF40BF");
        let _ = event
            .human_readable
            .push_str("Protocol  : NEC\nCode      : 0x20DF40BF (32 Bits)\n");
        event
    }

    pub fn samsung_event() -> DecodedEvent {
        let mut event = DecodedEvent::new("SAMSUNG");
        event.address = Some(0x07);
        event.command = Some(0x02);
        event.value = 0xE0E040BF;
        event.bits = 32;
        let _ = event.hex_code.push_str("0xE0E040BF");
        event
    }

    fn router() -> PresentationRouter {
        PresentationRouter::new(&PresentationConfig::default(), &ReceiverConfig::default())
    }

    #[test]
    fn test_scenario_a_clears_and_draws_summary() {
        let mut router = router();
        let mut display = RecordingDisplay::new();
        let mut text = StdString::new();

        let outcome = router
            .tick(5_000, Some(&nec_event()), &mut display, &mut text)
            .unwrap();

        assert_eq!(outcome, TickOutcome::Presented { cleared: true });
        assert_eq!(display.ops[0], Op::Clear);
        assert_eq!(display.ops[1], Op::Cursor(0, 0));
        assert_eq!(display.ops[2], Op::Scale(TextScale::Small));
        assert_eq!(
            display.lines_since_clear(),
            ["Protocol: NEC", "Code: 0x20DF40BF", "Address: 0x04FB (4)", "Command: 0x02FD (2)"]
        );
        assert_eq!(display.ops.last(), Some(&Op::Flush));
        assert!(text.starts_with(RECORD_BEGIN));
        assert!(text.trim_end().ends_with(RECORD_END));
        assert_eq!(router.window().last_shown_ms(), 5_000);
    }

    #[test]
    fn test_scenario_b_appends_within_window() {
        let mut router = router();
        let mut display = RecordingDisplay::new();
        let mut text = StdString::new();

        router
            .tick(5_000, Some(&nec_event()), &mut display, &mut text)
            .unwrap();
        let cursor_after_a = display.cursor();

        let outcome = router
            .tick(5_500, Some(&samsung_event()), &mut display, &mut text)
            .unwrap();

        assert_eq!(outcome, TickOutcome::Presented { cleared: false });
        assert_eq!(display.count(&Op::Clear), 1);
        assert_eq!(cursor_after_a, (0, 32));
        let lines = display.lines_since_clear();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[4], "Protocol: SAMSUNG");
        assert_eq!(lines[6], "Address: 0x07F8 (7)");
    }

    #[test]
    fn test_scenario_c_marker_after_window() {
        let mut router = router();
        let mut display = RecordingDisplay::new();
        let mut text = StdString::new();

        router
            .tick(5_000, Some(&nec_event()), &mut display, &mut text)
            .unwrap();
        display.ops.clear();

        assert_eq!(
            router.tick(6_999, None, &mut display, &mut text).unwrap(),
            TickOutcome::Idle
        );
        assert!(!display.has_rect());

        assert_eq!(
            router.tick(7_500, None, &mut display, &mut text).unwrap(),
            TickOutcome::MarkerDrawn
        );
        assert_eq!(
            display.ops,
            [Op::Rect(126, 62, 2, 2, Color::Foreground), Op::Flush]
        );
        assert_eq!(router.window().last_shown_ms(), 5_000);

        // Drawn once per idle period
        assert_eq!(
            router.tick(7_510, None, &mut display, &mut text).unwrap(),
            TickOutcome::Idle
        );
        assert_eq!(display.ops.len(), 2);

        // Next event clears the marker away
        let outcome = router
            .tick(7_600, Some(&nec_event()), &mut display, &mut text)
            .unwrap();
        assert_eq!(outcome, TickOutcome::Presented { cleared: true });
        assert!(!router.window().marker_drawn());
    }

    #[test]
    fn test_window_boundary() {
        let mut router = router();
        let mut display = RecordingDisplay::new();
        let mut text = StdString::new();

        router
            .tick(10_000, Some(&nec_event()), &mut display, &mut text)
            .unwrap();

        let at_boundary = router
            .tick(12_000, Some(&nec_event()), &mut display, &mut text)
            .unwrap();
        assert_eq!(at_boundary, TickOutcome::Presented { cleared: false });

        let past_boundary = router
            .tick(14_001, Some(&nec_event()), &mut display, &mut text)
            .unwrap();
        assert_eq!(past_boundary, TickOutcome::Presented { cleared: true });
    }

    #[test]
    fn test_marker_never_drawn_with_event() {
        let mut router = router();
        let mut display = RecordingDisplay::new();
        let mut text = StdString::new();

        router
            .tick(9_000, Some(&nec_event()), &mut display, &mut text)
            .unwrap();
        assert!(!display.has_rect());
    }

    #[test]
    fn test_zero_fields_suppressed_on_display() {
        let mut router = router();
        let mut display = RecordingDisplay::new();
        let mut text = StdString::new();

        let mut event = DecodedEvent::new("UNKNOWN");
        event.value = 0x1A2B3C4D;
        let _ = event.hex_code.push_str("0x1A2B3C4D");
        router
            .tick(3_000, Some(&event), &mut display, &mut text)
            .unwrap();

        assert_eq!(
            display.lines_since_clear(),
            ["Protocol: UNKNOWN", "Code: 0x1A2B3C4D"]
        );
        assert!(!text.contains("Address"));
        assert!(!text.contains("Command"));
    }

    #[test]
    fn test_explicit_zero_fields_suppressed_in_both_sinks() {
        let mut router = router();
        let mut display = RecordingDisplay::new();
        let mut text = StdString::new();

        let mut event = nec_event();
        event.address = Some(0);
        router
            .tick(3_000, Some(&event), &mut display, &mut text)
            .unwrap();

        assert_eq!(
            display.lines_since_clear(),
            ["Protocol: NEC", "Code: 0x20DF40BF", "Command: 0x02FD (2)"]
        );
        assert!(!text.contains("Address"));
        assert!(text.contains("Command: 0x02FD (2)"));
    }

    #[test]
    fn test_custom_clear_window() {
        let presentation = PresentationConfig {
            clear_window_ms: 500,
            ..Default::default()
        };
        let mut router = PresentationRouter::new(&presentation, &ReceiverConfig::default());
        let mut display = RecordingDisplay::new();
        let mut text = StdString::new();

        router
            .tick(1_000, Some(&nec_event()), &mut display, &mut text)
            .unwrap();
        let outcome = router
            .tick(1_600, Some(&nec_event()), &mut display, &mut text)
            .unwrap();
        assert_eq!(outcome, TickOutcome::Presented { cleared: true });
        assert_eq!(router.since_last_shown(1_750), 150);
    }

    #[test]
    fn test_custom_tolerance_annotated() {
        let receiver = ReceiverConfig {
            tolerance_percent: 40,
            ..Default::default()
        };
        let mut router = PresentationRouter::new(&PresentationConfig::default(), &receiver);
        let mut display = RecordingDisplay::new();
        let mut text = StdString::new();

        router
            .tick(3_000, Some(&nec_event()), &mut display, &mut text)
            .unwrap();
        assert!(text.contains("Tolerance : 40%"));
    }

    #[test]
    fn test_flush_failure_leaves_window_untouched() {
        let mut router = router();
        let mut display = RecordingDisplay::new();
        display.fail_flush = true;
        let mut text = StdString::new();

        let result = router.tick(3_000, Some(&nec_event()), &mut display, &mut text);
        assert_eq!(result, Err(SinkError::Display(DisplayError::Communication)));
        assert_eq!(router.window().last_shown_ms(), 0);
        // The text record still went out
        assert!(text.contains(RECORD_END));
    }

    #[test]
    fn test_marker_redrawn_after_failed_clearing_render() {
        let mut router = router();
        let mut display = RecordingDisplay::new();
        let mut text = StdString::new();

        router
            .tick(5_000, Some(&nec_event()), &mut display, &mut text)
            .unwrap();
        assert_eq!(
            router.tick(7_500, None, &mut display, &mut text).unwrap(),
            TickOutcome::MarkerDrawn
        );

        display.fail_flush = true;
        assert!(router
            .tick(7_600, Some(&nec_event()), &mut display, &mut text)
            .is_err());
        assert!(router.window().is_expired(7_700));

        display.fail_flush = false;
        assert_eq!(
            router.tick(7_700, None, &mut display, &mut text).unwrap(),
            TickOutcome::MarkerDrawn
        );
    }

    #[test]
    fn test_text_failure_still_updates_display() {
        let mut router = router();
        let mut display = RecordingDisplay::new();
        let mut text: heapless::String<16> = heapless::String::new();

        let result = router.tick(3_000, Some(&nec_event()), &mut display, &mut text);
        assert_eq!(result, Err(SinkError::Text));
        assert_eq!(display.ops.last(), Some(&Op::Flush));
        assert_eq!(router.window().last_shown_ms(), 3_000);
    }
}
