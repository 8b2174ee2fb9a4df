//! Text canvas
//!
//! [`DisplaySink`] over any [`Panel`]. Text is drawn with the
//! `embedded-graphics` mono fonts, top-aligned at the cursor; `\n` moves the
//! cursor to the start of the next line.
//!
//! A line that would cross the bottom edge is handled by the configured
//! [`OverflowPolicy`]:
//!
//! - `Clip`: drawn anyway, pixels past the edge are discarded
//! - `Wrap`: the cursor returns to the top and each line band is blanked
//!   before it is drawn over
//! - `TruncateOldest`: the oldest lines are dropped and the rest redrawn
//!   from the top
//!
//! `TruncateOldest` needs the text of every line since the last clear, so
//! the canvas keeps a short line history.

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_5X8, FONT_7X13, FONT_9X18};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use heapless::{Deque, String};
use irscope_core::config::OverflowPolicy;
use irscope_core::traits::{Color, DisplayError, DisplaySink, TextScale};

use crate::panel::Panel;

/// Lines remembered for redraw
pub const HISTORY_LINES: usize = 16;

/// Characters remembered per line
pub const HISTORY_LINE_LEN: usize = 48;

/// Font used for a text scale
pub fn font(scale: TextScale) -> &'static MonoFont<'static> {
    match scale {
        TextScale::Small => &FONT_5X8,
        TextScale::Medium => &FONT_7X13,
        TextScale::Large => &FONT_9X18,
        TextScale::XLarge => &FONT_10X20,
    }
}

/// Line height in pixels for a text scale
pub fn line_height(scale: TextScale) -> i32 {
    font(scale).character_size.height as i32
}

fn binary(color: Color) -> BinaryColor {
    match color {
        Color::Background => BinaryColor::Off,
        Color::Foreground => BinaryColor::On,
    }
}

/// One line of text as drawn
#[derive(Debug, Clone)]
struct HistoryLine {
    text: String<HISTORY_LINE_LEN>,
    scale: TextScale,
}

impl HistoryLine {
    fn new(scale: TextScale) -> Self {
        Self {
            text: String::new(),
            scale,
        }
    }
}

/// Text and graphics surface over a panel
pub struct TextCanvas<P: Panel> {
    panel: P,
    cursor: Point,
    scale: TextScale,
    policy: OverflowPolicy,
    /// Cursor went back to the top under `Wrap` since the last clear
    wrapped: bool,
    /// Lines since the last clear; the back entry is the line being drawn
    history: Deque<HistoryLine, HISTORY_LINES>,
}

impl<P: Panel> TextCanvas<P> {
    /// Create a canvas with the cursor at the origin
    pub fn new(panel: P, policy: OverflowPolicy) -> Self {
        let mut canvas = Self {
            panel,
            cursor: Point::zero(),
            scale: TextScale::default(),
            policy,
            wrapped: false,
            history: Deque::new(),
        };
        canvas.reset_history();
        canvas
    }

    /// Borrow the panel
    pub fn panel(&self) -> &P {
        &self.panel
    }

    fn height(&self) -> i32 {
        self.panel.bounding_box().size.height as i32
    }

    fn reset_history(&mut self) {
        self.history.clear();
        let _ = self.history.push_back(HistoryLine::new(self.scale));
    }

    /// Start a new history line, dropping the oldest when full
    fn push_history_line(&mut self) {
        if self.history.is_full() {
            self.history.pop_front();
        }
        let _ = self.history.push_back(HistoryLine::new(self.scale));
    }

    fn record(&mut self, segment: &str) {
        if let Some(line) = self.history.back_mut() {
            if line.text.is_empty() {
                line.scale = self.scale;
            }
            for ch in segment.chars() {
                if line.text.push(ch).is_err() {
                    break;
                }
            }
        }
    }

    fn blank_band(&mut self, y: i32, height: i32) -> Result<(), DisplayError> {
        let width = self.panel.bounding_box().size.width;
        Rectangle::new(Point::new(0, y), Size::new(width, height as u32))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::Off))
            .draw(&mut self.panel)
            .map_err(|_| DisplayError::Communication)
    }

    /// Apply the overflow policy before a line starts at the cursor
    fn make_room(&mut self) -> Result<(), DisplayError> {
        let lh = line_height(self.scale);
        let overflows = self.cursor.y + lh > self.height();

        match self.policy {
            OverflowPolicy::Clip => Ok(()),
            OverflowPolicy::Wrap => {
                if overflows {
                    self.cursor = Point::zero();
                    self.wrapped = true;
                }
                if self.wrapped {
                    self.blank_band(self.cursor.y, lh)?;
                }
                Ok(())
            }
            OverflowPolicy::TruncateOldest => {
                if overflows {
                    self.truncate_oldest(lh)?;
                }
                Ok(())
            }
        }
    }

    /// Drop complete lines from the top until a line of height `lh` fits,
    /// then redraw the survivors
    fn truncate_oldest(&mut self, lh: i32) -> Result<(), DisplayError> {
        let height = self.height();
        let complete = |history: &Deque<HistoryLine, HISTORY_LINES>| -> i32 {
            history
                .iter()
                .take(history.len().saturating_sub(1))
                .map(|line| line_height(line.scale))
                .sum()
        };

        while self.history.len() > 1 && complete(&self.history) + lh > height {
            self.history.pop_front();
        }

        self.panel.clear_buffer();
        let mut y = 0;
        let kept = self.history.len() - 1;
        for line in self.history.iter().take(kept) {
            let style = MonoTextStyle::new(font(line.scale), BinaryColor::On);
            Text::with_baseline(&line.text, Point::new(0, y), style, Baseline::Top)
                .draw(&mut self.panel)
                .map_err(|_| DisplayError::Communication)?;
            y += line_height(line.scale);
        }
        self.cursor = Point::new(0, y);
        Ok(())
    }

    fn draw_segment(&mut self, segment: &str) -> Result<(), DisplayError> {
        if segment.is_empty() {
            return Ok(());
        }
        if self.cursor.x == 0 {
            self.make_room()?;
        }

        let style = MonoTextStyle::new(font(self.scale), BinaryColor::On);
        let next = Text::with_baseline(segment, self.cursor, style, Baseline::Top)
            .draw(&mut self.panel)
            .map_err(|_| DisplayError::Communication)?;
        self.cursor.x = next.x;
        self.record(segment);
        Ok(())
    }

    fn new_line(&mut self) {
        self.cursor = Point::new(0, self.cursor.y + line_height(self.scale));
        self.push_history_line();
    }
}

impl<P: Panel> DisplaySink for TextCanvas<P> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.panel.clear_buffer();
        self.wrapped = false;
        self.reset_history();
        Ok(())
    }

    fn set_cursor(&mut self, x: i32, y: i32) {
        self.cursor = Point::new(x, y);
    }

    fn cursor(&self) -> (i32, i32) {
        (self.cursor.x, self.cursor.y)
    }

    fn set_text_scale(&mut self, scale: TextScale) {
        self.scale = scale;
    }

    fn draw_text(&mut self, text: &str) -> Result<(), DisplayError> {
        let mut segments = text.split('\n');
        if let Some(first) = segments.next() {
            self.draw_segment(first)?;
        }
        for segment in segments {
            self.new_line();
            self.draw_segment(segment)?;
        }
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
        Rectangle::new(Point::new(x, y), Size::new(width, height))
            .into_styled(PrimitiveStyle::with_fill(binary(color)))
            .draw(&mut self.panel)
            .map_err(|_| DisplayError::Communication)
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.panel.flush()
    }

    fn size(&self) -> (u32, u32) {
        let size = self.panel.bounding_box().size;
        (size.width, size.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::Framebuffer;
    use irscope_core::config::{PresentationConfig, ReceiverConfig};
    use irscope_core::router::{PresentationRouter, TickOutcome};
    use irscope_core::traits::DisplaySinkExt;
    use irscope_core::DecodedEvent;
    use std::format;
    use std::string::String as StdString;

    fn canvas(policy: OverflowPolicy) -> TextCanvas<Framebuffer> {
        TextCanvas::new(Framebuffer::default(), policy)
    }

    fn draw_lines(canvas: &mut TextCanvas<Framebuffer>, range: core::ops::RangeInclusive<u32>) {
        for i in range {
            canvas.draw_line(&format!("Line {}", i)).unwrap();
        }
    }

    #[test]
    fn test_small_scale_fits_eight_lines() {
        assert_eq!(line_height(TextScale::Small), 8);
        let mut c = canvas(OverflowPolicy::Clip);
        draw_lines(&mut c, 1..=8);
        assert_eq!(c.cursor(), (0, 64));
        assert!(c.panel().lit_in(0, 56, 128, 8) > 0);
    }

    #[test]
    fn test_cursor_advances_along_line() {
        let mut c = canvas(OverflowPolicy::Clip);
        c.draw_text("Code: ").unwrap();
        assert_eq!(c.cursor(), (30, 0));
        c.draw_text("0x20DF40BF").unwrap();
        assert_eq!(c.cursor(), (80, 0));
    }

    #[test]
    fn test_clear_blanks_surface() {
        let mut c = canvas(OverflowPolicy::Clip);
        draw_lines(&mut c, 1..=3);
        c.clear().unwrap();
        assert_eq!(c.panel().lit_in(0, 0, 128, 64), 0);
    }

    #[test]
    fn test_clip_draws_past_bottom() {
        let mut c = canvas(OverflowPolicy::Clip);
        draw_lines(&mut c, 1..=10);
        assert_eq!(c.cursor(), (0, 80));

        let mut reference = canvas(OverflowPolicy::Clip);
        draw_lines(&mut reference, 1..=8);
        assert!(c.panel() == reference.panel());
    }

    #[test]
    fn test_wrap_overwrites_top_band() {
        let mut c = canvas(OverflowPolicy::Wrap);
        draw_lines(&mut c, 1..=9);
        assert_eq!(c.cursor(), (0, 8));

        let mut reference = canvas(OverflowPolicy::Clip);
        reference.draw_line("Line 9").unwrap();
        draw_lines(&mut reference, 2..=8);
        assert!(c.panel() == reference.panel());
    }

    #[test]
    fn test_truncate_oldest_scrolls() {
        let mut c = canvas(OverflowPolicy::TruncateOldest);
        draw_lines(&mut c, 1..=10);
        assert_eq!(c.cursor(), (0, 64));

        let mut reference = canvas(OverflowPolicy::Clip);
        draw_lines(&mut reference, 3..=10);
        assert!(c.panel() == reference.panel());
    }

    #[test]
    fn test_fill_rect_marker() {
        let mut c = canvas(OverflowPolicy::Clip);
        c.fill_rect(126, 62, 2, 2, Color::Foreground).unwrap();
        assert_eq!(c.panel().lit_in(126, 62, 2, 2), 4);
        assert_eq!(c.panel().lit_in(0, 0, 128, 64), 4);
    }

    #[test]
    fn test_router_scenarios_on_framebuffer() {
        let mut router =
            PresentationRouter::new(&PresentationConfig::default(), &ReceiverConfig::default());
        let mut c = canvas(OverflowPolicy::Clip);
        let mut text = StdString::new();

        let mut nec = DecodedEvent::new("NEC");
        nec.address = Some(4);
        nec.command = Some(2);
        nec.value = 0x20DF40BF;
        let _ = nec.hex_code.push_str("0x20DF40BF");

        c.draw_text("splash").unwrap();
        let outcome = router.tick(5_000, Some(&nec), &mut c, &mut text).unwrap();
        assert_eq!(outcome, TickOutcome::Presented { cleared: true });
        assert_eq!(c.cursor(), (0, 32));

        let mut expected = canvas(OverflowPolicy::Clip);
        for line in [
            "Protocol: NEC",
            "Code: 0x20DF40BF",
            "Address: 0x04FB (4)",
            "Command: 0x02FD (2)",
        ] {
            expected.draw_line(line).unwrap();
        }
        assert!(c.panel() == expected.panel());

        router.tick(5_500, Some(&nec), &mut c, &mut text).unwrap();
        assert_eq!(c.cursor(), (0, 64));

        assert_eq!(router.tick(8_000, None, &mut c, &mut text).unwrap(), TickOutcome::MarkerDrawn);
        assert_eq!(c.panel().lit_in(126, 62, 2, 2), 4);

        router.tick(8_100, Some(&nec), &mut c, &mut text).unwrap();
        assert_eq!(c.panel().lit_in(126, 62, 2, 2), 0);
    }
}
