//! Clear-window timing state
//!
//! The IR protocol has no "button released" message, and one press can emit
//! several decodes with irregular gaps. Decodes closer together than the
//! window are treated as one user action and share the screen; anything
//! later starts a fresh screen.

/// Timing state for the clear decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClearWindow {
    /// Time of the last completed event render (ms)
    last_shown_ms: u64,
    /// Window length (ms)
    duration_ms: u32,
    /// Ready marker already drawn since the last render
    marker_drawn: bool,
}

impl ClearWindow {
    /// Create a window with the boot epoch as the last render time
    pub const fn new(duration_ms: u32) -> Self {
        Self {
            last_shown_ms: 0,
            duration_ms,
            marker_drawn: false,
        }
    }

    /// Milliseconds since the last render
    ///
    /// Saturates at zero if the clock reads earlier than the last render.
    pub fn elapsed(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.last_shown_ms)
    }

    /// Check if the next event should start a fresh screen
    ///
    /// Strictly greater: an event exactly `duration_ms` after the last one
    /// still belongs to the same action.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        self.elapsed(now_ms) > u64::from(self.duration_ms)
    }

    /// Record a completed render
    pub fn mark_shown(&mut self, now_ms: u64) {
        self.last_shown_ms = now_ms;
        self.marker_drawn = false;
    }

    /// Record that the ready marker is on the panel
    pub fn mark_marker_drawn(&mut self) {
        self.marker_drawn = true;
    }

    /// Record that the ready marker was wiped off the panel
    pub fn reset_marker(&mut self) {
        self.marker_drawn = false;
    }

    /// Check if the ready marker is on the panel
    pub fn marker_drawn(&self) -> bool {
        self.marker_drawn
    }

    /// Time of the last render (ms)
    pub fn last_shown_ms(&self) -> u64 {
        self.last_shown_ms
    }

    /// Window length (ms)
    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_is_not_expired() {
        let mut window = ClearWindow::new(2000);
        window.mark_shown(10_000);
        assert!(!window.is_expired(12_000));
        assert!(window.is_expired(12_001));
    }

    #[test]
    fn test_boot_epoch() {
        let window = ClearWindow::new(2000);
        assert_eq!(window.last_shown_ms(), 0);
        assert!(!window.is_expired(1_500));
        assert!(window.is_expired(2_500));
    }

    #[test]
    fn test_elapsed_saturates() {
        let mut window = ClearWindow::new(2000);
        window.mark_shown(5_000);
        assert_eq!(window.elapsed(4_000), 0);
        assert_eq!(window.elapsed(5_750), 750);
    }

    #[test]
    fn test_render_resets_marker() {
        let mut window = ClearWindow::new(2000);
        window.mark_marker_drawn();
        assert!(window.marker_drawn());
        window.mark_shown(3_000);
        assert!(!window.marker_drawn());
    }
}
