//! Timing tolerance matching
//!
//! Demodulating receivers stretch marks and shorten spaces by a roughly
//! constant amount, so expected marks are lengthened and expected spaces
//! shortened by [`MARK_EXCESS_US`] before the percentage window is applied.

/// Typical mark stretch of a demodulating receiver (µs)
pub const MARK_EXCESS_US: u32 = 50;

/// Percentage timing slack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tolerance(u8);

impl Tolerance {
    /// Create a tolerance, capped at 100%
    pub const fn new(percent: u8) -> Self {
        if percent > 100 {
            Self(100)
        } else {
            Self(percent)
        }
    }

    /// Tolerance in percent
    pub const fn percent(self) -> u8 {
        self.0
    }

    /// Check a measured duration against an expected one
    pub fn matches(self, measured: u32, expected: u32) -> bool {
        let percent = u32::from(self.0);
        let low = expected * (100 - percent) / 100;
        let high = expected * (100 + percent) / 100 + 1;
        (low..=high).contains(&measured)
    }

    /// Check a measured mark (carrier on)
    pub fn mark(self, measured: u16, expected: u32) -> bool {
        self.matches(u32::from(measured), expected + MARK_EXCESS_US)
    }

    /// Check a measured space (carrier off)
    pub fn space(self, measured: u16, expected: u32) -> bool {
        self.matches(u32::from(measured), expected.saturating_sub(MARK_EXCESS_US))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_window_edges() {
        let tol = Tolerance::new(25);
        assert!(tol.matches(750, 1000));
        assert!(tol.matches(1251, 1000));
        assert!(!tol.matches(749, 1000));
        assert!(!tol.matches(1252, 1000));
    }

    #[test]
    fn test_mark_excess() {
        let tol = Tolerance::new(0);
        assert!(tol.mark(610, 560));
        assert!(!tol.mark(560, 560));
        assert!(tol.space(510, 560));
    }

    #[test]
    fn test_capped() {
        assert_eq!(Tolerance::new(150).percent(), 100);
    }

    proptest! {
        #[test]
        fn prop_exact_always_matches(expected in 100u32..20_000, percent in 0u8..=100) {
            prop_assert!(Tolerance::new(percent).matches(expected, expected));
        }
    }
}
