//! Hash decoder for unrecognised pulse trains
//!
//! Each duration is compared with the one two entries later (mark with
//! mark, space with space) and the shorter/equal/longer results are folded
//! into a 32-bit FNV-1 hash. Same button, same hash, even when the exact
//! timings jitter.

const FNV_PRIME: u32 = 16_777_619;
const FNV_BASIS: u32 = 2_166_136_261;

/// Shortest capture with at least one comparison to hash
pub const MIN_ENTRIES: usize = 3;

/// Compare two durations with a 20% margin
fn compare(old: u16, new: u16) -> u32 {
    let (old, new) = (u32::from(old), u32::from(new));
    if new * 10 < old * 8 {
        0
    } else if old * 10 < new * 8 {
        2
    } else {
        1
    }
}

/// Hash a capture of at least `min_size` entries
///
/// Captures too short for a single comparison are never hashed, whatever
/// `min_size` says.
pub fn decode(entries: &[u16], min_size: u16) -> Option<u32> {
    if entries.len() < usize::from(min_size).max(MIN_ENTRIES) {
        return None;
    }

    let hash = entries.windows(3).fold(FNV_BASIS, |hash, w| {
        hash.wrapping_mul(FNV_PRIME) ^ compare(w[0], w[2])
    });
    Some(hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_short_ignored() {
        assert_eq!(decode(&[500, 500, 500], 12), None);
    }

    #[test]
    fn test_glitch_ignored_without_size_limit() {
        assert_eq!(decode(&[], 0), None);
        assert_eq!(decode(&[560], 0), None);
        assert_eq!(decode(&[560, 560], 1), None);
        assert!(decode(&[560, 560, 560], 0).is_some());
    }

    #[test]
    fn test_jitter_insensitive() {
        let a = [2400, 600, 1200, 600, 600, 600, 1200, 600, 600, 600, 1200, 600];
        let b = [2380, 620, 1190, 590, 610, 600, 1230, 580, 590, 610, 1210, 600];
        assert_eq!(decode(&a, 12), decode(&b, 12));
    }

    #[test]
    fn test_different_shapes_differ() {
        let a = [2400, 600, 1200, 600, 600, 600, 1200, 600, 600, 600, 1200, 600];
        let b = [2400, 600, 600, 600, 1200, 600, 600, 600, 1200, 600, 600, 600];
        assert_ne!(decode(&a, 12), decode(&b, 12));
    }

    #[test]
    fn test_compare() {
        assert_eq!(compare(1000, 700), 0);
        assert_eq!(compare(1000, 1000), 1);
        assert_eq!(compare(700, 1000), 2);
    }
}
