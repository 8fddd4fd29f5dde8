//! Time-range helpers for schedule queries.

use chrono::{DateTime, Utc};

/// Half-open overlap test: `[a_start, a_end)` and `[b_start, b_end)` share
/// at least one instant. Touching ranges do not overlap.
///
/// Returns `None` when either range is inverted.
pub fn time_ranges_overlap(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> Option<bool> {
    if a_start > a_end || b_start > b_end {
        return None;
    }
    Some(a_start < b_end && a_end > b_start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 2, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_partial_overlap() {
        assert_eq!(time_ranges_overlap(at(9), at(11), at(10), at(12)), Some(true));
    }

    #[test]
    fn test_containment() {
        assert_eq!(time_ranges_overlap(at(8), at(18), at(10), at(11)), Some(true));
    }

    #[test]
    fn test_touching_ranges_do_not_overlap() {
        assert_eq!(time_ranges_overlap(at(9), at(10), at(10), at(11)), Some(false));
        assert_eq!(time_ranges_overlap(at(10), at(11), at(9), at(10)), Some(false));
    }

    #[test]
    fn test_disjoint() {
        assert_eq!(time_ranges_overlap(at(9), at(10), at(14), at(15)), Some(false));
    }

    #[test]
    fn test_inverted_range() {
        assert_eq!(time_ranges_overlap(at(11), at(9), at(10), at(12)), None);
    }
}
