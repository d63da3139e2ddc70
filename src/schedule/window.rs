//! Window expansion into minute ranges.
//!
//! This module is the single source of truth for turning an opening/closing
//! clock-time pair into concrete minute ranges on the 0-1440 scale. Every
//! validator, the resolver and the gate call [`expand_window`] instead of
//! re-deriving the midnight-crossing rules; duplicated midnight logic is the
//! most common source of drift bugs in window algebra.

use crate::models::{ClockTime, MINUTES_PER_DAY};

/// A half-open range of minutes within a day, `start <= minute < end`,
/// with `0 <= start < end <= 1440`.
///
/// # Example
///
/// ```
/// use rate_engine::schedule::MinuteRange;
///
/// let range = MinuteRange { start: 540, end: 1260 }; // 09:00-21:00
/// assert!(range.contains(540));
/// assert!(!range.contains(1260));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinuteRange {
    /// Inclusive start minute.
    pub start: u16,
    /// Exclusive end minute.
    pub end: u16,
}

impl MinuteRange {
    /// Returns true if the minute falls inside this range.
    pub fn contains(&self, minute: u16) -> bool {
        self.start <= minute && minute < self.end
    }

    /// Returns true if two half-open ranges share at least one minute.
    ///
    /// Touching endpoints do not overlap: `[0,540)` and `[540,1440)` are
    /// disjoint.
    pub fn overlaps(&self, other: &MinuteRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Returns the number of minutes covered.
    pub fn covered_minutes(&self) -> u16 {
        self.end - self.start
    }
}

/// Expands an opening/closing pair into one or two minute ranges.
///
/// - `open == close` yields the single full-day range `[0, 1440)`; a window
///   opening and closing at the same time means open all day, not open for
///   zero minutes.
/// - `open < close` yields `[open, close)`.
/// - `open > close` crosses midnight and yields `[open, 1440)` and
///   `[0, close)`. A closing time of exactly 00:00 yields only
///   `[open, 1440)`; the wrapped half would be empty.
///
/// # Example
///
/// ```
/// use rate_engine::schedule::expand_window;
///
/// let ranges = expand_window("21:00".parse().unwrap(), "09:00".parse().unwrap());
/// assert_eq!(ranges.len(), 2);
/// assert_eq!((ranges[0].start, ranges[0].end), (1260, 1440));
/// assert_eq!((ranges[1].start, ranges[1].end), (0, 540));
/// ```
pub fn expand_window(opening: ClockTime, closing: ClockTime) -> Vec<MinuteRange> {
    let open = opening.minutes();
    let close = closing.minutes();

    if open == close {
        return vec![MinuteRange {
            start: 0,
            end: MINUTES_PER_DAY,
        }];
    }
    if open < close {
        return vec![MinuteRange {
            start: open,
            end: close,
        }];
    }
    let mut ranges = vec![MinuteRange {
        start: open,
        end: MINUTES_PER_DAY,
    }];
    if close > 0 {
        ranges.push(MinuteRange {
            start: 0,
            end: close,
        });
    }
    ranges
}

/// Formats a minute count on the 0-1440 scale as "HH:mm", with 1440
/// rendered as "24:00" so gap reports can name the end of the day.
pub(crate) fn format_minutes(minutes: u16) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    fn total_minutes(ranges: &[MinuteRange]) -> u32 {
        ranges.iter().map(|r| u32::from(r.covered_minutes())).sum()
    }

    // ==========================================================================
    // TW-001: open == close is a full day, not a zero-length window
    // ==========================================================================
    #[test]
    fn test_tw_001_equal_times_expand_to_full_day() {
        let ranges = expand_window(time("00:00"), time("00:00"));
        assert_eq!(ranges, vec![MinuteRange { start: 0, end: 1440 }]);

        let ranges = expand_window(time("13:15"), time("13:15"));
        assert_eq!(ranges, vec![MinuteRange { start: 0, end: 1440 }]);
    }

    // ==========================================================================
    // TW-002: ordinary window expands to one half-open range
    // ==========================================================================
    #[test]
    fn test_tw_002_ordinary_window_single_range() {
        let ranges = expand_window(time("09:00"), time("21:00"));
        assert_eq!(ranges, vec![MinuteRange { start: 540, end: 1260 }]);
        assert_eq!(total_minutes(&ranges), 720);
    }

    // ==========================================================================
    // TW-003: midnight-crossing window splits into two ranges
    // ==========================================================================
    #[test]
    fn test_tw_003_midnight_crossing_splits() {
        let ranges = expand_window(time("21:00"), time("09:00"));
        assert_eq!(
            ranges,
            vec![
                MinuteRange { start: 1260, end: 1440 },
                MinuteRange { start: 0, end: 540 },
            ]
        );
        // (1440 - 1260) + 540
        assert_eq!(total_minutes(&ranges), 720);
    }

    // ==========================================================================
    // TW-004: covered minutes follow the open/close arithmetic
    // ==========================================================================
    #[test]
    fn test_tw_004_covered_minute_totals() {
        // open < close: close - open
        assert_eq!(total_minutes(&expand_window(time("08:30"), time("17:45"))), 555);
        // open > close: (1440 - open) + close
        assert_eq!(total_minutes(&expand_window(time("23:00"), time("01:00"))), 120);
        // open == close: 1440
        assert_eq!(total_minutes(&expand_window(time("05:00"), time("05:00"))), 1440);
    }

    #[test]
    fn test_contains_is_half_open() {
        let range = MinuteRange { start: 540, end: 1260 };
        assert!(!range.contains(539));
        assert!(range.contains(540));
        assert!(range.contains(1259));
        assert!(!range.contains(1260));
    }

    #[test]
    fn test_touching_ranges_do_not_overlap() {
        let morning = MinuteRange { start: 0, end: 540 };
        let day = MinuteRange { start: 540, end: 1260 };
        assert!(!morning.overlaps(&day));
        assert!(!day.overlaps(&morning));
    }

    #[test]
    fn test_nested_and_partial_ranges_overlap() {
        let outer = MinuteRange { start: 0, end: 1440 };
        let inner = MinuteRange { start: 600, end: 660 };
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));

        let early = MinuteRange { start: 500, end: 620 };
        assert!(early.overlaps(&inner));
    }

    #[test]
    fn test_closing_at_midnight_yields_single_range() {
        let ranges = expand_window(time("18:00"), time("00:00"));
        assert_eq!(ranges, vec![MinuteRange { start: 1080, end: 1440 }]);
    }

    #[test]
    fn test_one_minute_window() {
        let ranges = expand_window(time("12:00"), time("12:01"));
        assert_eq!(ranges, vec![MinuteRange { start: 720, end: 721 }]);
        assert_eq!(ranges[0].covered_minutes(), 1);
    }

    #[test]
    fn test_format_minutes_renders_day_end() {
        assert_eq!(format_minutes(0), "00:00");
        assert_eq!(format_minutes(545), "09:05");
        assert_eq!(format_minutes(1440), "24:00");
    }
}
