//! Coverage validation: no minute of any day label may go unbilled.
//!
//! A lot's accepted rate-schedule set must cover every day label 1-8
//! minute-for-minute. The Holiday label participates exactly like the seven
//! weekdays: it is an override dimension evaluated alongside the concrete
//! weekday at resolution time, so a set is invalid unless holidays are
//! explicitly covered too.

use std::fmt;

use crate::models::{DayLabel, MINUTES_PER_DAY, WeeklyWindow};

use super::window::format_minutes;
use super::{MinuteRange, expand_window};

/// An uncovered interval of one day label, reported as minute bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageGap {
    /// The day label with the gap.
    pub day: DayLabel,
    /// Inclusive start minute of the gap.
    pub start: u16,
    /// Exclusive end minute of the gap (up to 1440).
    pub end: u16,
}

impl CoverageGap {
    /// Renders the gap bounds as "HH:mm-HH:mm" (1440 renders as "24:00").
    pub fn span(&self) -> String {
        format!("{}-{}", format_minutes(self.start), format_minutes(self.end))
    }
}

impl fmt::Display for CoverageGap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Day {} has gap {}", self.day.as_u8(), self.span())
    }
}

/// Finds every coverage gap across all eight day labels.
///
/// For each label independently: collect the expanded minute ranges of
/// every window listing that label, sort them by start, merge adjacent and
/// overlapping ranges, then report each interval of `[0, 1440)` the merged
/// union misses. A label no window lists at all yields one full-day gap.
///
/// Gaps for all labels are collected in one pass; an empty result means the
/// set covers the entire week.
///
/// # Example
///
/// ```
/// use rate_engine::models::{DayLabel, WeeklyWindow};
/// use rate_engine::schedule::find_coverage_gaps;
///
/// let office = WeeklyWindow::new(
///     [DayLabel::Monday],
///     "09:00".parse().unwrap(),
///     "17:00".parse().unwrap(),
/// ).unwrap();
///
/// let gaps = find_coverage_gaps(&[&office]);
/// // Monday is missing its ends, the other 7 labels are missing entirely.
/// assert_eq!(gaps.len(), 2 + 7);
/// ```
pub fn find_coverage_gaps(windows: &[&WeeklyWindow]) -> Vec<CoverageGap> {
    let mut gaps = Vec::new();

    for day in DayLabel::ALL {
        let mut ranges: Vec<MinuteRange> = windows
            .iter()
            .filter(|w| w.contains_day(day))
            .flat_map(|w| expand_window(w.opening_time, w.closing_time))
            .collect();

        if ranges.is_empty() {
            gaps.push(CoverageGap {
                day,
                start: 0,
                end: MINUTES_PER_DAY,
            });
            continue;
        }

        ranges.sort_by_key(|r| r.start);
        let merged = merge_ranges(&ranges);

        let mut cursor = 0u16;
        for range in &merged {
            if range.start > cursor {
                gaps.push(CoverageGap {
                    day,
                    start: cursor,
                    end: range.start,
                });
            }
            cursor = cursor.max(range.end);
        }
        if cursor < MINUTES_PER_DAY {
            gaps.push(CoverageGap {
                day,
                start: cursor,
                end: MINUTES_PER_DAY,
            });
        }
    }

    gaps
}

/// Merges sorted ranges, folding overlapping and contiguous neighbours.
fn merge_ranges(sorted: &[MinuteRange]) -> Vec<MinuteRange> {
    let mut merged: Vec<MinuteRange> = vec![sorted[0]];
    for current in &sorted[1..] {
        let last = merged
            .last_mut()
            .expect("merged starts with one range");
        if current.start <= last.end {
            last.end = last.end.max(current.end);
        } else {
            merged.push(*current);
        }
    }
    merged
}
