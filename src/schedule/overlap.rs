//! Overlap detection across a set of named windows.
//!
//! Validation is batch: every conflicting pair is collected before
//! reporting, because schedule editing is iterative and first-error
//! feedback forces repeated round-trips by the caller.

use std::fmt;

use crate::models::{DayLabel, WeeklyWindow};

use super::expand_window;

/// A pair of windows that claim the same minutes on at least one shared
/// day label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlapConflict {
    /// Name of the first window in the pair.
    pub first: String,
    /// Name of the second window in the pair.
    pub second: String,
    /// The shared day labels on which the windows overlap, ascending.
    pub days: Vec<DayLabel>,
}

impl fmt::Display for OverlapConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let days = self
            .days
            .iter()
            .map(|d| d.as_u8().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(
            f,
            "Overlap between \"{}\" and \"{}\" on days {}",
            self.first, self.second, days
        )
    }
}

/// Finds every overlapping pair among the given named windows.
///
/// For each unordered pair, the day-label sets are intersected first; only
/// pairs sharing at least one label have their windows expanded (via
/// [`expand_window`]) and tested for minute-range intersection. Touching
/// endpoints do not overlap.
///
/// Returns every conflict found, in input order, never just the first.
///
/// # Example
///
/// ```
/// use rate_engine::models::{DayLabel, WeeklyWindow};
/// use rate_engine::schedule::find_overlaps;
///
/// let day = WeeklyWindow::new(
///     [DayLabel::Monday],
///     "09:00".parse().unwrap(),
///     "21:00".parse().unwrap(),
/// ).unwrap();
/// let evening = WeeklyWindow::new(
///     [DayLabel::Monday],
///     "20:00".parse().unwrap(),
///     "23:00".parse().unwrap(),
/// ).unwrap();
///
/// let conflicts = find_overlaps(&[("Day", &day), ("Evening", &evening)]);
/// assert_eq!(conflicts.len(), 1);
/// assert_eq!(conflicts[0].days, vec![DayLabel::Monday]);
/// ```
pub fn find_overlaps(entries: &[(&str, &WeeklyWindow)]) -> Vec<OverlapConflict> {
    let mut conflicts = Vec::new();

    for i in 0..entries.len() {
        for j in (i + 1)..entries.len() {
            let (first_name, first) = entries[i];
            let (second_name, second) = entries[j];

            let shared: Vec<DayLabel> = first
                .day_labels
                .intersection(&second.day_labels)
                .copied()
                .collect();
            if shared.is_empty() {
                continue;
            }

            if windows_share_minutes(first, second) {
                conflicts.push(OverlapConflict {
                    first: first_name.to_string(),
                    second: second_name.to_string(),
                    days: shared,
                });
            }
        }
    }

    conflicts
}

/// Returns true if any expanded range of one window intersects any expanded
/// range of the other.
fn windows_share_minutes(a: &WeeklyWindow, b: &WeeklyWindow) -> bool {
    let ranges_a = expand_window(a.opening_time, a.closing_time);
    let ranges_b = expand_window(b.opening_time, b.closing_time);
    ranges_a
        .iter()
        .any(|ra| ranges_b.iter().any(|rb| ra.overlaps(rb)))
}
