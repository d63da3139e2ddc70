//! Weekly recurring windows.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

use super::{ClockTime, DayLabel};

/// A weekly recurring interval: a set of day labels plus an opening and
/// closing clock time.
///
/// Identical opening and closing times denote a full 24-hour window, not a
/// zero-length one. A closing time numerically before the opening time
/// denotes a midnight-crossing window. The expansion of a window into
/// concrete minute ranges lives in [`crate::schedule::expand_window`], the
/// single source of truth for that algebra.
///
/// # Example
///
/// ```
/// use rate_engine::models::{DayLabel, WeeklyWindow};
///
/// let window = WeeklyWindow::new(
///     [DayLabel::Monday, DayLabel::Tuesday],
///     "09:00".parse().unwrap(),
///     "21:00".parse().unwrap(),
/// )
/// .unwrap();
///
/// assert!(window.contains_day(DayLabel::Monday));
/// assert!(!window.contains_day(DayLabel::Sunday));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyWindow {
    /// The day labels (1-8) this window recurs on.
    pub day_labels: BTreeSet<DayLabel>,
    /// The opening clock time.
    pub opening_time: ClockTime,
    /// The closing clock time.
    pub closing_time: ClockTime,
}

impl WeeklyWindow {
    /// Creates a window, rejecting an empty day set.
    pub fn new(
        day_labels: impl IntoIterator<Item = DayLabel>,
        opening_time: ClockTime,
        closing_time: ClockTime,
    ) -> Result<Self, EngineError> {
        let day_labels: BTreeSet<DayLabel> = day_labels.into_iter().collect();
        if day_labels.is_empty() {
            return Err(EngineError::InvalidFormat {
                field: "day labels".to_string(),
                message: "at least one day label is required".to_string(),
            });
        }
        Ok(Self {
            day_labels,
            opening_time,
            closing_time,
        })
    }

    /// Returns true if the window's day set contains the given label.
    pub fn contains_day(&self, day: DayLabel) -> bool {
        self.day_labels.contains(&day)
    }

    /// Returns true if the window applies on the given concrete weekday,
    /// either because the weekday is listed or because the Holiday wildcard
    /// is present.
    pub fn applies_on(&self, weekday: DayLabel) -> bool {
        self.contains_day(weekday) || self.contains_day(DayLabel::Holiday)
    }

    /// Returns true if opening and closing coincide, i.e. the window spans
    /// the full day.
    pub fn is_full_day(&self) -> bool {
        self.opening_time == self.closing_time
    }
}
