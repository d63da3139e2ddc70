//! Day labels for recurring weekly windows.
//!
//! Day labels are the spine of the window algebra: the integers 1-7 name
//! the ISO weekdays (Monday=1) and 8 names the Holiday dimension, a
//! wildcard that matches any calendar day when present in a schedule's
//! day set.

use std::fmt;

use chrono::Weekday;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::EngineError;

/// A day label on the 1-8 scale used by rate schedules and operating hours.
///
/// Labels 1-7 are the ISO weekdays (Monday=1, Sunday=7). Label 8 is the
/// Holiday override dimension: it is never the literal weekday of a concrete
/// date, but a schedule carrying it matches every calendar day.
///
/// Serialized as the bare integer 1-8 at every boundary.
///
/// # Example
///
/// ```
/// use rate_engine::models::DayLabel;
///
/// let day = DayLabel::try_from(6).unwrap();
/// assert_eq!(day, DayLabel::Saturday);
/// assert_eq!(day.as_u8(), 6);
/// assert!(DayLabel::try_from(9).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DayLabel {
    /// Monday (1).
    Monday,
    /// Tuesday (2).
    Tuesday,
    /// Wednesday (3).
    Wednesday,
    /// Thursday (4).
    Thursday,
    /// Friday (5).
    Friday,
    /// Saturday (6).
    Saturday,
    /// Sunday (7).
    Sunday,
    /// Holiday (8) - matches any calendar day.
    Holiday,
}

impl DayLabel {
    /// All eight labels in ascending order. Coverage validation iterates
    /// this set: holidays are covered like any other day.
    pub const ALL: [DayLabel; 8] = [
        DayLabel::Monday,
        DayLabel::Tuesday,
        DayLabel::Wednesday,
        DayLabel::Thursday,
        DayLabel::Friday,
        DayLabel::Saturday,
        DayLabel::Sunday,
        DayLabel::Holiday,
    ];

    /// Returns the numeric label (1-8).
    pub fn as_u8(self) -> u8 {
        match self {
            DayLabel::Monday => 1,
            DayLabel::Tuesday => 2,
            DayLabel::Wednesday => 3,
            DayLabel::Thursday => 4,
            DayLabel::Friday => 5,
            DayLabel::Saturday => 6,
            DayLabel::Sunday => 7,
            DayLabel::Holiday => 8,
        }
    }

    /// Returns true for the Holiday wildcard label.
    pub fn is_holiday(self) -> bool {
        self == DayLabel::Holiday
    }

    /// Converts a concrete weekday into its label (1-7, never Holiday).
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::Weekday;
    /// use rate_engine::models::DayLabel;
    ///
    /// assert_eq!(DayLabel::from_weekday(Weekday::Mon), DayLabel::Monday);
    /// assert_eq!(DayLabel::from_weekday(Weekday::Sun), DayLabel::Sunday);
    /// ```
    pub fn from_weekday(weekday: Weekday) -> Self {
        // number_from_monday is already on the 1-7 scale used here.
        match weekday.number_from_monday() {
            1 => DayLabel::Monday,
            2 => DayLabel::Tuesday,
            3 => DayLabel::Wednesday,
            4 => DayLabel::Thursday,
            5 => DayLabel::Friday,
            6 => DayLabel::Saturday,
            _ => DayLabel::Sunday,
        }
    }
}

impl TryFrom<u8> for DayLabel {
    type Error = EngineError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(DayLabel::Monday),
            2 => Ok(DayLabel::Tuesday),
            3 => Ok(DayLabel::Wednesday),
            4 => Ok(DayLabel::Thursday),
            5 => Ok(DayLabel::Friday),
            6 => Ok(DayLabel::Saturday),
            7 => Ok(DayLabel::Sunday),
            8 => Ok(DayLabel::Holiday),
            other => Err(EngineError::InvalidFormat {
                field: "day label".to_string(),
                message: format!("{} is out of range (allowed: 1-8)", other),
            }),
        }
    }
}

impl fmt::Display for DayLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DayLabel::Monday => "Monday",
            DayLabel::Tuesday => "Tuesday",
            DayLabel::Wednesday => "Wednesday",
            DayLabel::Thursday => "Thursday",
            DayLabel::Friday => "Friday",
            DayLabel::Saturday => "Saturday",
            DayLabel::Sunday => "Sunday",
            DayLabel::Holiday => "Holiday",
        };
        write!(f, "{}", name)
    }
}

impl Serialize for DayLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

impl<'de> Deserialize<'de> for DayLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = u8::deserialize(deserializer)?;
        DayLabel::try_from(value).map_err(D::Error::custom)
    }
}
