//! Clock times on the minutes-since-midnight scale.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::EngineError;

/// Minutes in a full day.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// A clock time between 00:00 and 23:59, stored as minutes since midnight.
///
/// Parsed from and serialized as a zero-padded 24h "HH:mm" string, the
/// representation used at every external boundary.
///
/// # Example
///
/// ```
/// use rate_engine::models::ClockTime;
///
/// let time: ClockTime = "21:30".parse().unwrap();
/// assert_eq!(time.minutes(), 21 * 60 + 30);
/// assert_eq!(time.to_string(), "21:30");
/// assert!("24:00".parse::<ClockTime>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClockTime {
    minutes: u16,
}

impl ClockTime {
    /// Creates a clock time from minutes since midnight (0-1439).
    pub fn from_minutes(minutes: u16) -> Result<Self, EngineError> {
        if minutes >= MINUTES_PER_DAY {
            return Err(EngineError::InvalidFormat {
                field: "clock time".to_string(),
                message: format!("{} minutes is past the end of the day", minutes),
            });
        }
        Ok(Self { minutes })
    }

    /// Returns the minutes since midnight (0-1439).
    pub fn minutes(self) -> u16 {
        self.minutes
    }

    /// Returns the hour component (0-23).
    pub fn hour(self) -> u16 {
        self.minutes / 60
    }

    /// Returns the minute component (0-59).
    pub fn minute(self) -> u16 {
        self.minutes % 60
    }
}

impl FromStr for ClockTime {
    type Err = EngineError;

    /// Parses a strict zero-padded "HH:mm" string (00:00-23:59).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidFormat {
            field: "clock time".to_string(),
            message: format!("expected HH:mm, got '{}'", s),
        };

        let bytes = s.as_bytes();
        if bytes.len() != 5 || bytes[2] != b':' {
            return Err(invalid());
        }
        if !bytes[0].is_ascii_digit()
            || !bytes[1].is_ascii_digit()
            || !bytes[3].is_ascii_digit()
            || !bytes[4].is_ascii_digit()
        {
            return Err(invalid());
        }

        let hour = u16::from(bytes[0] - b'0') * 10 + u16::from(bytes[1] - b'0');
        let minute = u16::from(bytes[3] - b'0') * 10 + u16::from(bytes[4] - b'0');
        if hour > 23 || minute > 59 {
            return Err(invalid());
        }

        Ok(Self {
            minutes: hour * 60 + minute,
        })
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(D::Error::custom)
    }
}
