//! Rate resolution for a concrete point in time.
//!
//! A concrete instant is converted to the lot's local (weekday, minute)
//! point, and the single rate schedule whose window contains that point is
//! looked up. An accepted schedule set guarantees exactly one match per
//! weekday-labeled minute; failures here are data-integrity faults, not
//! user input errors.

use chrono::{DateTime, Datelike, Timelike, Utc};
use chrono_tz::Tz;

use crate::error::{EngineError, EngineResult};
use crate::models::{DayLabel, RateSchedule};

use super::expand_window;
use super::window::format_minutes;

/// Converts an absolute instant to the lot-local (weekday, minutes-of-day)
/// point used by resolution and the operating-hours gate.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use chrono_tz::America::Bogota;
/// use rate_engine::models::DayLabel;
/// use rate_engine::schedule::local_point;
///
/// // Tuesday 01:30 UTC is Monday 20:30 in Bogota (UTC-5).
/// let instant = Utc.with_ymd_and_hms(2026, 3, 3, 1, 30, 0).unwrap();
/// let (weekday, minute) = local_point(instant, Bogota);
/// assert_eq!(weekday, DayLabel::Monday);
/// assert_eq!(minute, 20 * 60 + 30);
/// ```
pub fn local_point(instant: DateTime<Utc>, tz: Tz) -> (DayLabel, u16) {
    let local = instant.with_timezone(&tz);
    let weekday = DayLabel::from_weekday(local.weekday());
    let minute = (local.hour() * 60 + local.minute()) as u16;
    (weekday, minute)
}

/// Resolves the single rate schedule applicable at a local point.
///
/// A schedule matches when one of its expanded minute ranges contains the
/// minute and its day set contains the weekday or the Holiday wildcard.
///
/// When both a weekday-labeled and a Holiday-labeled schedule contain the
/// point, the Holiday schedule wins: Holiday is an override dimension, and
/// deterministic precedence beats relying on match order. Any other
/// multiplicity, and a point no schedule matches, mean the accepted set no
/// longer satisfies its invariants; both surface as server-side faults.
pub fn resolve_rate<'a>(
    schedules: &'a [RateSchedule],
    weekday: DayLabel,
    minute: u16,
) -> EngineResult<&'a RateSchedule> {
    let matches: Vec<&RateSchedule> = schedules
        .iter()
        .filter(|s| {
            s.window.applies_on(weekday)
                && expand_window(s.window.opening_time, s.window.closing_time)
                    .iter()
                    .any(|r| r.contains(minute))
        })
        .collect();

    match matches.len() {
        0 => Err(EngineError::NoApplicableRate {
            day: weekday.as_u8(),
            time: format_minutes(minute),
        }),
        1 => Ok(matches[0]),
        _ => {
            let holiday_matches: Vec<&RateSchedule> = matches
                .iter()
                .copied()
                .filter(|s| s.window.contains_day(DayLabel::Holiday))
                .collect();
            if holiday_matches.len() == 1 {
                return Ok(holiday_matches[0]);
            }

            let names = matches
                .iter()
                .map(|s| format!("\"{}\"", s.name))
                .collect::<Vec<_>>()
                .join(", ");
            Err(EngineError::Integrity {
                message: format!(
                    "{} schedules match {} on day {}: {}",
                    matches.len(),
                    format_minutes(minute),
                    weekday.as_u8(),
                    names
                ),
            })
        }
    }
}
