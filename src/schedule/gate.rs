//! Operating-hours gate.
//!
//! Vehicle entry and exit registration both consult this gate before
//! touching the occupancy map. Operating windows share the weekly window
//! algebra with rate schedules but are validated only for non-overlap;
//! a lot may be closed part of the week.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::models::OperatingWindow;

use super::{expand_window, local_point};

/// Returns true if the lot is open at the given instant.
///
/// An empty operating-window set means no restriction is configured and the
/// lot is always open. Otherwise the lot is open when any window's day set
/// contains the local weekday (or the Holiday wildcard) and one of its
/// expanded minute ranges contains the local minute.
///
/// The reference instant is an explicit parameter; callers resolve "now"
/// themselves so the gate stays testable with fixed instants.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use chrono_tz::UTC;
/// use rate_engine::models::{DayLabel, OperatingWindow, WeeklyWindow};
/// use rate_engine::schedule::is_open_at;
/// use uuid::Uuid;
///
/// let window = OperatingWindow::new(
///     Uuid::new_v4(),
///     WeeklyWindow::new(
///         [DayLabel::Monday],
///         "06:00".parse().unwrap(),
///         "22:00".parse().unwrap(),
///     ).unwrap(),
/// );
///
/// // 2026-03-02 is a Monday.
/// let noon = Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap();
/// assert!(is_open_at(std::slice::from_ref(&window), noon, UTC));
///
/// let night = Utc.with_ymd_and_hms(2026, 3, 2, 23, 0, 0).unwrap();
/// assert!(!is_open_at(&[window], night, UTC));
/// ```
pub fn is_open_at(windows: &[OperatingWindow], instant: DateTime<Utc>, tz: Tz) -> bool {
    if windows.is_empty() {
        return true;
    }

    let (weekday, minute) = local_point(instant, tz);
    windows.iter().any(|w| {
        w.window.applies_on(weekday)
            && expand_window(w.window.opening_time, w.window.closing_time)
                .iter()
                .any(|r| r.contains(minute))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayLabel, WeeklyWindow};
    use chrono::TimeZone;
    use chrono_tz::America::Bogota;
    use chrono_tz::UTC;
    use uuid::Uuid;

    fn operating(days: &[DayLabel], open: &str, close: &str) -> OperatingWindow {
        OperatingWindow::new(
            Uuid::new_v4(),
            WeeklyWindow::new(
                days.iter().copied(),
                open.parse().unwrap(),
                close.parse().unwrap(),
            )
            .unwrap(),
        )
    }

    // ==========================================================================
    // OG-001: no configured windows means always open
    // ==========================================================================
    #[test]
    fn test_og_001_empty_set_is_always_open() {
        let any_time = Utc.with_ymd_and_hms(2026, 3, 2, 3, 0, 0).unwrap();
        assert!(is_open_at(&[], any_time, UTC));
    }

    // ==========================================================================
    // OG-002: open inside the window, closed outside it
    // ==========================================================================
    #[test]
    fn test_og_002_window_bounds() {
        let windows = vec![operating(&[DayLabel::Monday], "06:00", "22:00")];

        let before = Utc.with_ymd_and_hms(2026, 3, 2, 5, 59, 0).unwrap();
        assert!(!is_open_at(&windows, before, UTC));

        let opening = Utc.with_ymd_and_hms(2026, 3, 2, 6, 0, 0).unwrap();
        assert!(is_open_at(&windows, opening, UTC));

        let closing = Utc.with_ymd_and_hms(2026, 3, 2, 22, 0, 0).unwrap();
        assert!(!is_open_at(&windows, closing, UTC));
    }

    // ==========================================================================
    // OG-003: closed on days the windows do not list
    // ==========================================================================
    #[test]
    fn test_og_003_unlisted_day_is_closed() {
        let windows = vec![operating(&[DayLabel::Monday], "06:00", "22:00")];
        // 2026-03-03 is a Tuesday.
        let tuesday_noon = Utc.with_ymd_and_hms(2026, 3, 3, 12, 0, 0).unwrap();
        assert!(!is_open_at(&windows, tuesday_noon, UTC));
    }

    // ==========================================================================
    // OG-004: a holiday-labeled window opens the lot on any day
    // ==========================================================================
    #[test]
    fn test_og_004_holiday_wildcard_opens_every_day() {
        let windows = vec![operating(&[DayLabel::Holiday], "08:00", "18:00")];
        for day in 2..=8 {
            let noon = Utc.with_ymd_and_hms(2026, 3, day, 12, 0, 0).unwrap();
            assert!(is_open_at(&windows, noon, UTC));
        }
    }

    // ==========================================================================
    // OG-005: midnight-crossing operating hours
    // ==========================================================================
    #[test]
    fn test_og_005_overnight_window() {
        let windows = vec![operating(
            &[DayLabel::Friday, DayLabel::Saturday],
            "20:00",
            "04:00",
        )];

        // Friday 23:00 - inside the late half. 2026-03-06 is a Friday.
        let friday_night = Utc.with_ymd_and_hms(2026, 3, 6, 23, 0, 0).unwrap();
        assert!(is_open_at(&windows, friday_night, UTC));

        // Saturday 03:00 - inside the early half of Saturday's window.
        let saturday_early = Utc.with_ymd_and_hms(2026, 3, 7, 3, 0, 0).unwrap();
        assert!(is_open_at(&windows, saturday_early, UTC));

        // Saturday noon - outside.
        let saturday_noon = Utc.with_ymd_and_hms(2026, 3, 7, 12, 0, 0).unwrap();
        assert!(!is_open_at(&windows, saturday_noon, UTC));
    }

    // ==========================================================================
    // OG-006: the gate evaluates the lot's local time
    // ==========================================================================
    #[test]
    fn test_og_006_gate_uses_lot_timezone() {
        let windows = vec![operating(&[DayLabel::Monday], "06:00", "22:00")];

        // 2026-03-03 01:00 UTC is Monday 20:00 in Bogota: still open there,
        // already Tuesday in UTC.
        let instant = Utc.with_ymd_and_hms(2026, 3, 3, 1, 0, 0).unwrap();
        assert!(is_open_at(&windows, instant, Bogota));
        assert!(!is_open_at(&windows, instant, UTC));
    }

    #[test]
    fn test_multiple_windows_any_match_opens() {
        let windows = vec![
            operating(&[DayLabel::Monday], "06:00", "12:00"),
            operating(&[DayLabel::Monday], "14:00", "20:00"),
        ];

        let morning = Utc.with_ymd_and_hms(2026, 3, 2, 8, 0, 0).unwrap();
        assert!(is_open_at(&windows, morning, UTC));

        let lunch = Utc.with_ymd_and_hms(2026, 3, 2, 13, 0, 0).unwrap();
        assert!(!is_open_at(&windows, lunch, UTC));

        let afternoon = Utc.with_ymd_and_hms(2026, 3, 2, 15, 0, 0).unwrap();
        assert!(is_open_at(&windows, afternoon, UTC));
    }
}
