//! Property-based tests for the window algebra and fee computation.
//!
//! These tests use proptest to verify the algebraic properties the
//! validators and the fee walk rely on: expansion minute totals, overlap
//! symmetry, coverage of partitioned days, and fee monotonicity.

use chrono::{Duration, TimeZone, Utc};
use chrono_tz::UTC;
use proptest::prelude::*;
use proptest::sample::Index;
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

use rate_engine::models::{ClockTime, DayLabel, RateSchedule, WeeklyWindow};
use rate_engine::schedule::{compute_fee, expand_window, find_coverage_gaps, find_overlaps};

const MAX_BILLABLE_HOURS: u32 = 720;

// Strategy for generating an arbitrary valid clock time
fn arb_clock_time() -> impl Strategy<Value = ClockTime> {
    (0u16..1440).prop_map(|minutes| ClockTime::from_minutes(minutes).unwrap())
}

// Strategy for generating a non-empty day-label set
fn arb_day_labels() -> impl Strategy<Value = Vec<DayLabel>> {
    proptest::collection::btree_set(1u8..=8, 1..=8)
        .prop_map(|days| days.into_iter().map(|d| DayLabel::try_from(d).unwrap()).collect())
}

// Strategy for generating an arbitrary weekly window
fn arb_window() -> impl Strategy<Value = WeeklyWindow> {
    (arb_day_labels(), arb_clock_time(), arb_clock_time())
        .prop_map(|(days, open, close)| WeeklyWindow::new(days, open, close).unwrap())
}

/// Day/night schedule pair covering the full week.
fn day_and_night() -> Vec<RateSchedule> {
    let lot_id = Uuid::new_v4();
    let weekdays: Vec<DayLabel> = (1u8..=7).map(|d| DayLabel::try_from(d).unwrap()).collect();
    let all: Vec<DayLabel> = (1u8..=8).map(|d| DayLabel::try_from(d).unwrap()).collect();
    vec![
        RateSchedule::new(
            lot_id,
            "Day",
            Decimal::from_str("3000").unwrap(),
            WeeklyWindow::new(
                weekdays,
                "09:00".parse().unwrap(),
                "21:00".parse().unwrap(),
            )
            .unwrap(),
        )
        .unwrap(),
        RateSchedule::new(
            lot_id,
            "Night",
            Decimal::from_str("5000").unwrap(),
            WeeklyWindow::new(all, "21:00".parse().unwrap(), "09:00".parse().unwrap()).unwrap(),
        )
        .unwrap(),
    ]
}

proptest! {
    /// Expansion covers exactly the minutes the open/close arithmetic
    /// promises: 1440 for open == close, close - open for open < close,
    /// (1440 - open) + close otherwise.
    #[test]
    fn expansion_minute_totals(open in arb_clock_time(), close in arb_clock_time()) {
        let total: u32 = expand_window(open, close)
            .iter()
            .map(|r| u32::from(r.covered_minutes()))
            .sum();

        let open_min = u32::from(open.minutes());
        let close_min = u32::from(close.minutes());
        let expected = if open_min == close_min {
            1440
        } else if open_min < close_min {
            close_min - open_min
        } else {
            (1440 - open_min) + close_min
        };
        prop_assert_eq!(total, expected);
    }

    /// Every expanded range is non-empty and stays on the 0-1440 scale.
    #[test]
    fn expanded_ranges_are_well_formed(open in arb_clock_time(), close in arb_clock_time()) {
        for range in expand_window(open, close) {
            prop_assert!(range.start < range.end);
            prop_assert!(range.end <= 1440);
        }
    }

    /// Overlap detection does not depend on the order windows are listed.
    #[test]
    fn overlap_detection_is_symmetric(a in arb_window(), b in arb_window()) {
        let forward = find_overlaps(&[("A", &a), ("B", &b)]);
        let backward = find_overlaps(&[("B", &b), ("A", &a)]);
        prop_assert_eq!(forward.len(), backward.len());
        if let (Some(f), Some(r)) = (forward.first(), backward.first()) {
            prop_assert_eq!(&f.days, &r.days);
        }
    }

    /// A window never overlaps a window on disjoint day labels.
    #[test]
    fn disjoint_days_never_overlap(
        open_a in arb_clock_time(),
        close_a in arb_clock_time(),
        open_b in arb_clock_time(),
        close_b in arb_clock_time(),
    ) {
        let a = WeeklyWindow::new([DayLabel::Monday], open_a, close_a).unwrap();
        let b = WeeklyWindow::new([DayLabel::Tuesday], open_b, close_b).unwrap();
        prop_assert!(find_overlaps(&[("A", &a), ("B", &b)]).is_empty());
    }

    /// Slicing every day into contiguous segments at arbitrary cut points
    /// yields a set with no coverage gaps; dropping any one segment
    /// reopens a gap on every label.
    #[test]
    fn partitioned_week_has_full_coverage(
        cuts in proptest::collection::btree_set(1u16..1440, 1..6),
        dropped in any::<Index>(),
    ) {
        let all_labels: Vec<DayLabel> =
            (1u8..=8).map(|d| DayLabel::try_from(d).unwrap()).collect();

        let mut boundaries: Vec<u16> = std::iter::once(0).chain(cuts).collect();
        boundaries.sort_unstable();

        // Segment i runs from boundary i to boundary i+1; the last wraps
        // to midnight via a 00:00 close.
        let mut windows = Vec::new();
        for (index, &start) in boundaries.iter().enumerate() {
            let end = boundaries.get(index + 1).copied().unwrap_or(0);
            windows.push(
                WeeklyWindow::new(
                    all_labels.clone(),
                    ClockTime::from_minutes(start).unwrap(),
                    ClockTime::from_minutes(end).unwrap(),
                )
                .unwrap(),
            );
        }

        let refs: Vec<&WeeklyWindow> = windows.iter().collect();
        prop_assert!(find_coverage_gaps(&refs).is_empty());

        // Removing any segment leaves its minutes uncovered on all 8 labels.
        let removed = dropped.index(windows.len());
        let partial: Vec<&WeeklyWindow> = windows
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != removed)
            .map(|(_, w)| w)
            .collect();
        prop_assert_eq!(find_coverage_gaps(&partial).len(), 8);
    }

    /// For a fixed entry and schedule set, the fee never decreases as the
    /// exit moves later.
    #[test]
    fn fee_is_monotonic_in_exit_time(
        entry_offset_minutes in 0i64..(14 * 24 * 60),
        first_stay in 1i64..6000,
        extension in 0i64..6000,
    ) {
        let schedules = day_and_night();
        // 2026-01-05 is a Monday.
        let base = Utc.with_ymd_and_hms(2026, 1, 5, 0, 0, 0).unwrap();
        let entry = base + Duration::minutes(entry_offset_minutes);

        let early_exit = entry + Duration::minutes(first_stay);
        let late_exit = early_exit + Duration::minutes(extension);

        let early_fee =
            compute_fee(&schedules, entry, early_exit, UTC, MAX_BILLABLE_HOURS).unwrap();
        let late_fee =
            compute_fee(&schedules, entry, late_exit, UTC, MAX_BILLABLE_HOURS).unwrap();
        prop_assert!(early_fee <= late_fee);
    }

    /// Every billed hour costs one of the configured amounts, so the total
    /// is bounded by the slot count times the cheapest and dearest rates.
    #[test]
    fn fee_is_bounded_by_slot_count(
        entry_offset_minutes in 0i64..(14 * 24 * 60),
        stay_minutes in 1i64..6000,
    ) {
        let schedules = day_and_night();
        let base = Utc.with_ymd_and_hms(2026, 1, 5, 0, 0, 0).unwrap();
        let entry = base + Duration::minutes(entry_offset_minutes);
        let exit = entry + Duration::minutes(stay_minutes);

        let fee = compute_fee(&schedules, entry, exit, UTC, MAX_BILLABLE_HOURS).unwrap();

        let slots = Decimal::new((stay_minutes as u64).div_ceil(60) as i64, 0);
        let cheapest = Decimal::from_str("3000").unwrap();
        let dearest = Decimal::from_str("5000").unwrap();
        prop_assert!(fee >= slots * cheapest);
        prop_assert!(fee <= slots * dearest);
    }
}
