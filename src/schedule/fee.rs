//! Fee computation over an entry/exit time span.
//!
//! The fee for a stay is the sum of the applicable hourly amounts for every
//! hour slot the stay starts, walking hour-by-hour from entry to exit.
//! Billing is flat per started hour: a partial final hour is billed at the
//! full hourly amount of whichever schedule covers its start. There is no
//! sub-hour proration.

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::RateSchedule;

use super::{local_point, resolve_rate};

/// Computes the total fee owed for parking from `entry` until `exit`.
///
/// Starting at the entry instant, each iteration converts the current
/// instant to the lot's local (weekday, minute) point, resolves the
/// applicable schedule, adds its amount, and advances by exactly one hour
/// of absolute time. Stepping absolute hours rather than local-calendar
/// hours keeps the walk from double-billing or skipping slots across DST
/// transitions.
///
/// The span must satisfy `exit > entry` and may not exceed
/// `max_billable_hours`; the cap bounds the loop against corrupted session
/// data.
///
/// # Errors
///
/// - [`EngineError::InvalidRange`] when `exit <= entry` or the span exceeds
///   the billing maximum.
/// - [`EngineError::NoApplicableRate`] / [`EngineError::Integrity`] when a
///   slot start cannot be resolved to exactly one schedule; resolution
///   failures abort the computation rather than guessing a fee.
pub fn compute_fee(
    schedules: &[RateSchedule],
    entry: DateTime<Utc>,
    exit: DateTime<Utc>,
    tz: Tz,
    max_billable_hours: u32,
) -> EngineResult<Decimal> {
    if exit <= entry {
        return Err(EngineError::InvalidRange {
            message: format!("exit time {} is not after entry time {}", exit, entry),
        });
    }
    if exit - entry > Duration::hours(i64::from(max_billable_hours)) {
        return Err(EngineError::InvalidRange {
            message: format!(
                "span exceeds the maximum billable duration of {} hours",
                max_billable_hours
            ),
        });
    }

    let mut total = Decimal::ZERO;
    let mut current = entry;
    while current < exit {
        let (weekday, minute) = local_point(current, tz);
        let rate = resolve_rate(schedules, weekday, minute)?;
        total += rate.amount;
        current += Duration::hours(1);
    }

    Ok(total)
}
