//! Vehicle session model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A vehicle's stay at a numbered spot, from entry until (optional) exit.
///
/// The engine consumes entry and exit times as opaque absolute instants; the
/// space-occupancy collaborator owns their lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleSession {
    /// The lot the vehicle is parked in.
    pub lot_id: Uuid,
    /// The occupied spot number (1-based).
    pub spot_number: u32,
    /// The vehicle's license plate.
    pub license_plate: String,
    /// The absolute instant the vehicle entered.
    pub entry_time: DateTime<Utc>,
    /// The absolute instant the vehicle exited, if it has.
    pub exit_time: Option<DateTime<Utc>>,
}

impl VehicleSession {
    /// Returns the parked duration against the given exit instant, in hours
    /// rounded to two decimal places.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use rust_decimal::Decimal;
    /// use rate_engine::models::VehicleSession;
    /// use std::str::FromStr;
    /// use uuid::Uuid;
    ///
    /// let session = VehicleSession {
    ///     lot_id: Uuid::new_v4(),
    ///     spot_number: 4,
    ///     license_plate: "ABC-123".to_string(),
    ///     entry_time: Utc.with_ymd_and_hms(2026, 3, 2, 20, 30, 0).unwrap(),
    ///     exit_time: None,
    /// };
    /// let exit = Utc.with_ymd_and_hms(2026, 3, 2, 22, 45, 0).unwrap();
    /// assert_eq!(session.parked_hours(exit), Decimal::from_str("2.25").unwrap());
    /// ```
    pub fn parked_hours(&self, exit: DateTime<Utc>) -> Decimal {
        let minutes = (exit - self.entry_time).num_minutes();
        (Decimal::new(minutes, 0) / Decimal::new(60, 0)).round_dp(2)
    }
}
