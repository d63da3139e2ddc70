//! Request types for the Rate Schedule Engine API.
//!
//! This module defines the JSON request structures for the lot, schedule
//! and vehicle endpoints, and their fallible conversions into domain types.
//! Clock times arrive as "HH:mm" strings, day labels as integers 1-8, and
//! instants as RFC 3339 timestamps.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{DayLabel, OperatingWindow, ParkingLot, RateSchedule, WeeklyWindow};

/// Request body for `POST /lots`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLotRequest {
    /// Display name of the lot.
    pub name: String,
    /// Street address or site description.
    pub location: String,
    /// Number of numbered spots.
    pub total_capacity: u32,
    /// Occupancy percentage (0-100) that triggers notifications.
    pub notification_threshold: u32,
    /// IANA timezone name, e.g. "America/Bogota".
    pub timezone: String,
}

impl TryFrom<CreateLotRequest> for ParkingLot {
    type Error = EngineError;

    fn try_from(req: CreateLotRequest) -> Result<Self, Self::Error> {
        let timezone: Tz = req.timezone.parse().map_err(|_| EngineError::InvalidFormat {
            field: "timezone".to_string(),
            message: format!("unknown IANA timezone '{}'", req.timezone),
        })?;
        ParkingLot::new(
            req.name,
            req.location,
            req.total_capacity,
            req.notification_threshold,
            timezone,
        )
    }
}

/// A weekly window in wire form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowRequest {
    /// Day labels as integers 1-8.
    pub day_labels: Vec<u8>,
    /// Opening time as "HH:mm".
    pub opening_time: String,
    /// Closing time as "HH:mm".
    pub closing_time: String,
}

impl WindowRequest {
    /// Converts the wire form into a validated [`WeeklyWindow`].
    pub fn into_window(self) -> EngineResult<WeeklyWindow> {
        let days = self
            .day_labels
            .into_iter()
            .map(DayLabel::try_from)
            .collect::<EngineResult<Vec<_>>>()?;
        let opening_time = self.opening_time.parse()?;
        let closing_time = self.closing_time.parse()?;
        WeeklyWindow::new(days, opening_time, closing_time)
    }
}

/// One rate schedule in wire form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateScheduleRequest {
    /// Display name, e.g. "Day rate".
    pub name: String,
    /// Hourly fee amount.
    pub amount: Decimal,
    /// The weekly window this rate applies in.
    pub window: WindowRequest,
}

impl RateScheduleRequest {
    /// Converts the wire form into a validated [`RateSchedule`] owned by
    /// the given lot.
    pub fn into_schedule(self, lot_id: Uuid) -> EngineResult<RateSchedule> {
        let window = self.window.into_window()?;
        RateSchedule::new(lot_id, self.name, self.amount, window)
    }
}

/// Request body for `PUT /lots/{id}/rates`, `POST /lots/{id}/rates` and
/// `POST /lots/{id}/rates/validate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateSetRequest {
    /// The candidate rate schedules.
    pub rates: Vec<RateScheduleRequest>,
}

impl RateSetRequest {
    /// Converts every entry, failing on the first malformed one.
    pub fn into_schedules(self, lot_id: Uuid) -> EngineResult<Vec<RateSchedule>> {
        self.rates
            .into_iter()
            .map(|r| r.into_schedule(lot_id))
            .collect()
    }
}

/// Request body for `PUT /lots/{id}/hours`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperatingHoursRequest {
    /// The lot's operating windows.
    pub windows: Vec<WindowRequest>,
}

impl OperatingHoursRequest {
    /// Converts every window, failing on the first malformed one.
    pub fn into_windows(self, lot_id: Uuid) -> EngineResult<Vec<OperatingWindow>> {
        self.windows
            .into_iter()
            .map(|w| Ok(OperatingWindow::new(lot_id, w.into_window()?)))
            .collect()
    }
}

/// Request body for `POST /lots/{id}/fee`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeRequest {
    /// Entry instant (RFC 3339).
    pub entry_time: DateTime<Utc>,
    /// Exit instant (RFC 3339).
    pub exit_time: DateTime<Utc>,
}

/// Request body for `POST /lots/{id}/vehicles/entry`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleEntryRequest {
    /// The spot to occupy (1-based).
    pub spot_number: u32,
    /// The vehicle's license plate.
    pub license_plate: String,
    /// The entry instant; omitted means "now" resolved at the boundary.
    #[serde(default)]
    pub at: Option<DateTime<Utc>>,
}

/// Request body for `POST /lots/{id}/vehicles/exit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleExitRequest {
    /// The spot to free (1-based).
    pub spot_number: u32,
    /// The exit instant; omitted means "now" resolved at the boundary.
    #[serde(default)]
    pub at: Option<DateTime<Utc>>,
}

/// Query parameters for `GET /lots/{id}/open`.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenQuery {
    /// The instant to check; omitted means "now" resolved at the boundary.
    #[serde(default)]
    pub at: Option<DateTime<Utc>>,
}
