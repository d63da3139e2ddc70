//! Parking lot model.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;

/// A parking lot and the settings the engine needs from it.
///
/// The timezone is the IANA zone used for every conversion between absolute
/// instants and the lot's local (weekday, clock time) points during rate
/// resolution, fee computation and operating-hours checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkingLot {
    /// Unique identifier for the lot.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Street address or site description.
    pub location: String,
    /// Number of numbered spots (1-based, bounds-checked on entry).
    pub total_capacity: u32,
    /// Occupancy percentage (0-100) at which high-occupancy notifications
    /// are raised.
    pub notification_threshold: u32,
    /// IANA timezone for local-time conversions, e.g. `America/Bogota`.
    pub timezone: Tz,
}

impl ParkingLot {
    /// Creates a lot with a fresh id, validating capacity and threshold.
    pub fn new(
        name: impl Into<String>,
        location: impl Into<String>,
        total_capacity: u32,
        notification_threshold: u32,
        timezone: Tz,
    ) -> Result<Self, EngineError> {
        let name = name.into();
        let location = location.into();
        if name.trim().is_empty() {
            return Err(EngineError::InvalidFormat {
                field: "name".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if location.trim().is_empty() {
            return Err(EngineError::InvalidFormat {
                field: "location".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if total_capacity == 0 {
            return Err(EngineError::InvalidFormat {
                field: "total_capacity".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if notification_threshold > 100 {
            return Err(EngineError::InvalidFormat {
                field: "notification_threshold".to_string(),
                message: format!("must be 0-100, got {}", notification_threshold),
            });
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            location,
            total_capacity,
            notification_threshold,
            timezone,
        })
    }
}
