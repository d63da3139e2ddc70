//! Rate schedules and operating windows.
//!
//! Both types share the weekly window algebra. A lot's rate schedules must
//! jointly cover the whole week without overlap; operating windows are only
//! required not to overlap, since a lot may be closed part of the week.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;

use super::WeeklyWindow;

/// The maximum accepted length of a schedule name.
pub const MAX_NAME_LENGTH: usize = 255;

/// A named billing window owned by a parking lot.
///
/// The amount is an hourly fee in currency minor units, agnostic of the
/// actual currency. A lot's full set of rate schedules must pairwise not
/// overlap on any shared day label and must jointly cover all eight day
/// labels for the full 1440 minutes; that invariant is enforced at write
/// time against the complete post-mutation set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSchedule {
    /// Unique identifier for the schedule.
    pub id: Uuid,
    /// The lot this schedule belongs to.
    pub lot_id: Uuid,
    /// Display name, e.g. "Day rate" or "Night rate".
    pub name: String,
    /// Hourly fee amount (non-negative).
    pub amount: Decimal,
    /// The weekly window this rate applies in.
    pub window: WeeklyWindow,
}

impl RateSchedule {
    /// Creates a rate schedule with a fresh id, validating name and amount.
    pub fn new(
        lot_id: Uuid,
        name: impl Into<String>,
        amount: Decimal,
        window: WeeklyWindow,
    ) -> Result<Self, EngineError> {
        let name = name.into();
        validate_name(&name)?;
        if amount < Decimal::ZERO {
            return Err(EngineError::InvalidFormat {
                field: "amount".to_string(),
                message: format!("must be non-negative, got {}", amount),
            });
        }
        Ok(Self {
            id: Uuid::new_v4(),
            lot_id,
            name,
            amount,
            window,
        })
    }
}

/// A window during which a lot accepts vehicle entry and exit.
///
/// An empty operating-window set means no restriction is configured and the
/// lot is treated as always open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingWindow {
    /// The lot this window belongs to.
    pub lot_id: Uuid,
    /// The weekly window the lot is open in.
    pub window: WeeklyWindow,
}

impl OperatingWindow {
    /// Creates an operating window for the given lot.
    pub fn new(lot_id: Uuid, window: WeeklyWindow) -> Self {
        Self { lot_id, window }
    }
}

fn validate_name(name: &str) -> Result<(), EngineError> {
    if name.trim().is_empty() {
        return Err(EngineError::InvalidFormat {
            field: "name".to_string(),
            message: "must not be empty".to_string(),
        });
    }
    if name.len() > MAX_NAME_LENGTH {
        return Err(EngineError::InvalidFormat {
            field: "name".to_string(),
            message: format!("must be at most {} characters", MAX_NAME_LENGTH),
        });
    }
    Ok(())
}
