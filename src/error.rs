//! Error types for the Rate Schedule Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while validating rate schedules,
//! computing parking fees, and gating vehicle operations.

use thiserror::Error;
use uuid::Uuid;

use crate::schedule::{CoverageGap, OverlapConflict};

/// The main error type for the Rate Schedule Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// Validation errors (`ScheduleConflict`, `IncompleteCoverage`) carry the
/// full batch of findings rather than the first one: schedule editing is
/// iterative and partial feedback forces repeated round-trips.
///
/// # Example
///
/// ```
/// use rate_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/engine.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/engine.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A field in the input was malformed (clock time, day label, amount).
    #[error("Invalid {field}: {message}")]
    InvalidFormat {
        /// The field that failed validation.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// Two or more schedules overlap on a shared day label.
    ///
    /// Carries every conflicting pair found in one validation pass.
    #[error("{}", format_overlaps(.overlaps))]
    ScheduleConflict {
        /// All conflicting pairs, with the day labels they share.
        overlaps: Vec<OverlapConflict>,
    },

    /// The schedule set leaves part of the week unbilled.
    ///
    /// Carries every gap across all eight day labels.
    #[error("Coverage error: {}", format_gaps(.gaps))]
    IncompleteCoverage {
        /// All uncovered intervals, per day label.
        gaps: Vec<CoverageGap>,
    },

    /// The requested time span was invalid (exit not after entry, or the
    /// span exceeds the configured billing maximum).
    #[error("Invalid time range: {message}")]
    InvalidRange {
        /// A description of the range problem.
        message: String,
    },

    /// No rate schedule applied at the given local point in time.
    ///
    /// An accepted schedule set covers every minute of every day, so this
    /// indicates the coverage invariant was violated after acceptance. It is
    /// a server-side fault, not a user input error.
    #[error("No rate schedule applies at {time} on day {day}")]
    NoApplicableRate {
        /// The day label (1-7) of the unresolvable point.
        day: u8,
        /// The clock time ("HH:mm") of the unresolvable point.
        time: String,
    },

    /// The persisted schedule set violated an invariant that validation
    /// should have enforced (e.g. more than one schedule matched a point).
    #[error("Schedule integrity violation: {message}")]
    Integrity {
        /// A description of the violated invariant.
        message: String,
    },

    /// The lot is outside its operating hours.
    #[error("Parking lot {lot_id} is closed at {time}")]
    Closed {
        /// The lot that rejected the operation.
        lot_id: Uuid,
        /// The local clock time of the attempted operation.
        time: String,
    },

    /// No parking lot exists with the given id.
    #[error("Parking lot not found: {lot_id}")]
    LotNotFound {
        /// The unknown lot id.
        lot_id: Uuid,
    },

    /// The spot number is outside the lot's capacity.
    #[error("Spot {spot_number} does not exist (capacity {capacity})")]
    SpotNotFound {
        /// The requested spot number.
        spot_number: u32,
        /// The lot's total capacity.
        capacity: u32,
    },

    /// The spot already holds a vehicle.
    #[error("Spot {spot_number} is already occupied")]
    SpotOccupied {
        /// The requested spot number.
        spot_number: u32,
    },

    /// The spot holds no vehicle.
    #[error("Spot {spot_number} is not occupied")]
    SpotVacant {
        /// The requested spot number.
        spot_number: u32,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

fn format_overlaps(overlaps: &[OverlapConflict]) -> String {
    overlaps
        .iter()
        .map(|o| o.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

fn format_gaps(gaps: &[CoverageGap]) -> String {
    // Gaps arrive sorted by day; group consecutive runs per day so the
    // message reads "Day 1 has gaps: a, b; Day 2 has gaps: c".
    let mut parts: Vec<String> = Vec::new();
    let mut idx = 0;
    while idx < gaps.len() {
        let day = gaps[idx].day;
        let mut spans = Vec::new();
        while idx < gaps.len() && gaps[idx].day == day {
            spans.push(gaps[idx].span());
            idx += 1;
        }
        parts.push(format!("Day {} has gaps: {}", day.as_u8(), spans.join(", ")));
    }
    parts.join("; ")
}
