//! Response types for the Rate Schedule Engine API.
//!
//! This module defines the error response structures and the mapping from
//! engine errors to HTTP statuses. Validation failures map to 400 with the
//! full batch of findings in the message; integrity faults map to 500.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match &error {
            EngineError::InvalidFormat { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("VALIDATION_ERROR", error.to_string()),
            },
            EngineError::ScheduleConflict { overlaps } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "SCHEDULE_CONFLICT",
                    error.to_string(),
                    format!("{} conflicting pair(s) found", overlaps.len()),
                ),
            },
            EngineError::IncompleteCoverage { gaps } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "COVERAGE_ERROR",
                    error.to_string(),
                    format!("{} gap(s) found", gaps.len()),
                ),
            },
            EngineError::InvalidRange { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INVALID_RANGE", error.to_string()),
            },
            EngineError::NoApplicableRate { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "NO_APPLICABLE_RATE",
                    error.to_string(),
                    "The lot's schedule set no longer covers this point in time",
                ),
            },
            EngineError::Integrity { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::new("INTEGRITY_ERROR", error.to_string()),
            },
            EngineError::Closed { .. } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new("LOT_CLOSED", error.to_string()),
            },
            EngineError::LotNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("LOT_NOT_FOUND", error.to_string()),
            },
            EngineError::SpotNotFound { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("SPOT_NOT_FOUND", error.to_string()),
            },
            EngineError::SpotOccupied { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("SPOT_OCCUPIED", error.to_string()),
            },
            EngineError::SpotVacant { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("SPOT_VACANT", error.to_string()),
            },
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::new("CONFIG_ERROR", error.to_string()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DayLabel;
    use crate::schedule::OverlapConflict;
    use uuid::Uuid;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details")); // Should be skipped when None
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_conflict_maps_to_bad_request() {
        let engine_error = EngineError::ScheduleConflict {
            overlaps: vec![OverlapConflict {
                first: "Day".to_string(),
                second: "Night".to_string(),
                days: vec![DayLabel::Monday],
            }],
        };
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "SCHEDULE_CONFLICT");
        assert!(api_error.error.message.contains("\"Day\""));
    }

    #[test]
    fn test_lot_not_found_maps_to_404() {
        let engine_error = EngineError::LotNotFound {
            lot_id: Uuid::new_v4(),
        };
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::NOT_FOUND);
        assert_eq!(api_error.error.code, "LOT_NOT_FOUND");
    }

    #[test]
    fn test_closed_maps_to_conflict_status() {
        let engine_error = EngineError::Closed {
            lot_id: Uuid::new_v4(),
            time: "23:30".to_string(),
        };
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::CONFLICT);
        assert_eq!(api_error.error.code, "LOT_CLOSED");
    }

    #[test]
    fn test_resolution_faults_map_to_500() {
        let engine_error = EngineError::NoApplicableRate {
            day: 3,
            time: "12:00".to_string(),
        };
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "NO_APPLICABLE_RATE");

        let engine_error = EngineError::Integrity {
            message: "two schedules matched".to_string(),
        };
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "INTEGRITY_ERROR");
    }
}
