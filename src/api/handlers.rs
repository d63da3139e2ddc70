//! HTTP request handlers for the Rate Schedule Engine API.
//!
//! This module contains the handler functions for the lot, schedule and
//! vehicle endpoints. Handlers resolve "now" at the boundary when a request
//! omits its reference instant; the engine itself never reads the clock.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{ParkingLot, VehicleSession};
use crate::service::{EntryReceipt, ExitReceipt};

use super::request::{
    CreateLotRequest, FeeRequest, OpenQuery, OperatingHoursRequest, RateSetRequest,
    VehicleEntryRequest, VehicleExitRequest,
};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/lots", post(create_lot_handler))
        .route("/lots/:lot_id/spaces", get(spaces_handler))
        .route(
            "/lots/:lot_id/rates",
            get(get_rates_handler)
                .put(replace_rates_handler)
                .post(create_rates_handler)
                .delete(clear_rates_handler),
        )
        .route("/lots/:lot_id/rates/validate", post(validate_rates_handler))
        .route("/lots/:lot_id/hours", put(replace_hours_handler))
        .route("/lots/:lot_id/fee", post(fee_handler))
        .route("/lots/:lot_id/open", get(open_handler))
        .route("/lots/:lot_id/vehicles/entry", post(entry_handler))
        .route("/lots/:lot_id/vehicles/exit", post(exit_handler))
        .with_state(state)
}

/// Summary of a lot in occupancy responses.
#[derive(Debug, Serialize)]
struct LotSummary {
    id: Uuid,
    name: String,
    location: String,
}

/// One spot in an occupancy response.
#[derive(Debug, Serialize)]
struct SpotInfo {
    spot_number: u32,
    is_occupied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    license_plate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    entry_time: Option<DateTime<Utc>>,
}

/// Response body for `GET /lots/{id}/spaces`.
#[derive(Debug, Serialize)]
struct SpacesResponse {
    lot: LotSummary,
    total_capacity: u32,
    available_spots: u32,
    spots: Vec<SpotInfo>,
}

/// Response body for `POST /lots/{id}/rates/validate`.
#[derive(Debug, Serialize)]
struct ValidationResponse {
    valid: bool,
}

/// Response body for `DELETE /lots/{id}/rates`.
#[derive(Debug, Serialize)]
struct ClearRatesResponse {
    deleted_count: usize,
}

/// Response body for `POST /lots/{id}/fee`.
#[derive(Debug, Serialize)]
struct FeeResponse {
    total_fee: rust_decimal::Decimal,
}

/// Response body for `GET /lots/{id}/open`.
#[derive(Debug, Serialize)]
struct OpenResponse {
    open: bool,
    checked_at: DateTime<Utc>,
}

/// Response body for vehicle entry registration.
#[derive(Debug, Serialize)]
struct VehicleEntryResponse {
    message: String,
    #[serde(flatten)]
    receipt: EntryReceipt,
}

/// Response body for vehicle exit registration.
#[derive(Debug, Serialize)]
struct VehicleExitResponse {
    message: String,
    #[serde(flatten)]
    receipt: ExitReceipt,
}

/// Converts an engine error into its HTTP response, logging it against the
/// request's correlation id.
fn error_response(correlation_id: Uuid, error: EngineError) -> Response {
    let api_error: ApiErrorResponse = error.into();
    warn!(
        correlation_id = %correlation_id,
        status = %api_error.status,
        error = %api_error.error.message,
        "Request failed"
    );
    api_error.into_response()
}

/// Converts a JSON extraction rejection into a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    (StatusCode::BAD_REQUEST, Json(error)).into_response()
}

/// Handler for POST /lots.
async fn create_lot_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateLotRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let lot = match ParkingLot::try_from(request) {
        Ok(lot) => lot,
        Err(err) => return error_response(correlation_id, err),
    };

    match state.engine().create_lot(lot) {
        Ok(created) => {
            info!(
                correlation_id = %correlation_id,
                lot_id = %created.id,
                capacity = created.total_capacity,
                "Lot created"
            );
            (StatusCode::CREATED, Json(created)).into_response()
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /lots/{id}/spaces.
async fn spaces_handler(State(state): State<AppState>, Path(lot_id): Path<Uuid>) -> Response {
    let correlation_id = Uuid::new_v4();

    let lot = match state.engine().lot(lot_id) {
        Ok(lot) => lot,
        Err(err) => return error_response(correlation_id, err),
    };
    let sessions = match state.engine().spot_sessions(lot_id) {
        Ok(sessions) => sessions,
        Err(err) => return error_response(correlation_id, err),
    };

    let available_spots = sessions.iter().filter(|s| s.is_none()).count() as u32;
    let spots = sessions
        .iter()
        .enumerate()
        .map(|(index, session)| spot_info(index as u32 + 1, session))
        .collect();

    let response = SpacesResponse {
        lot: LotSummary {
            id: lot.id,
            name: lot.name,
            location: lot.location,
        },
        total_capacity: lot.total_capacity,
        available_spots,
        spots,
    };
    (StatusCode::OK, Json(response)).into_response()
}

fn spot_info(spot_number: u32, session: &Option<VehicleSession>) -> SpotInfo {
    SpotInfo {
        spot_number,
        is_occupied: session.is_some(),
        license_plate: session.as_ref().map(|s| s.license_plate.clone()),
        entry_time: session.as_ref().map(|s| s.entry_time),
    }
}

/// Handler for GET /lots/{id}/rates.
async fn get_rates_handler(State(state): State<AppState>, Path(lot_id): Path<Uuid>) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.engine().rate_schedules(lot_id) {
        Ok(schedules) => (StatusCode::OK, Json(schedules)).into_response(),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for PUT /lots/{id}/rates.
///
/// Replaces the lot's full schedule set after validating the candidate set
/// for overlap and coverage.
async fn replace_rates_handler(
    State(state): State<AppState>,
    Path(lot_id): Path<Uuid>,
    payload: Result<Json<RateSetRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let schedules = match request.into_schedules(lot_id) {
        Ok(schedules) => schedules,
        Err(err) => return error_response(correlation_id, err),
    };

    info!(
        correlation_id = %correlation_id,
        lot_id = %lot_id,
        count = schedules.len(),
        "Replacing rate schedules"
    );
    match state.engine().replace_rate_schedules(lot_id, schedules) {
        Ok(committed) => (StatusCode::OK, Json(committed)).into_response(),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /lots/{id}/rates.
///
/// Appends schedules, validating the merged set against what already
/// exists.
async fn create_rates_handler(
    State(state): State<AppState>,
    Path(lot_id): Path<Uuid>,
    payload: Result<Json<RateSetRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let schedules = match request.into_schedules(lot_id) {
        Ok(schedules) => schedules,
        Err(err) => return error_response(correlation_id, err),
    };

    match state.engine().create_rate_schedules(lot_id, schedules) {
        Ok(committed) => (StatusCode::CREATED, Json(committed)).into_response(),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for DELETE /lots/{id}/rates.
async fn clear_rates_handler(State(state): State<AppState>, Path(lot_id): Path<Uuid>) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.engine().clear_rate_schedules(lot_id) {
        Ok(deleted_count) => {
            info!(
                correlation_id = %correlation_id,
                lot_id = %lot_id,
                deleted_count,
                "Cleared rate schedules"
            );
            (StatusCode::OK, Json(ClearRatesResponse { deleted_count })).into_response()
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /lots/{id}/rates/validate.
///
/// Dry-runs overlap and coverage validation of a candidate set without
/// persisting anything.
async fn validate_rates_handler(
    State(state): State<AppState>,
    Path(lot_id): Path<Uuid>,
    payload: Result<Json<RateSetRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let schedules = match request.into_schedules(lot_id) {
        Ok(schedules) => schedules,
        Err(err) => return error_response(correlation_id, err),
    };

    match state.engine().validate_schedule_set(&schedules) {
        Ok(()) => (StatusCode::OK, Json(ValidationResponse { valid: true })).into_response(),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for PUT /lots/{id}/hours.
async fn replace_hours_handler(
    State(state): State<AppState>,
    Path(lot_id): Path<Uuid>,
    payload: Result<Json<OperatingHoursRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let windows = match request.into_windows(lot_id) {
        Ok(windows) => windows,
        Err(err) => return error_response(correlation_id, err),
    };

    match state.engine().replace_operating_windows(lot_id, windows) {
        Ok(committed) => (StatusCode::OK, Json(committed)).into_response(),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /lots/{id}/fee.
async fn fee_handler(
    State(state): State<AppState>,
    Path(lot_id): Path<Uuid>,
    payload: Result<Json<FeeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    match state
        .engine()
        .compute_fee(lot_id, request.entry_time, request.exit_time)
    {
        Ok(total_fee) => {
            info!(
                correlation_id = %correlation_id,
                lot_id = %lot_id,
                total_fee = %total_fee,
                duration_us = start_time.elapsed().as_micros(),
                "Fee computed"
            );
            (StatusCode::OK, Json(FeeResponse { total_fee })).into_response()
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /lots/{id}/open.
async fn open_handler(
    State(state): State<AppState>,
    Path(lot_id): Path<Uuid>,
    Query(query): Query<OpenQuery>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let checked_at = query.at.unwrap_or_else(Utc::now);
    match state.engine().is_lot_open(lot_id, checked_at) {
        Ok(open) => (StatusCode::OK, Json(OpenResponse { open, checked_at })).into_response(),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /lots/{id}/vehicles/entry.
async fn entry_handler(
    State(state): State<AppState>,
    Path(lot_id): Path<Uuid>,
    payload: Result<Json<VehicleEntryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let at = request.at.unwrap_or_else(Utc::now);
    match state
        .engine()
        .register_entry(lot_id, request.spot_number, &request.license_plate, at)
    {
        Ok(receipt) => {
            info!(
                correlation_id = %correlation_id,
                lot_id = %lot_id,
                spot_number = request.spot_number,
                notify = receipt.notify_high_occupancy,
                "Vehicle entry registered"
            );
            let message = format!(
                "Vehicle {} entered spot {}",
                receipt.session.license_plate, receipt.session.spot_number
            );
            (StatusCode::OK, Json(VehicleEntryResponse { message, receipt })).into_response()
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /lots/{id}/vehicles/exit.
async fn exit_handler(
    State(state): State<AppState>,
    Path(lot_id): Path<Uuid>,
    payload: Result<Json<VehicleExitRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let at = request.at.unwrap_or_else(Utc::now);
    match state.engine().register_exit(lot_id, request.spot_number, at) {
        Ok(receipt) => {
            info!(
                correlation_id = %correlation_id,
                lot_id = %lot_id,
                spot_number = receipt.spot_number,
                total_fee = %receipt.total_fee,
                "Vehicle exit registered"
            );
            let message = format!("Vehicle exited from spot {}", receipt.spot_number);
            (StatusCode::OK, Json(VehicleExitResponse { message, receipt })).into_response()
        }
        Err(err) => error_response(correlation_id, err),
    }
}
