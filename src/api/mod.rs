//! HTTP API module for the Rate Schedule Engine.
//!
//! This module provides the REST endpoints the surrounding administration
//! service calls: schedule validation and replacement, fee computation,
//! operating-hours checks, and gated vehicle entry/exit registration.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    CreateLotRequest, FeeRequest, OperatingHoursRequest, RateScheduleRequest, RateSetRequest,
    VehicleEntryRequest, VehicleExitRequest, WindowRequest,
};
pub use response::ApiError;
pub use state::AppState;
