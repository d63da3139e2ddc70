//! Core data models for the Rate Schedule Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod clock_time;
mod day_label;
mod lot;
mod schedule;
mod session;
mod window;

pub use clock_time::{ClockTime, MINUTES_PER_DAY};
pub use day_label::DayLabel;
pub use lot::ParkingLot;
pub use schedule::{MAX_NAME_LENGTH, OperatingWindow, RateSchedule};
pub use session::VehicleSession;
pub use window::WeeklyWindow;
