//! Rate Schedule Engine for parking lot administration.
//!
//! This crate models recurring weekly billing windows for parking lots,
//! proves that a lot's rate schedules neither overlap nor leave gaps, and
//! computes the fee owed for an arbitrary entry/exit time span.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod schedule;
pub mod service;
pub mod store;
