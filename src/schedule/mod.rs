//! The schedule algebra at the core of the engine.
//!
//! This module contains the window expansion that turns opening/closing
//! clock times into minute ranges, the overlap and coverage validators run
//! against a lot's full schedule set before any persistence, the resolver
//! that finds the single rate applicable at a point in time, the
//! hour-by-hour fee computation, and the operating-hours gate consulted by
//! vehicle entry and exit registration.

mod coverage;
mod fee;
mod gate;
mod overlap;
mod resolver;
mod window;

pub use coverage::{CoverageGap, find_coverage_gaps};
pub use fee::compute_fee;
pub use gate::is_open_at;
pub use overlap::{OverlapConflict, find_overlaps};
pub use resolver::{local_point, resolve_rate};
pub use window::{MinuteRange, expand_window};
