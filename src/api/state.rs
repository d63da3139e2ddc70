//! Application state for the Rate Schedule Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::service::RateEngine;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers,
/// currently the engine facade over the configured store.
#[derive(Clone)]
pub struct AppState {
    /// The engine instance serving all requests.
    engine: Arc<RateEngine>,
}

impl AppState {
    /// Creates a new application state around the given engine.
    pub fn new(engine: RateEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// Returns a reference to the engine.
    pub fn engine(&self) -> &RateEngine {
        &self.engine
    }
}
