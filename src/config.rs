//! Engine configuration.
//!
//! This module provides the [`EngineConfig`] type, loaded from a YAML file
//! or constructed with defaults for embedded use.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{EngineError, EngineResult};

/// Default ceiling on a billable span: 30 days of hourly slots.
pub const DEFAULT_MAX_BILLABLE_HOURS: u32 = 720;

/// Tunable limits for the engine.
///
/// # Example
///
/// ```
/// use rate_engine::config::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.max_billable_hours, 720);
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum entry-to-exit span, in hours, that fee computation accepts.
    ///
    /// The hour-by-hour walk is bounded by this cap so corrupted session
    /// data cannot produce an unbounded loop.
    pub max_billable_hours: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_billable_hours: DEFAULT_MAX_BILLABLE_HOURS,
        }
    }
}

impl EngineConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ConfigNotFound`] when the file is missing and
    /// [`EngineError::ConfigParseError`] when it contains invalid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }
}
