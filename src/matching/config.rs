use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::matching::camera::CameraRequirements;

/// Default maximum set-temperature difference for darks, in degrees
pub const DEFAULT_TEMPERATURE_TOLERANCE: f64 = 5.0;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Per-call matching parameters.
///
/// Every field has a default, so a partial JSON object (or `{}`) is a
/// valid config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Maximum set-temperature difference between light and dark, inclusive
    pub temperature_tolerance: f64,

    /// Maximum days between light and flat, inclusive; `None` disables date matching
    pub date_tolerance_days: Option<u32>,

    /// Rank exact-exposure darks ahead of every longer dark
    pub prefer_exact_exposure: bool,

    /// Require equal gain when both frames record one
    pub require_gain_match: bool,

    /// Require equal offset when both frames record one
    pub require_offset_match: bool,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            temperature_tolerance: DEFAULT_TEMPERATURE_TOLERANCE,
            date_tolerance_days: None,
            prefer_exact_exposure: true,
            require_gain_match: true,
            require_offset_match: true,
        }
    }
}

impl MatchingConfig {
    /// Load a config from a JSON file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadError` if the file cannot be read,
    /// `ConfigError::ParseError` if it is not valid JSON, or
    /// `ConfigError::Invalid` if the temperature tolerance is negative or NaN.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a config from a JSON string
    ///
    /// # Errors
    ///
    /// See [`MatchingConfig::load_from_file`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject tolerances that could never admit a candidate
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if the temperature tolerance is negative or NaN.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.temperature_tolerance.is_nan() || self.temperature_tolerance < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "temperature_tolerance must be a non-negative number, got {}",
                self.temperature_tolerance
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn camera_requirements(&self) -> CameraRequirements {
        CameraRequirements {
            gain: self.require_gain_match,
            offset: self.require_offset_match,
        }
    }
}
