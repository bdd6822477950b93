use serde::Serialize;

use crate::core::metadata::FrameMetadata;
use crate::core::pool::CalibrationPool;
use crate::core::types::CalibrationKind;
use crate::matching::bias::find_bias;
use crate::matching::config::MatchingConfig;
use crate::matching::dark::find_dark;
use crate::matching::flat::find_flat;

/// Calibration frames selected for one light frame.
///
/// Each identifier is borrowed from the pool it was matched against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchResult<'a> {
    pub dark: Option<&'a str>,
    pub bias: Option<&'a str>,
    pub flat: Option<&'a str>,
}

impl<'a> MatchResult<'a> {
    /// Selected frame for one kind
    #[must_use]
    pub fn get(&self, kind: CalibrationKind) -> Option<&'a str> {
        match kind {
            CalibrationKind::Dark => self.dark,
            CalibrationKind::Bias => self.bias,
            CalibrationKind::Flat => self.flat,
        }
    }

    /// True when every kind found a frame
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.dark.is_some() && self.bias.is_some() && self.flat.is_some()
    }

    /// Kinds that found no frame
    #[must_use]
    pub fn missing(&self) -> Vec<CalibrationKind> {
        CalibrationKind::ALL
            .into_iter()
            .filter(|&kind| self.get(kind).is_none())
            .collect()
    }
}

/// Find a dark, a bias, and a flat for a light frame.
///
/// The three searches are independent; the same pool entry is never
/// considered for more than one kind because frame types are disjoint.
#[must_use]
pub fn find_all<'a>(
    light: &FrameMetadata,
    pool: &'a CalibrationPool,
    config: &MatchingConfig,
) -> MatchResult<'a> {
    MatchResult {
        dark: find_dark(light, pool, config),
        bias: find_bias(light, pool, config),
        flat: find_flat(light, pool, config),
    }
}

/// Matches light frames against a fixed pool with a fixed configuration
pub struct MatchingEngine<'a> {
    pool: &'a CalibrationPool,
    config: MatchingConfig,
}

impl<'a> MatchingEngine<'a> {
    /// Create a new matching engine with default configuration
    #[must_use]
    pub fn new(pool: &'a CalibrationPool) -> Self {
        Self {
            pool,
            config: MatchingConfig::default(),
        }
    }

    /// Create a new matching engine with custom configuration
    #[must_use]
    pub fn with_config(pool: &'a CalibrationPool, config: MatchingConfig) -> Self {
        Self { pool, config }
    }

    #[must_use]
    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    #[must_use]
    pub fn pool(&self) -> &'a CalibrationPool {
        self.pool
    }

    #[must_use]
    pub fn find_all(&self, light: &FrameMetadata) -> MatchResult<'a> {
        find_all(light, self.pool, &self.config)
    }

    /// Search for a single calibration kind
    #[must_use]
    pub fn find(&self, light: &FrameMetadata, kind: CalibrationKind) -> Option<&'a str> {
        match kind {
            CalibrationKind::Dark => find_dark(light, self.pool, &self.config),
            CalibrationKind::Bias => find_bias(light, self.pool, &self.config),
            CalibrationKind::Flat => find_flat(light, self.pool, &self.config),
        }
    }
}
