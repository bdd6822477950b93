//! # calib-solver
//!
//! A library for selecting calibration frames for astrophotography light frames.
//!
//! Stacking software needs a dark, a bias, and a flat for every light frame, and
//! each of them has to come from the same camera running at the same settings.
//! A night of imaging usually leaves a pool of raw and master calibration frames
//! behind, taken at different exposures, temperatures, and dates.
//!
//! `calib-solver` picks the most appropriate frame of each kind from that pool,
//! working purely on normalized header metadata.
//!
//! ## Features
//!
//! - **Dark matching**: shortest usable exposure within a set-temperature tolerance
//! - **Bias matching**: first frame taken with compatible camera settings
//! - **Flat matching**: same filter, closest observation date, optional date window
//! - **Tolerant of gaps**: missing fields skip checks instead of failing
//! - **Deterministic**: ties resolve by pool order
//!
//! ## Example
//!
//! ```rust
//! use calib_solver::{CalibrationPool, FrameMetadata, MatchingConfig, MatchingEngine};
//!
//! let pool = CalibrationPool::new()
//!     .with("bias.fits", FrameMetadata::new()
//!         .with("type", "MASTER BIAS")
//!         .with("camera", "ASI294MC")
//!         .with("gain", 120))
//!     .with("flat_ha.fits", FrameMetadata::new()
//!         .with("type", "FLAT")
//!         .with("camera", "ASI294MC")
//!         .with("filter", "Ha")
//!         .with("date", "2024-01-15"));
//!
//! let light = FrameMetadata::new()
//!     .with("camera", "ASI294MC")
//!     .with("gain", 120)
//!     .with("filter", "Ha")
//!     .with("date", "2024-01-17");
//!
//! let config = MatchingConfig {
//!     date_tolerance_days: Some(7),
//!     ..MatchingConfig::default()
//! };
//! let engine = MatchingEngine::with_config(&pool, config);
//! let result = engine.find_all(&light);
//!
//! assert_eq!(result.dark, None);
//! assert_eq!(result.bias, Some("bias.fits"));
//! assert_eq!(result.flat, Some("flat_ha.fits"));
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Frame metadata, calibration pool, and frame type tags
//! - [`matching`]: Per-kind matchers, matching config, and the engine
//! - [`parsing`]: Loaders for JSON and TSV/CSV metadata files
//! - [`cli`]: Command-line interface implementation
//! - [`utils`]: Input limits and progress reporting

pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use core::metadata::{FrameMetadata, MetadataValue};
pub use core::pool::CalibrationPool;
pub use core::types::{CalibrationKind, FrameType};
pub use matching::bias::find_bias;
pub use matching::camera::CameraRequirements;
pub use matching::config::MatchingConfig;
pub use matching::dark::find_dark;
pub use matching::engine::{find_all, MatchResult, MatchingEngine};
pub use matching::flat::find_flat;
