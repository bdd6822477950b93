//! Calibration frame matching engine.
//!
//! This module provides the core matching functionality:
//!
//! - [`MatchingEngine`](engine::MatchingEngine): matches light frames against a pool
//! - [`find_dark`](dark::find_dark), [`find_bias`](bias::find_bias),
//!   [`find_flat`](flat::find_flat): single-kind matchers
//! - [`find_all`](engine::find_all): all three kinds at once
//! - [`MatchingConfig`](config::MatchingConfig): tolerances and strictness
//!
//! ## Matching Rules
//!
//! Every kind requires the same camera name on both frames. Gain and offset
//! must agree when required and recorded on both frames.
//!
//! 1. **Dark**: exposure at least the light's, set temperature within
//!    tolerance; the shortest usable exposure wins, exact matches first
//! 2. **Bias**: first compatible frame in pool order
//! 3. **Flat**: same filter, optional date window; the closest date wins
//!
//! Missing or unreadable fields never raise an error. They either skip a
//! check or make a frame ineligible, and "no match" is an ordinary result.
//! The engine does no I/O and no logging.
//!
//! ## Example
//!
//! ```rust
//! use calib_solver::{CalibrationPool, FrameMetadata, MatchingEngine};
//!
//! let pool = CalibrationPool::new()
//!     .with("dark_120s.fits", FrameMetadata::new()
//!         .with("type", "MASTER DARK")
//!         .with("camera", "ZWO ASI2600MM")
//!         .with("exposureseconds", 120.0));
//!
//! let light = FrameMetadata::new()
//!     .with("camera", "ZWO ASI2600MM")
//!     .with("exposureseconds", 90.0);
//!
//! let engine = MatchingEngine::new(&pool);
//! let result = engine.find_all(&light);
//! assert_eq!(result.dark, Some("dark_120s.fits"));
//! assert_eq!(result.bias, None);
//! ```

pub mod bias;
pub mod camera;
pub mod classify;
pub mod config;
pub mod dark;
pub mod date;
pub mod engine;
pub mod flat;
