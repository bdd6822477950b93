//! Core data types for calibration frame matching.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`FrameMetadata`](metadata::FrameMetadata): normalized metadata of one frame with
//!   typed, absence-tolerant readers
//! - [`CalibrationPool`](pool::CalibrationPool): insertion-ordered candidate frames keyed
//!   by identifier
//! - [`FrameType`](types::FrameType), [`CalibrationKind`](types::CalibrationKind): frame
//!   classification, plus the normalized header names and type tags
//!
//! ## Frame Types
//!
//! | Kind | Raw tag | Master tag    |
//! |------|---------|---------------|
//! | Dark | DARK    | MASTER DARK   |
//! | Bias | BIAS    | MASTER BIAS   |
//! | Flat | FLAT    | MASTER FLAT   |
//!
//! Tags are compared after upper-casing the frame's `type` field; there is no
//! substring or fuzzy matching.

pub mod metadata;
pub mod pool;
pub mod types;
