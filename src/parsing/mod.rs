//! Loaders for frame metadata produced by upstream header normalization.
//!
//! This module reads already-normalized metadata; it never opens image
//! files. Supported inputs:
//!
//! - **JSON light file**: one object of `field: value` pairs
//! - **JSON pool file**: an object mapping frame identifiers to metadata
//!   objects, read in document order
//! - **TSV/CSV table**: one row per frame, identifier in the first column
//!
//! ## Example
//!
//! ```rust
//! use calib_solver::parsing::json::parse_pool_json;
//!
//! let pool = parse_pool_json(r#"{
//!     "bias_1.fits": {"type": "BIAS", "camera": "ASI294MC"},
//!     "dark_300.fits": {"type": "DARK", "camera": "ASI294MC", "exposureseconds": 300}
//! }"#).unwrap();
//! assert_eq!(pool.ids().collect::<Vec<_>>(), vec!["bias_1.fits", "dark_300.fits"]);
//! ```
//!
//! ## Table Layout
//!
//! | filename       | type | camera   | exposureseconds | settemp |
//! |----------------|------|----------|-----------------|---------|
//! | dark_300.fits  | DARK | ASI294MC | 300             | -10     |
//! | bias_1.fits    | BIAS | ASI294MC |                 | -10     |
//!
//! Empty cells are read as null.

use std::path::Path;
use thiserror::Error;
use tracing::debug;

use crate::core::metadata::FrameMetadata;
use crate::core::pool::CalibrationPool;
use crate::utils::validation::MAX_FRAMES;

pub mod json;
pub mod tsv;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Duplicate frame identifier: {0}")]
    DuplicateIdentifier(String),

    #[error("Too many frames: {0} exceeds maximum allowed ({max})", max = MAX_FRAMES)]
    TooManyFrames(usize),
}

/// File layout, chosen from the extension
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Tsv,
    Csv,
}

impl InputFormat {
    /// Detect from the file extension; anything unrecognized is read as JSON
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match ext.as_deref() {
            Some("tsv" | "txt") => Self::Tsv,
            Some("csv") => Self::Csv,
            _ => Self::Json,
        }
    }
}

/// Load a calibration pool from a JSON or TSV/CSV file
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or the format's
/// parse errors if the content is invalid.
pub fn load_pool(path: &Path) -> Result<CalibrationPool, ParseError> {
    let format = InputFormat::from_path(path);
    debug!("Reading {} as {format:?}", path.display());

    let pool = match format {
        InputFormat::Json => json::parse_pool_file(path),
        InputFormat::Tsv => tsv::parse_table_file(path, '\t'),
        InputFormat::Csv => tsv::parse_table_file(path, ','),
    }?;

    debug!("Read {} frames from {}", pool.len(), path.display());
    Ok(pool)
}

/// Load a single light frame's metadata.
///
/// JSON files hold one metadata object; a table must contain exactly one
/// row, whose identifier column is kept as the `filename` field.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read,
/// `ParseError::InvalidFormat` if a table does not contain exactly one row,
/// or the format's parse errors if the content is invalid.
pub fn load_light(path: &Path) -> Result<FrameMetadata, ParseError> {
    let format = InputFormat::from_path(path);
    debug!("Reading light frame {} as {format:?}", path.display());

    let delimiter = match format {
        InputFormat::Json => return json::parse_light_file(path),
        InputFormat::Tsv => '\t',
        InputFormat::Csv => ',',
    };

    let table = tsv::parse_table_file(path, delimiter)?;
    if table.len() != 1 {
        return Err(ParseError::InvalidFormat(format!(
            "Expected exactly one light frame row, found {}",
            table.len()
        )));
    }
    let light = table
        .iter()
        .next()
        .map(|(id, meta)| tsv::with_filename(id, meta))
        .ok_or_else(|| ParseError::InvalidFormat("No light frame found".to_string()));
    light
}

/// Load many light frames, keyed by identifier, in file order.
///
/// Table rows keep their identifier as the `filename` field, the same as
/// [`load_light`] does for a single row.
///
/// # Errors
///
/// Same as [`load_pool`]; light frames use the pool file layout.
pub fn load_lights(path: &Path) -> Result<CalibrationPool, ParseError> {
    let lights = load_pool(path)?;
    if InputFormat::from_path(path) == InputFormat::Json {
        return Ok(lights);
    }

    let named = lights
        .iter()
        .fold(CalibrationPool::new(), |pool, (id, meta)| {
            pool.with(id, tsv::with_filename(id, meta))
        });
    Ok(named)
}
