use std::path::Path;

use crate::core::metadata::FrameMetadata;
use crate::core::pool::{CalibrationPool, OrderedEntries};
use crate::parsing::ParseError;
use crate::utils::validation::{check_frame_limit, validate_identifier};

/// Parse a JSON file holding one frame's metadata object
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or
/// `ParseError::Json` if the content is not a JSON object of scalars.
pub fn parse_light_file(path: &Path) -> Result<FrameMetadata, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_light_json(&content)
}

/// Parse one frame's metadata from a JSON object
///
/// # Errors
///
/// Returns `ParseError::Json` if the content is not a JSON object of scalars.
pub fn parse_light_json(json: &str) -> Result<FrameMetadata, ParseError> {
    Ok(serde_json::from_str(json)?)
}

/// Parse a JSON pool file
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or the errors of
/// [`parse_pool_json`].
pub fn parse_pool_file(path: &Path) -> Result<CalibrationPool, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_pool_json(&content)
}

/// Parse a JSON object mapping frame identifiers to metadata objects.
///
/// Entries keep their document order.
///
/// # Errors
///
/// Returns `ParseError::Json` if the content is malformed,
/// `ParseError::InvalidFormat` for an unusable identifier,
/// `ParseError::DuplicateIdentifier` if an identifier repeats, or
/// `ParseError::TooManyFrames` if the limit is exceeded.
pub fn parse_pool_json(json: &str) -> Result<CalibrationPool, ParseError> {
    let OrderedEntries(entries) = serde_json::from_str(json)?;

    let mut pool = CalibrationPool::new();
    for (id, meta) in entries {
        if check_frame_limit(pool.len()).is_some() {
            return Err(ParseError::TooManyFrames(pool.len()));
        }
        validate_identifier(&id)
            .map_err(|e| ParseError::InvalidFormat(format!("{e}: {id:?}")))?;
        pool.insert(id, meta)
            .map_err(|dup| ParseError::DuplicateIdentifier(dup.0))?;
    }

    Ok(pool)
}
