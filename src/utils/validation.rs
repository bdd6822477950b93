//! Centralized validation and helper functions.

/// Maximum number of frames allowed in a single input file
pub const MAX_FRAMES: usize = 100_000;

/// Maximum length of a frame identifier, in bytes
pub const MAX_IDENTIFIER_LENGTH: usize = 4096;

/// Identifier validation error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Empty frame identifier")]
    EmptyIdentifier,
    #[error("Frame identifier too long: exceeds {MAX_IDENTIFIER_LENGTH} bytes")]
    IdentifierTooLong,
    #[error("Frame identifier contains control characters")]
    ControlCharacters,
}

/// Check if adding another frame would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new frame.
/// Returns an error message if adding would exceed the limit, None if safe to add.
///
/// # Example
/// ```
/// use calib_solver::utils::validation::{check_frame_limit, MAX_FRAMES};
///
/// assert!(check_frame_limit(10).is_none());
/// assert!(check_frame_limit(MAX_FRAMES).is_some());
/// ```
#[must_use]
pub fn check_frame_limit(count: usize) -> Option<String> {
    if count >= MAX_FRAMES {
        Some(format!(
            "Too many frames: adding another would exceed maximum of {MAX_FRAMES}"
        ))
    } else {
        None
    }
}

/// Validate a frame identifier taken from an input file.
///
/// Identifiers are returned verbatim as match results, so they are never
/// rewritten here; only unusable values are rejected.
///
/// # Errors
///
/// Returns `ValidationError::EmptyIdentifier` if the identifier is blank,
/// `ValidationError::IdentifierTooLong` if it exceeds the limit, or
/// `ValidationError::ControlCharacters` if it contains NUL or other
/// control characters.
pub fn validate_identifier(id: &str) -> Result<(), ValidationError> {
    if id.trim().is_empty() {
        return Err(ValidationError::EmptyIdentifier);
    }

    if id.len() > MAX_IDENTIFIER_LENGTH {
        return Err(ValidationError::IdentifierTooLong);
    }

    if id.chars().any(char::is_control) {
        return Err(ValidationError::ControlCharacters);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_frame_limit() {
        assert!(check_frame_limit(100).is_none());
        assert!(check_frame_limit(MAX_FRAMES - 1).is_none());
        assert!(check_frame_limit(MAX_FRAMES).is_some());
        assert!(check_frame_limit(MAX_FRAMES + 1).is_some());
    }

    #[test]
    fn test_validate_identifier_accepts_paths() {
        assert!(validate_identifier("/data/masters/dark_120s.xisf").is_ok());
        assert!(validate_identifier("C:\\astro\\flat Ha.fits").is_ok());
        assert!(validate_identifier("../relative/bias.fits").is_ok());
    }

    #[test]
    fn test_validate_identifier_rejects() {
        assert_eq!(
            validate_identifier("   "),
            Err(ValidationError::EmptyIdentifier)
        );
        assert_eq!(
            validate_identifier("dark\0.fits"),
            Err(ValidationError::ControlCharacters)
        );
        assert_eq!(
            validate_identifier("dark\n.fits"),
            Err(ValidationError::ControlCharacters)
        );
        let long = "a".repeat(MAX_IDENTIFIER_LENGTH + 1);
        assert_eq!(
            validate_identifier(&long),
            Err(ValidationError::IdentifierTooLong)
        );
    }
}
