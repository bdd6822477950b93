use crate::core::metadata::FrameMetadata;
use crate::core::types::{HEADER_CAMERA, HEADER_GAIN, HEADER_OFFSET};

/// Which camera settings must agree between a light and a calibration frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraRequirements {
    pub gain: bool,
    pub offset: bool,
}

impl Default for CameraRequirements {
    fn default() -> Self {
        Self {
            gain: true,
            offset: true,
        }
    }
}

/// Check whether a calibration frame was taken with compatible camera settings.
///
/// The camera name must be present on both frames and identical
/// (case-sensitive). Gain and offset, when required, must be numerically
/// equal only if both frames record them; a value missing on either side
/// skips that check.
#[must_use]
pub fn matches_camera_settings(
    light: &FrameMetadata,
    calibration: &FrameMetadata,
    requirements: CameraRequirements,
) -> bool {
    match (light.get_str(HEADER_CAMERA), calibration.get_str(HEADER_CAMERA)) {
        (Some(a), Some(b)) if a == b => {}
        _ => return false,
    }

    if requirements.gain && !numeric_field_agrees(light, calibration, HEADER_GAIN) {
        return false;
    }

    if requirements.offset && !numeric_field_agrees(light, calibration, HEADER_OFFSET) {
        return false;
    }

    true
}

/// True unless both frames carry the field and the values differ
#[allow(clippy::float_cmp)]
fn numeric_field_agrees(light: &FrameMetadata, calibration: &FrameMetadata, key: &str) -> bool {
    match (light.get_f64(key), calibration.get_f64(key)) {
        (Some(a), Some(b)) => a == b,
        _ => true,
    }
}
