use crate::core::metadata::FrameMetadata;
use crate::core::pool::CalibrationPool;
use crate::core::types::CalibrationKind;
use crate::matching::camera::matches_camera_settings;
use crate::matching::config::MatchingConfig;

/// Find a bias or master bias for a light frame.
///
/// Bias frames are zero-exposure, so only the frame type and camera
/// settings are checked. The first compatible entry in pool order wins;
/// callers wanting a particular bias must order the pool accordingly.
#[must_use]
pub fn find_bias<'a>(
    light: &FrameMetadata,
    pool: &'a CalibrationPool,
    config: &MatchingConfig,
) -> Option<&'a str> {
    let requirements = config.camera_requirements();
    pool.iter()
        .find(|(_, cal)| {
            CalibrationKind::Bias.matches(cal) && matches_camera_settings(light, cal, requirements)
        })
        .map(|(id, _)| id)
}
