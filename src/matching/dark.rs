use std::cmp::Ordering;

use crate::core::metadata::FrameMetadata;
use crate::core::pool::CalibrationPool;
use crate::core::types::{CalibrationKind, HEADER_EXPOSURESECONDS, HEADER_SETTEMP};
use crate::matching::camera::matches_camera_settings;
use crate::matching::config::MatchingConfig;

/// Exposures closer than this are considered identical, in seconds
pub const EXACT_EXPOSURE_EPSILON: f64 = 0.001;

/// A dark that passed every filter, scored for ranking
#[derive(Debug, Clone)]
struct DarkCandidate<'a> {
    id: &'a str,
    is_exact: bool,
    /// Dark exposure minus light exposure, never negative
    exposure_diff: f64,
}

/// Find the best dark or master dark for a light frame.
///
/// A dark qualifies when it has compatible camera settings, an exposure at
/// least as long as the light's, and (if both frames record a set
/// temperature) a set temperature within `temperature_tolerance`.
///
/// Among qualifying darks the shortest exposure wins. With
/// `prefer_exact_exposure`, an exact-exposure dark outranks every longer
/// one. Ties keep pool order.
///
/// Returns `None` if the light has no numeric exposure or nothing qualifies.
#[must_use]
pub fn find_dark<'a>(
    light: &FrameMetadata,
    pool: &'a CalibrationPool,
    config: &MatchingConfig,
) -> Option<&'a str> {
    let light_exposure = light.get_f64(HEADER_EXPOSURESECONDS)?;
    let light_temp = light.get_f64(HEADER_SETTEMP);
    let requirements = config.camera_requirements();

    let mut candidates: Vec<DarkCandidate<'a>> = pool
        .iter()
        .filter(|(_, cal)| CalibrationKind::Dark.matches(cal))
        .filter(|(_, cal)| matches_camera_settings(light, cal, requirements))
        .filter_map(|(id, cal)| {
            let dark_exposure = cal.get_f64(HEADER_EXPOSURESECONDS)?;
            // Shorter darks under-subtract thermal noise
            if dark_exposure < light_exposure {
                return None;
            }

            if let (Some(lt), Some(dt)) = (light_temp, cal.get_f64(HEADER_SETTEMP)) {
                if (lt - dt).abs() > config.temperature_tolerance {
                    return None;
                }
            }

            Some(DarkCandidate {
                id,
                is_exact: (dark_exposure - light_exposure).abs() < EXACT_EXPOSURE_EPSILON,
                exposure_diff: dark_exposure - light_exposure,
            })
        })
        .collect();

    // sort_by is stable: equal keys keep pool order
    if config.prefer_exact_exposure {
        candidates.sort_by(|a, b| {
            (!a.is_exact)
                .cmp(&!b.is_exact)
                .then_with(|| compare_diff(a, b))
        });
    } else {
        candidates.sort_by(compare_diff);
    }

    candidates.first().map(|c| c.id)
}

fn compare_diff(a: &DarkCandidate<'_>, b: &DarkCandidate<'_>) -> Ordering {
    a.exposure_diff.total_cmp(&b.exposure_diff)
}
