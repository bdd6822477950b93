use crate::core::metadata::FrameMetadata;
use crate::core::pool::CalibrationPool;
use crate::core::types::{CalibrationKind, HEADER_DATE, HEADER_FILTER};
use crate::matching::camera::matches_camera_settings;
use crate::matching::config::MatchingConfig;
use crate::matching::date::{days_between, parse_frame_date};

/// A flat that passed every filter, scored for ranking
#[derive(Debug, Clone)]
struct FlatCandidate<'a> {
    id: &'a str,
    /// Days between light and flat; `None` when not compared
    days_diff: Option<u64>,
}

/// Find the best flat or master flat for a light frame.
///
/// A flat qualifies when it has compatible camera settings and exactly the
/// light's filter. With `date_tolerance_days` set and a parseable light
/// date, flats with a parseable date more than the tolerance away are
/// dropped; flats whose date cannot be read are kept but rank behind every
/// dated flat. Closest date wins, ties keep pool order.
///
/// Returns `None` if the light has no filter or nothing qualifies.
#[must_use]
pub fn find_flat<'a>(
    light: &FrameMetadata,
    pool: &'a CalibrationPool,
    config: &MatchingConfig,
) -> Option<&'a str> {
    let light_filter = light.get_str(HEADER_FILTER)?;
    let requirements = config.camera_requirements();

    // Date window only applies when both a tolerance and a readable light date exist
    let date_window = config.date_tolerance_days.and_then(|tolerance| {
        light
            .get_str(HEADER_DATE)
            .and_then(|d| parse_frame_date(&d))
            .map(|date| (date, u64::from(tolerance)))
    });

    let mut candidates: Vec<FlatCandidate<'a>> = pool
        .iter()
        .filter(|(_, cal)| CalibrationKind::Flat.matches(cal))
        .filter(|(_, cal)| matches_camera_settings(light, cal, requirements))
        .filter(|(_, cal)| cal.get_str(HEADER_FILTER).as_deref() == Some(light_filter.as_str()))
        .filter_map(|(id, cal)| {
            let mut days_diff = None;
            if let Some((light_date, tolerance)) = date_window {
                let flat_date = cal.get_str(HEADER_DATE).and_then(|d| parse_frame_date(&d));
                if let Some(flat_date) = flat_date {
                    let days = days_between(light_date, flat_date);
                    if days > tolerance {
                        return None;
                    }
                    days_diff = Some(days);
                }
            }
            Some(FlatCandidate { id, days_diff })
        })
        .collect();

    // Undated candidates sort after every dated one; sort is stable
    candidates.sort_by_key(|c| (c.days_diff.is_none(), c.days_diff));

    candidates.first().map(|c| c.id)
}
