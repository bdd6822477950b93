use crate::core::metadata::FrameMetadata;
use crate::core::types::{CalibrationKind, FrameType, HEADER_TYPE};

/// Check whether a frame's `type` is the raw or master tag of a calibration kind.
///
/// The field is upper-cased before an exact comparison. A frame without a
/// `type` is never a calibration frame.
#[must_use]
pub fn is_calibration_type(metadata: &FrameMetadata, raw_tag: &str, master_tag: &str) -> bool {
    metadata.get_str(HEADER_TYPE).is_some_and(|t| {
        let upper = t.to_uppercase();
        upper == raw_tag || upper == master_tag
    })
}

impl CalibrationKind {
    /// True if the frame is the raw or master variant of this kind
    #[must_use]
    pub fn matches(self, metadata: &FrameMetadata) -> bool {
        is_calibration_type(metadata, self.raw_tag(), self.master_tag())
    }
}

/// Classify a frame by its `type` field
#[must_use]
pub fn frame_type(metadata: &FrameMetadata) -> Option<FrameType> {
    metadata.get_str(HEADER_TYPE).and_then(|t| FrameType::parse(&t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{TYPE_DARK, TYPE_MASTER_DARK};

    fn typed(t: &str) -> FrameMetadata {
        FrameMetadata::new().with("type", t)
    }

    #[test]
    fn test_dark_and_master_dark() {
        assert!(is_calibration_type(&typed("DARK"), TYPE_DARK, TYPE_MASTER_DARK));
        assert!(is_calibration_type(
            &typed("MASTER DARK"),
            TYPE_DARK,
            TYPE_MASTER_DARK
        ));
    }

    #[test]
    fn test_case_insensitive() {
        assert!(is_calibration_type(&typed("dark"), TYPE_DARK, TYPE_MASTER_DARK));
        assert!(is_calibration_type(
            &typed("Master Dark"),
            TYPE_DARK,
            TYPE_MASTER_DARK
        ));
    }

    #[test]
    fn test_no_substring_match() {
        assert!(!is_calibration_type(
            &typed("DARKFLAT"),
            TYPE_DARK,
            TYPE_MASTER_DARK
        ));
        assert!(!is_calibration_type(
            &typed(" DARK"),
            TYPE_DARK,
            TYPE_MASTER_DARK
        ));
    }

    #[test]
    fn test_other_and_missing_type() {
        assert!(!is_calibration_type(&typed("LIGHT"), TYPE_DARK, TYPE_MASTER_DARK));
        let untyped = FrameMetadata::new().with("camera", "ZWO");
        assert!(!is_calibration_type(&untyped, TYPE_DARK, TYPE_MASTER_DARK));
    }

    #[test]
    fn test_kind_matches() {
        assert!(CalibrationKind::Bias.matches(&typed("master bias")));
        assert!(CalibrationKind::Flat.matches(&typed("FLAT")));
        assert!(!CalibrationKind::Flat.matches(&typed("BIAS")));
    }

    #[test]
    fn test_frame_type() {
        assert_eq!(frame_type(&typed("Master Flat")), Some(FrameType::MasterFlat));
        assert_eq!(frame_type(&typed("snapshot")), None);
        assert_eq!(frame_type(&FrameMetadata::new()), None);
    }
}
