use serde::{Deserialize, Serialize};

// Normalized header names produced by upstream header normalization
pub const HEADER_DATE: &str = "date";
pub const HEADER_DATETIME: &str = "datetime";
pub const HEADER_TYPE: &str = "type";
pub const HEADER_OPTIC: &str = "optic";
pub const HEADER_FOCAL_RATIO: &str = "focal_ratio";
pub const HEADER_CAMERA: &str = "camera";
pub const HEADER_TARGETNAME: &str = "targetname";
pub const HEADER_FILTER: &str = "filter";
pub const HEADER_EXPOSURESECONDS: &str = "exposureseconds";
pub const HEADER_TEMP: &str = "temp";
pub const HEADER_SETTEMP: &str = "settemp";
pub const HEADER_LATITUDE: &str = "latitude";
pub const HEADER_LONGITUDE: &str = "longitude";
pub const HEADER_READOUTMODE: &str = "readoutmode";
pub const HEADER_GAIN: &str = "gain";
pub const HEADER_OFFSET: &str = "offset";
pub const HEADER_FOCALLEN: &str = "focallen";
pub const HEADER_PANEL: &str = "panel";
pub const HEADER_FILENAME: &str = "filename";
pub const HEADER_HFR: &str = "hfr";
pub const HEADER_STARS: &str = "stars";
pub const HEADER_RMSAC: &str = "rmsac";

// Frame type tags, compared against the upper-cased `type` field
pub const TYPE_LIGHT: &str = "LIGHT";
pub const TYPE_DARK: &str = "DARK";
pub const TYPE_FLAT: &str = "FLAT";
pub const TYPE_BIAS: &str = "BIAS";

pub const TYPE_MASTER_LIGHT: &str = "MASTER LIGHT";
pub const TYPE_MASTER_DARK: &str = "MASTER DARK";
pub const TYPE_MASTER_FLAT: &str = "MASTER FLAT";
pub const TYPE_MASTER_BIAS: &str = "MASTER BIAS";

/// Raw (individual sub-exposure) calibration types
pub const CALIBRATION_TYPES: [&str; 3] = [TYPE_DARK, TYPE_FLAT, TYPE_BIAS];

/// Master (stacked) calibration types
pub const MASTER_CALIBRATION_TYPES: [&str; 3] =
    [TYPE_MASTER_DARK, TYPE_MASTER_FLAT, TYPE_MASTER_BIAS];

/// Raw types followed by master types
pub const ALL_CALIBRATION_TYPES: [&str; 6] = [
    TYPE_DARK,
    TYPE_FLAT,
    TYPE_BIAS,
    TYPE_MASTER_DARK,
    TYPE_MASTER_FLAT,
    TYPE_MASTER_BIAS,
];

/// Kind of calibration frame a light frame needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalibrationKind {
    Dark,
    Bias,
    Flat,
}

impl CalibrationKind {
    pub const ALL: [CalibrationKind; 3] = [Self::Dark, Self::Bias, Self::Flat];

    /// Tag of the individual sub-exposure variant
    #[must_use]
    pub fn raw_tag(self) -> &'static str {
        match self {
            Self::Dark => TYPE_DARK,
            Self::Bias => TYPE_BIAS,
            Self::Flat => TYPE_FLAT,
        }
    }

    /// Tag of the stacked variant
    #[must_use]
    pub fn master_tag(self) -> &'static str {
        match self {
            Self::Dark => TYPE_MASTER_DARK,
            Self::Bias => TYPE_MASTER_BIAS,
            Self::Flat => TYPE_MASTER_FLAT,
        }
    }
}

impl std::fmt::Display for CalibrationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dark => write!(f, "dark"),
            Self::Bias => write!(f, "bias"),
            Self::Flat => write!(f, "flat"),
        }
    }
}

/// Image type of a frame, as recorded in its `type` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameType {
    Light,
    Dark,
    Flat,
    Bias,
    MasterLight,
    MasterDark,
    MasterFlat,
    MasterBias,
}

impl FrameType {
    /// Parse a type tag case-insensitively. Unknown tags yield `None`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            TYPE_LIGHT => Some(Self::Light),
            TYPE_DARK => Some(Self::Dark),
            TYPE_FLAT => Some(Self::Flat),
            TYPE_BIAS => Some(Self::Bias),
            TYPE_MASTER_LIGHT => Some(Self::MasterLight),
            TYPE_MASTER_DARK => Some(Self::MasterDark),
            TYPE_MASTER_FLAT => Some(Self::MasterFlat),
            TYPE_MASTER_BIAS => Some(Self::MasterBias),
            _ => None,
        }
    }

    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Light => TYPE_LIGHT,
            Self::Dark => TYPE_DARK,
            Self::Flat => TYPE_FLAT,
            Self::Bias => TYPE_BIAS,
            Self::MasterLight => TYPE_MASTER_LIGHT,
            Self::MasterDark => TYPE_MASTER_DARK,
            Self::MasterFlat => TYPE_MASTER_FLAT,
            Self::MasterBias => TYPE_MASTER_BIAS,
        }
    }

    #[must_use]
    pub fn is_master(self) -> bool {
        matches!(
            self,
            Self::MasterLight | Self::MasterDark | Self::MasterFlat | Self::MasterBias
        )
    }

    #[must_use]
    pub fn is_calibration(self) -> bool {
        self.calibration_kind().is_some()
    }

    /// Calibration kind of this frame; lights have none
    #[must_use]
    pub fn calibration_kind(self) -> Option<CalibrationKind> {
        match self {
            Self::Dark | Self::MasterDark => Some(CalibrationKind::Dark),
            Self::Bias | Self::MasterBias => Some(CalibrationKind::Bias),
            Self::Flat | Self::MasterFlat => Some(CalibrationKind::Flat),
            Self::Light | Self::MasterLight => None,
        }
    }
}

impl std::fmt::Display for FrameType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}
