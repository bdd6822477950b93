use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

#[inline]
fn int_to_f64(value: i64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        value as f64
    }
}

/// A single untyped value from normalized frame metadata.
///
/// Upstream header normalization hands over whatever the header carried,
/// so a field may be text, a number, a flag, or an explicit null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl MetadataValue {
    /// Coerce to a float. Text is trimmed and parsed; failure yields `None`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Null => None,
            Self::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Self::Integer(i) => Some(int_to_f64(*i)),
            Self::Float(f) => Some(*f),
            Self::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }

    /// Textual form of a non-null value
    #[must_use]
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Null => None,
            other => Some(other.to_string()),
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(true) => write!(f, "True"),
            Self::Bool(false) => write!(f, "False"),
            Self::Integer(i) => write!(f, "{i}"),
            // Debug keeps the fractional part: 120.0 renders as "120.0"
            Self::Float(v) => write!(f, "{v:?}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for MetadataValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for MetadataValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<i32> for MetadataValue {
    fn from(i: i32) -> Self {
        Self::Integer(i64::from(i))
    }
}

impl From<f64> for MetadataValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for MetadataValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl<T: Into<MetadataValue>> From<Option<T>> for MetadataValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Normalized metadata of one frame, keyed by normalized header name.
///
/// No field is guaranteed to be present. The typed readers collapse a
/// missing key, an explicit null, and (for numbers) an unparseable value
/// into `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameMetadata {
    fields: HashMap<String, MetadataValue>,
}

impl FrameMetadata {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<MetadataValue>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Raw value lookup, including explicit nulls
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&MetadataValue> {
        self.fields.get(key)
    }

    /// Read a field as a float.
    ///
    /// Returns `None` if the key is missing, the value is null, or the value
    /// cannot be coerced to a number. A coercion failure is never reported
    /// as zero.
    #[must_use]
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.fields.get(key).and_then(MetadataValue::as_f64)
    }

    /// Read a field as a string.
    ///
    /// Returns `None` if the key is missing or the value is null. Any other
    /// value, numeric ones included, is stringified.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<String> {
        self.fields.get(key).and_then(MetadataValue::as_text)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<MetadataValue>> FromIterator<(K, V)> for FrameMetadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_f64_from_text() {
        let meta = FrameMetadata::new()
            .with("exposureseconds", "120.0")
            .with("gain", "100");
        assert_eq!(meta.get_f64("exposureseconds"), Some(120.0));
        assert_eq!(meta.get_f64("gain"), Some(100.0));
    }

    #[test]
    fn test_get_f64_from_numbers() {
        let meta = FrameMetadata::new()
            .with("gain", 100_i64)
            .with("settemp", -10.5)
            .with("flag", true);
        assert_eq!(meta.get_f64("gain"), Some(100.0));
        assert_eq!(meta.get_f64("settemp"), Some(-10.5));
        assert_eq!(meta.get_f64("flag"), Some(1.0));
    }

    #[test]
    fn test_get_f64_absent_cases() {
        let meta = FrameMetadata::new()
            .with("exposureseconds", MetadataValue::Null)
            .with("gain", "not_a_number")
            .with("offset", "");
        assert_eq!(meta.get_f64("exposureseconds"), None);
        assert_eq!(meta.get_f64("gain"), None);
        assert_eq!(meta.get_f64("offset"), None);
        assert_eq!(meta.get_f64("missing"), None);
    }

    #[test]
    fn test_get_f64_trims_whitespace() {
        let meta = FrameMetadata::new().with("exposureseconds", " 60 ");
        assert_eq!(meta.get_f64("exposureseconds"), Some(60.0));
    }

    #[test]
    fn test_get_str() {
        let meta = FrameMetadata::new()
            .with("camera", "ZWO ASI294")
            .with("gain", 100_i64)
            .with("exposureseconds", 120.0)
            .with("filter", MetadataValue::Null);
        assert_eq!(meta.get_str("camera").as_deref(), Some("ZWO ASI294"));
        assert_eq!(meta.get_str("gain").as_deref(), Some("100"));
        assert_eq!(meta.get_str("exposureseconds").as_deref(), Some("120.0"));
        assert_eq!(meta.get_str("filter"), None);
        assert_eq!(meta.get_str("missing"), None);
    }

    #[test]
    fn test_deserialize_mixed_values() {
        let meta: FrameMetadata = serde_json::from_str(
            r#"{"camera": "ASI2600", "gain": 100, "settemp": -10.0, "filter": null}"#,
        )
        .unwrap();
        assert_eq!(meta.get("gain"), Some(&MetadataValue::Integer(100)));
        assert_eq!(meta.get("settemp"), Some(&MetadataValue::Float(-10.0)));
        assert!(meta.get("filter").is_some_and(MetadataValue::is_null));
        assert_eq!(meta.len(), 4);
    }

    #[test]
    fn test_option_into_value() {
        let meta = FrameMetadata::new().with("date", None::<&str>);
        assert_eq!(meta.get_str("date"), None);
        assert_eq!(meta.len(), 1);
    }
}
