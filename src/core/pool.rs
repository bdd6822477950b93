use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

use crate::core::metadata::FrameMetadata;

/// Error raised when an identifier is inserted twice
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Duplicate frame identifier: {0}")]
pub struct DuplicateIdentifier(pub String);

/// Candidate calibration frames, keyed by identifier, in insertion order.
///
/// Iteration order matters: the bias matcher returns the first compatible
/// entry and the dark/flat rankings break ties by position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalibrationPool {
    entries: Vec<(String, FrameMetadata)>,

    /// Index: identifier -> position in entries
    index: HashMap<String, usize>,
}

impl CalibrationPool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a frame at the end of the pool.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateIdentifier` if the identifier is already present.
    pub fn insert(
        &mut self,
        id: impl Into<String>,
        metadata: FrameMetadata,
    ) -> Result<(), DuplicateIdentifier> {
        let id = id.into();
        if self.index.contains_key(&id) {
            return Err(DuplicateIdentifier(id));
        }
        self.index.insert(id.clone(), self.entries.len());
        self.entries.push((id, metadata));
        Ok(())
    }

    /// Builder-style insert for literals; a repeated identifier replaces
    /// the metadata in place and keeps the original position.
    #[must_use]
    pub fn with(mut self, id: impl Into<String>, metadata: FrameMetadata) -> Self {
        let id = id.into();
        if let Some(&pos) = self.index.get(&id) {
            self.entries[pos].1 = metadata;
        } else {
            self.index.insert(id.clone(), self.entries.len());
            self.entries.push((id, metadata));
        }
        self
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&FrameMetadata> {
        self.index.get(id).map(|&pos| &self.entries[pos].1)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FrameMetadata)> {
        self.entries.iter().map(|(id, meta)| (id.as_str(), meta))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(id, _)| id.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for CalibrationPool {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, meta) in &self.entries {
            map.serialize_entry(id, meta)?;
        }
        map.end()
    }
}

/// Map entries in document order, duplicates included
#[derive(Debug, Default)]
pub(crate) struct OrderedEntries(pub Vec<(String, FrameMetadata)>);

struct EntriesVisitor;

impl<'de> Visitor<'de> for EntriesVisitor {
    type Value = OrderedEntries;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of frame identifiers to metadata objects")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::new();
        while let Some(entry) = access.next_entry::<String, FrameMetadata>()? {
            entries.push(entry);
        }
        Ok(OrderedEntries(entries))
    }
}

impl<'de> Deserialize<'de> for OrderedEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(EntriesVisitor)
    }
}

impl<'de> Deserialize<'de> for CalibrationPool {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let OrderedEntries(entries) = OrderedEntries::deserialize(deserializer)?;
        let mut pool = CalibrationPool::new();
        for (id, meta) in entries {
            pool.insert(id, meta).map_err(serde::de::Error::custom)?;
        }
        Ok(pool)
    }
}
