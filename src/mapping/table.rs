//! Insertion-ordered wire name to native identifier table.
//!
//! Order matters for reverse lookups: when several wire names map to the
//! same native identifier, the one inserted first wins.
//!
//! # Example
//!
//! ```
//! use amf_typeloader::mapping::TypeMapping;
//!
//! let mut map = TypeMapping::new();
//! map.insert("com.example.User", "app::User");
//! map.insert("com.example.User", "app::Account");
//!
//! assert_eq!(map.len(), 1);
//! assert_eq!(map.get("com.example.User"), Some("app::Account"));
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::defaults::DEFAULT_CLASS_MAP;

/// One wire name / native identifier pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    /// Dotted wire-level type name.
    pub wire: String,
    /// Native type identifier.
    pub native: String,
}

/// Ordered table of unique wire names.
///
/// Serializes as a list of `{ "wire": .., "native": .. }` objects so the
/// order survives a round trip through JSON. Duplicate wire names in a
/// document collapse to the last one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<MappingEntry>", into = "Vec<MappingEntry>")]
pub struct TypeMapping {
    entries: Vec<MappingEntry>,
    /// Wire name -> position in `entries`.
    index: HashMap<String, usize>,
}

impl TypeMapping {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The six Flex messaging entries.
    pub fn amf_defaults() -> Self {
        DEFAULT_CLASS_MAP.iter().copied().collect()
    }

    /// Insert or overwrite `wire -> native`, returning the replaced native.
    ///
    /// Overwriting keeps the entry at its original position.
    pub fn insert(
        &mut self,
        wire: impl Into<String>,
        native: impl Into<String>,
    ) -> Option<String> {
        let wire = wire.into();
        let native = native.into();

        match self.index.get(&wire) {
            Some(&pos) => Some(std::mem::replace(&mut self.entries[pos].native, native)),
            None => {
                self.index.insert(wire.clone(), self.entries.len());
                self.entries.push(MappingEntry { wire, native });
                None
            }
        }
    }

    /// Native identifier mapped to `wire`.
    pub fn get(&self, wire: &str) -> Option<&str> {
        self.index
            .get(wire)
            .map(|&pos| self.entries[pos].native.as_str())
    }

    /// Insertion position of `wire`.
    pub fn position(&self, wire: &str) -> Option<usize> {
        self.index.get(wire).copied()
    }

    /// Iterate `(wire, native)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|e| (e.wire.as_str(), e.native.as_str()))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<W, N> FromIterator<(W, N)> for TypeMapping
where
    W: Into<String>,
    N: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (W, N)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (wire, native) in iter {
            map.insert(wire, native);
        }
        map
    }
}

impl From<Vec<MappingEntry>> for TypeMapping {
    fn from(entries: Vec<MappingEntry>) -> Self {
        entries.into_iter().map(|e| (e.wire, e.native)).collect()
    }
}

impl From<TypeMapping> for Vec<MappingEntry> {
    fn from(map: TypeMapping) -> Self {
        map.entries
    }
}
