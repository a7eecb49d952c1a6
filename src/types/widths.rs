use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ColumnKey;

/// Column key to pixel width.
///
/// Serializes as a plain JSON object so the UI shell can index it by key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidthMap(BTreeMap<ColumnKey, u32>);

impl WidthMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Width of `key`, if it has an entry
    pub fn get(&self, key: &str) -> Option<u32> {
        self.0.get(key).copied()
    }

    /// Width of `key`, treating a missing entry as 0
    pub fn width_or_zero(&self, key: &str) -> u32 {
        self.get(key).unwrap_or(0)
    }

    /// True if `key` has a positive width (i.e. it has been sized)
    pub fn is_sized(&self, key: &str) -> bool {
        self.width_or_zero(key) > 0
    }

    pub fn insert(&mut self, key: ColumnKey, width: u32) -> Option<u32> {
        self.0.insert(key, width)
    }

    pub fn remove(&mut self, key: &str) -> Option<u32> {
        self.0.remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ColumnKey, u32)> {
        self.0.iter().map(|(k, &w)| (k, w))
    }
}

impl FromIterator<(ColumnKey, u32)> for WidthMap {
    fn from_iter<I: IntoIterator<Item = (ColumnKey, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<(&'a str, u32)> for WidthMap {
    fn from_iter<I: IntoIterator<Item = (&'a str, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, w)| (ColumnKey::from(k), w)).collect())
    }
}
