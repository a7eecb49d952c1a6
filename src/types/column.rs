use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Key of the trailing filler column in the default column sequence
pub const BLANK_COLUMN: &str = "blank1";

/// Default column sequence, left to right. The blank column is always last.
pub const DEFAULT_COLUMNS: [&str; 10] = [
    "job",
    "submitted",
    "status",
    "submitter",
    "url",
    "assigned",
    "priority",
    "due",
    "value",
    BLANK_COLUMN,
];

/// Opaque identifier of a sheet column
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnKey(String);

impl ColumnKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ColumnKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for ColumnKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl AsRef<str> for ColumnKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Lets `WidthMap` be queried with a plain `&str`.
impl Borrow<str> for ColumnKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The default column sequence as owned keys
pub fn default_columns() -> Vec<ColumnKey> {
    DEFAULT_COLUMNS.iter().map(|&k| ColumnKey::from(k)).collect()
}
