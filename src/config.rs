//! Layout configuration.
//!
//! All fixed metrics the layout engine works from. Every field has a default,
//! so a JSON document only needs to name the values it overrides:
//!
//! ```json
//! { "row_number_width": 56, "blank_min_width": 80 }
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SheetGridError};
use crate::types::{default_columns, ColumnKey, BLANK_COLUMN};

/// Width of the row-number column in pixels
pub const ROW_NUMBER_COL_WIDTH: f64 = 48.0;

/// Width of a single column border in pixels
pub const BORDER_WIDTH: f64 = 0.5;

/// Minimum width of the blank filler column in pixels
pub const BLANK_COL_MIN_WIDTH: u32 = 60;

/// Viewport width used when no live viewport is available
pub const FALLBACK_VIEWPORT_WIDTH: f64 = 1440.0;

/// Metrics and column sequence for a sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Fixed width of the row-number column
    pub row_number_width: f64,
    /// Border width counted once per column
    pub border_width: f64,
    /// Floor for the blank column after a user resize
    pub blank_min_width: u32,
    /// Viewport width assumed before the window can be measured
    pub fallback_viewport_width: f64,
    /// All known columns, left to right
    pub columns: Vec<ColumnKey>,
    /// The filler column; must appear in `columns`
    pub blank_column: ColumnKey,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            row_number_width: ROW_NUMBER_COL_WIDTH,
            border_width: BORDER_WIDTH,
            blank_min_width: BLANK_COL_MIN_WIDTH,
            fallback_viewport_width: FALLBACK_VIEWPORT_WIDTH,
            columns: default_columns(),
            blank_column: ColumnKey::from(BLANK_COLUMN),
        }
    }
}

impl LayoutConfig {
    /// Parse and validate a configuration from JSON.
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed or fails [`Self::validate`].
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or its contents are invalid.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check that the metrics can produce a layout.
    ///
    /// # Errors
    /// Returns [`SheetGridError::Config`] for non-finite or negative metrics,
    /// an empty or duplicated column list, or a blank column not in the list.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("row_number_width", self.row_number_width),
            ("border_width", self.border_width),
            ("fallback_viewport_width", self.fallback_viewport_width),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SheetGridError::Config(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }

        if self.columns.is_empty() {
            return Err(SheetGridError::Config("columns must not be empty".into()));
        }

        let mut seen = HashSet::new();
        for key in &self.columns {
            if !seen.insert(key) {
                return Err(SheetGridError::DuplicateColumn(key.to_string()));
            }
        }

        if !self.columns.contains(&self.blank_column) {
            return Err(SheetGridError::Config(format!(
                "blank column {} is not one of the configured columns",
                self.blank_column
            )));
        }

        Ok(())
    }

    /// True if `key` is one of the configured columns
    pub fn is_known(&self, key: &str) -> bool {
        self.columns.iter().any(|c| c.as_str() == key)
    }

    /// True if `key` is the blank filler column
    pub fn is_blank(&self, key: &str) -> bool {
        self.blank_column.as_str() == key
    }

    /// Position of `key` in the configured column sequence
    pub fn position(&self, key: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.as_str() == key)
    }
}
