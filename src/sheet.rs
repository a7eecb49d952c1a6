//! Sheet state owned by the UI composition root.
//!
//! Holds the width map, the visible columns, the selected tab and the latest
//! content measurement. Children get read-only views of it and report changes
//! back through the methods here.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::LayoutConfig;
use crate::error::{Result, SheetGridError};
use crate::layout;
use crate::types::{ColumnKey, WidthMap};

/// Tab selected when the sheet first mounts
pub const DEFAULT_TAB: &str = "All Orders";

/// Widths and sizes handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutSnapshot {
    pub widths: WidthMap,
    pub visible_columns: Vec<ColumnKey>,
    pub total_width: f64,
    pub spacer_width: f64,
}

/// Composition-root state for one sheet
#[derive(Debug, Clone)]
pub struct SheetState {
    config: LayoutConfig,
    viewport_width: f64,
    widths: WidthMap,
    visible: Vec<ColumnKey>,
    content_width: f64,
    selected_tab: String,
}

impl SheetState {
    /// Initial state with every configured column visible.
    ///
    /// `viewport_width` is `None` when no window is available; the
    /// configured fallback width is used instead, as it is for a non-finite
    /// or negative width.
    ///
    /// # Errors
    /// Returns an error if `config` fails validation.
    pub fn new(config: LayoutConfig, viewport_width: Option<f64>) -> Result<Self> {
        config.validate()?;
        let viewport_width = match viewport_width {
            Some(w) if usable_width(w) => w,
            Some(w) => {
                warn!(width = w, "ignoring unusable viewport width");
                config.fallback_viewport_width
            }
            None => config.fallback_viewport_width,
        };
        let widths = layout::enforce_blank_minimum(
            &config,
            &layout::initial_widths(&config, Some(viewport_width)),
        );
        let visible = config.columns.clone();
        Ok(Self {
            config,
            viewport_width,
            widths,
            visible,
            content_width: viewport_width,
            selected_tab: DEFAULT_TAB.to_string(),
        })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn widths(&self) -> &WidthMap {
        &self.widths
    }

    pub fn visible_columns(&self) -> &[ColumnKey] {
        &self.visible
    }

    pub fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    /// Last measured width of the rendered content
    pub fn content_width(&self) -> f64 {
        self.content_width
    }

    pub fn selected_tab(&self) -> &str {
        &self.selected_tab
    }

    pub fn select_tab(&mut self, tab: impl Into<String>) {
        self.selected_tab = tab.into();
    }

    /// Apply a user resize of one column.
    ///
    /// # Errors
    /// Returns [`SheetGridError::UnknownColumn`] if `key` is not configured.
    pub fn resize_column(&mut self, key: &str, width: u32) -> Result<()> {
        let key = self.known_key(key)?;
        self.widths = layout::resize_column(&self.config, &self.widths, &key, width);
        debug!(column = %key, width, "column resized");
        Ok(())
    }

    /// Replace the visible columns and recompute widths, keeping any column
    /// the user already sized.
    ///
    /// # Errors
    /// Returns an error for unknown or repeated keys; the state is unchanged.
    pub fn set_visible_columns<K: AsRef<str>>(&mut self, keys: &[K]) -> Result<()> {
        let mut seen = HashSet::new();
        let mut visible = Vec::with_capacity(keys.len());
        for key in keys {
            let key = self.known_key(key.as_ref())?;
            if !seen.insert(key.clone()) {
                return Err(SheetGridError::DuplicateColumn(key.to_string()));
            }
            visible.push(key);
        }

        let widths =
            layout::recompute_widths(&self.config, self.viewport_width, &visible, &self.widths);
        self.widths = if visible.contains(&self.config.blank_column) {
            layout::enforce_blank_minimum(&self.config, &widths)
        } else {
            widths
        };
        self.visible = visible;
        Ok(())
    }

    /// Hide one column. Hiding a hidden column does nothing.
    ///
    /// # Errors
    /// Returns [`SheetGridError::UnknownColumn`] if `key` is not configured.
    pub fn hide_column(&mut self, key: &str) -> Result<()> {
        self.known_key(key)?;
        if !self.is_visible(key) {
            return Ok(());
        }
        let keys: Vec<ColumnKey> = self
            .visible
            .iter()
            .filter(|k| k.as_str() != key)
            .cloned()
            .collect();
        self.set_visible_columns(keys.as_slice())
    }

    /// Show one column at its configured position. Showing a visible column
    /// does nothing.
    ///
    /// # Errors
    /// Returns [`SheetGridError::UnknownColumn`] if `key` is not configured.
    pub fn show_column(&mut self, key: &str) -> Result<()> {
        self.known_key(key)?;
        if self.is_visible(key) {
            return Ok(());
        }
        let keys: Vec<ColumnKey> = self
            .config
            .columns
            .iter()
            .filter(|k| k.as_str() == key || self.is_visible(k.as_str()))
            .cloned()
            .collect();
        self.set_visible_columns(keys.as_slice())
    }

    pub fn is_visible(&self, key: &str) -> bool {
        self.visible.iter().any(|k| k.as_str() == key)
    }

    /// Record a window resize. Widths are left alone until the next
    /// recompute; the spacer follows immediately. Non-finite or negative
    /// widths are ignored.
    pub fn set_viewport_width(&mut self, width: f64) {
        if usable_width(width) {
            self.viewport_width = width;
        } else {
            warn!(width, "ignoring unusable viewport width");
        }
    }

    /// Record a live measurement of the rendered content. `None` means the
    /// content region is not mounted, and the previous value stands.
    pub fn record_content_width(&mut self, width: Option<f64>) {
        if let Some(width) = width.filter(|w| w.is_finite()) {
            self.content_width = width;
        }
    }

    /// Total width of the sheet from the current width map
    pub fn total_width(&self) -> f64 {
        layout::total_width(&self.config, &self.widths, &self.visible)
    }

    /// Width of the sticky scrollbar's spacer, from the larger of the
    /// computed total and the last content measurement
    pub fn spacer_width(&self) -> f64 {
        let content = self.total_width().max(self.content_width);
        layout::sticky_spacer_width(&self.config, content, self.viewport_width)
    }

    pub fn snapshot(&self) -> LayoutSnapshot {
        LayoutSnapshot {
            widths: self.widths.clone(),
            visible_columns: self.visible.clone(),
            total_width: self.total_width(),
            spacer_width: self.spacer_width(),
        }
    }

    fn known_key(&self, key: &str) -> Result<ColumnKey> {
        if self.config.is_known(key) {
            Ok(ColumnKey::from(key))
        } else {
            Err(SheetGridError::UnknownColumn(key.to_string()))
        }
    }
}

fn usable_width(width: f64) -> bool {
    width.is_finite() && width >= 0.0
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn state(viewport: f64) -> SheetState {
        SheetState::new(LayoutConfig::default(), Some(viewport)).unwrap()
    }

    #[test]
    fn test_new_state() {
        let s = state(1000.0);
        assert_eq!(s.visible_columns().len(), 10);
        assert_eq!(s.widths().get("blank1"), Some(100));
        assert_eq!(s.selected_tab(), DEFAULT_TAB);
        assert_eq!(s.content_width(), 1000.0);
    }

    #[test]
    fn test_new_without_viewport_uses_fallback() {
        let s = SheetState::new(LayoutConfig::default(), None).unwrap();
        assert_eq!(s.viewport_width(), 1440.0);
    }

    #[test]
    fn test_new_with_unusable_viewport_uses_fallback() {
        let s = SheetState::new(LayoutConfig::default(), Some(f64::NAN)).unwrap();
        assert_eq!(s.viewport_width(), 1440.0);
        let s = SheetState::new(LayoutConfig::default(), Some(-5.0)).unwrap();
        assert_eq!(s.viewport_width(), 1440.0);
    }

    #[test]
    fn test_new_narrow_viewport_floors_blank() {
        let s = state(500.0);
        assert_eq!(s.widths().get("blank1"), Some(60));
    }

    #[test]
    fn test_set_viewport_width_ignores_unusable() {
        let mut s = state(1000.0);
        s.set_viewport_width(f64::NAN);
        s.set_viewport_width(f64::NEG_INFINITY);
        s.set_viewport_width(-1.0);
        assert_eq!(s.viewport_width(), 1000.0);
        s.set_viewport_width(1200.0);
        assert_eq!(s.viewport_width(), 1200.0);
    }

    #[test]
    fn test_resize_unknown_column() {
        let mut s = state(1000.0);
        let err = s.resize_column("owner", 100).unwrap_err();
        assert!(matches!(err, SheetGridError::UnknownColumn(ref k) if k == "owner"));
    }

    #[test]
    fn test_set_visible_rejects_duplicates() {
        let mut s = state(1000.0);
        let err = s.set_visible_columns(&["job", "job"]).unwrap_err();
        assert!(matches!(err, SheetGridError::DuplicateColumn(_)));
        assert_eq!(s.visible_columns().len(), 10);
    }

    #[test]
    fn test_hide_and_show_restore_order() {
        let mut s = state(1000.0);
        s.hide_column("status").unwrap();
        assert!(!s.is_visible("status"));
        assert_eq!(s.widths().get("status"), None);

        s.show_column("status").unwrap();
        let order: Vec<&str> = s.visible_columns().iter().map(ColumnKey::as_str).collect();
        assert_eq!(order.get(2), Some(&"status"));
    }

    #[test]
    fn test_record_content_width_ignores_missing() {
        let mut s = state(1000.0);
        s.record_content_width(Some(2400.0));
        s.record_content_width(None);
        assert_eq!(s.content_width(), 2400.0);
        assert_eq!(s.spacer_width(), 2352.0);
    }

    #[test]
    fn test_select_tab() {
        let mut s = state(1000.0);
        s.select_tab("Pending");
        assert_eq!(s.selected_tab(), "Pending");
    }
}
