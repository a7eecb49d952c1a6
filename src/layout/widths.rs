//! Column-width arithmetic.
//!
//! Pure functions from viewport metrics to a [`WidthMap`]. All shares are
//! floor-divided and clamped at zero, so a viewport narrower than the fixed
//! overhead yields zero-width columns rather than negative ones.

use tracing::debug;

use crate::config::LayoutConfig;
use crate::types::{ColumnKey, WidthMap};

/// Floor a pixel value to a non-negative integer width.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn floor_px(value: f64) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    value.floor().min(f64::from(u32::MAX)) as u32
}

#[allow(clippy::cast_precision_loss)]
fn count_f64(count: usize) -> f64 {
    count as f64
}

/// Widths for the first layout, with every configured column visible.
///
/// Uses `config.fallback_viewport_width` when `viewport_width` is `None`.
/// Every non-blank column gets the same floor-divided share; the blank
/// column takes whatever is left so the row lines up with the viewport.
pub fn initial_widths(config: &LayoutConfig, viewport_width: Option<f64>) -> WidthMap {
    let viewport = viewport_width.unwrap_or(config.fallback_viewport_width);
    let count = config.columns.len();
    if count == 0 {
        return WidthMap::new();
    }

    // Borders: one per column, one for the row-number column, and the blank
    // column counted again.
    let available =
        viewport - config.row_number_width - config.border_width * count_f64(count + 2);
    let share = floor_px(available / count_f64(count));

    let mut widths = WidthMap::new();
    let mut used = 0.0;
    for key in config
        .columns
        .iter()
        .filter(|k| !config.is_blank(k.as_str()))
    {
        widths.insert(key.clone(), share);
        used += f64::from(share);
    }
    let blank = floor_px(available - used);
    widths.insert(config.blank_column.clone(), blank);

    debug!(viewport, available, share, blank, "initial column widths");
    widths
}

/// Widths after the visible-column set changes.
///
/// Columns already sized in `current` (positive width) keep their width and
/// the rest split what is left. When nothing is sized yet, all visible
/// columns split the full available width.
pub fn recompute_widths(
    config: &LayoutConfig,
    viewport_width: f64,
    visible: &[ColumnKey],
    current: &WidthMap,
) -> WidthMap {
    if visible.is_empty() {
        return WidthMap::new();
    }

    let available = viewport_width
        - config.row_number_width
        - config.border_width * count_f64(visible.len() + 1);

    let has_sized = visible.iter().any(|k| current.is_sized(k.as_str()));
    let share = if has_sized {
        let used: f64 = visible
            .iter()
            .filter_map(|k| current.get(k.as_str()).filter(|&w| w > 0))
            .map(f64::from)
            .sum();
        let unsized_count = visible
            .iter()
            .filter(|k| !current.is_sized(k.as_str()))
            .count();
        if unsized_count > 0 {
            floor_px((available - used) / count_f64(unsized_count))
        } else {
            0
        }
    } else {
        floor_px(available / count_f64(visible.len()))
    };

    debug!(
        viewport_width,
        available,
        share,
        has_sized,
        visible = visible.len(),
        "recomputed column widths"
    );

    visible
        .iter()
        .map(|k| {
            let width = current
                .get(k.as_str())
                .filter(|&w| w > 0)
                .unwrap_or(share);
            (k.clone(), width)
        })
        .collect()
}

/// Total sheet width: row-number column, one border per visible column plus
/// one against the row-number column, and every visible column's width.
/// Missing entries count as zero.
pub fn total_width(config: &LayoutConfig, widths: &WidthMap, visible: &[ColumnKey]) -> f64 {
    let borders = config.border_width * count_f64(visible.len() + 1);
    let columns: f64 = visible
        .iter()
        .map(|k| f64::from(widths.width_or_zero(k.as_str())))
        .sum();
    config.row_number_width + borders + columns
}

/// Copy of `widths` with the blank column raised to at least
/// `config.blank_min_width`. An absent blank column is treated as zero.
pub fn enforce_blank_minimum(config: &LayoutConfig, widths: &WidthMap) -> WidthMap {
    let mut out = widths.clone();
    let blank = widths
        .width_or_zero(config.blank_column.as_str())
        .max(config.blank_min_width);
    out.insert(config.blank_column.clone(), blank);
    out
}

/// Apply a single user resize, then re-apply the blank-column floor.
pub fn resize_column(
    config: &LayoutConfig,
    widths: &WidthMap,
    key: &ColumnKey,
    width: u32,
) -> WidthMap {
    let mut out = widths.clone();
    out.insert(key.clone(), width);
    enforce_blank_minimum(config, &out)
}

/// Width of the sticky scrollbar's inner spacer.
///
/// Covers at least the viewport (minus the row-number column) even when the
/// content is narrower, and never less than the content itself.
pub fn sticky_spacer_width(config: &LayoutConfig, total_width: f64, viewport_width: f64) -> f64 {
    (total_width - config.row_number_width)
        .max(viewport_width - config.row_number_width)
        .max(0.0)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp
)]
mod tests {
    use super::*;
    use crate::types::default_columns;

    fn keys(names: &[&str]) -> Vec<ColumnKey> {
        names.iter().map(|&n| ColumnKey::from(n)).collect()
    }

    #[test]
    fn test_initial_widths_worked_example() {
        let config = LayoutConfig::default();
        let widths = initial_widths(&config, Some(1000.0));

        for key in config.columns.iter().filter(|k| !config.is_blank(k.as_str())) {
            assert_eq!(widths.get(key.as_str()), Some(94), "column {key}");
        }
        assert_eq!(widths.get("blank1"), Some(100));
        assert_eq!(widths.len(), 10);
    }

    #[test]
    fn test_initial_widths_uses_fallback() {
        let config = LayoutConfig::default();
        assert_eq!(
            initial_widths(&config, None),
            initial_widths(&config, Some(1440.0))
        );
    }

    #[test]
    fn test_initial_widths_narrow_viewport_is_zero() {
        let config = LayoutConfig::default();
        let widths = initial_widths(&config, Some(20.0));
        assert!(widths.iter().all(|(_, w)| w == 0));
    }

    #[test]
    fn test_recompute_without_sized_columns_splits_evenly() {
        let config = LayoutConfig::default();
        let visible = keys(&["job", "status", "blank1"]);
        let widths = recompute_widths(&config, 1000.0, &visible, &WidthMap::new());
        // 1000 - 48 - 0.5 * 4 = 950, / 3 = 316
        assert_eq!(widths.get("job"), Some(316));
        assert_eq!(widths.get("status"), Some(316));
        assert_eq!(widths.get("blank1"), Some(316));
    }

    #[test]
    fn test_recompute_preserves_sized_columns() {
        let config = LayoutConfig::default();
        let visible = keys(&["job", "status", "blank1"]);
        let current: WidthMap = [("job", 300)].into_iter().collect();
        let widths = recompute_widths(&config, 1000.0, &visible, &current);
        // (950 - 300) / 2 = 325
        assert_eq!(widths.get("job"), Some(300));
        assert_eq!(widths.get("status"), Some(325));
        assert_eq!(widths.get("blank1"), Some(325));
    }

    #[test]
    fn test_recompute_all_sized_keeps_everything() {
        let config = LayoutConfig::default();
        let visible = keys(&["job", "status"]);
        let current: WidthMap = [("job", 10), ("status", 20)].into_iter().collect();
        assert_eq!(recompute_widths(&config, 1000.0, &visible, &current), current);
    }

    #[test]
    fn test_recompute_drops_hidden_columns() {
        let config = LayoutConfig::default();
        let visible = keys(&["status"]);
        let current: WidthMap = [("job", 300), ("status", 0)].into_iter().collect();
        let widths = recompute_widths(&config, 1000.0, &visible, &current);
        assert_eq!(widths.get("job"), None);
        // Only an unsized column is visible, so the full width is shared.
        assert_eq!(widths.get("status"), Some(951));
    }

    #[test]
    fn test_recompute_empty_visible() {
        let config = LayoutConfig::default();
        assert!(recompute_widths(&config, 1000.0, &[], &WidthMap::new()).is_empty());
    }

    #[test]
    fn test_recompute_oversized_columns_clamp_share_to_zero() {
        let config = LayoutConfig::default();
        let visible = keys(&["job", "status"]);
        let current: WidthMap = [("job", 5000)].into_iter().collect();
        let widths = recompute_widths(&config, 1000.0, &visible, &current);
        assert_eq!(widths.get("status"), Some(0));
    }

    #[test]
    fn test_total_width_counts_missing_as_zero() {
        let config = LayoutConfig::default();
        let visible = keys(&["job", "status"]);
        let widths: WidthMap = [("job", 100)].into_iter().collect();
        assert_eq!(total_width(&config, &widths, &visible), 48.0 + 1.5 + 100.0);
    }

    #[test]
    fn test_total_width_of_initial_layout() {
        let config = LayoutConfig::default();
        let widths = initial_widths(&config, Some(1000.0));
        assert_eq!(total_width(&config, &widths, &default_columns()), 999.5);
    }

    #[test]
    fn test_enforce_blank_minimum() {
        let config = LayoutConfig::default();
        let widths: WidthMap = [("job", 10), ("blank1", 5)].into_iter().collect();
        let out = enforce_blank_minimum(&config, &widths);
        assert_eq!(out.get("blank1"), Some(60));
        assert_eq!(out.get("job"), Some(10));

        let wide: WidthMap = [("blank1", 200)].into_iter().collect();
        assert_eq!(enforce_blank_minimum(&config, &wide).get("blank1"), Some(200));

        let absent = enforce_blank_minimum(&config, &WidthMap::new());
        assert_eq!(absent.get("blank1"), Some(60));
    }

    #[test]
    fn test_resize_column_keeps_blank_floor() {
        let config = LayoutConfig::default();
        let widths: WidthMap = [("job", 100), ("blank1", 0)].into_iter().collect();
        let out = resize_column(&config, &widths, &ColumnKey::from("job"), 250);
        assert_eq!(out.get("job"), Some(250));
        assert_eq!(out.get("blank1"), Some(60));

        let shrunk = resize_column(&config, &widths, &ColumnKey::from("blank1"), 10);
        assert_eq!(shrunk.get("blank1"), Some(60));
    }

    #[test]
    fn test_sticky_spacer_width() {
        let config = LayoutConfig::default();
        assert_eq!(sticky_spacer_width(&config, 2000.0, 1000.0), 1952.0);
        assert_eq!(sticky_spacer_width(&config, 500.0, 1000.0), 952.0);
        assert_eq!(sticky_spacer_width(&config, 10.0, 20.0), 0.0);
    }

    #[test]
    fn test_floor_px() {
        assert_eq!(floor_px(94.6), 94);
        assert_eq!(floor_px(-3.0), 0);
        assert_eq!(floor_px(f64::NAN), 0);
        assert_eq!(floor_px(f64::INFINITY), 0);
    }
}
