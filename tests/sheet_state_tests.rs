//! Tests for the composition-root sheet state: resizing, hiding and showing
//! columns, and the sticky scrollbar's spacer width
#![allow(clippy::unwrap_used, clippy::float_cmp, clippy::panic)]

use sheetgrid::{ColumnKey, LayoutConfig, SheetGridError, SheetState};
use test_case::test_case;

fn sheet(viewport: f64) -> SheetState {
    SheetState::new(LayoutConfig::default(), Some(viewport)).unwrap()
}

fn visible(s: &SheetState) -> Vec<&str> {
    s.visible_columns().iter().map(ColumnKey::as_str).collect()
}

#[test]
fn test_resize_survives_hiding_another_column() {
    let mut s = sheet(1440.0);
    s.resize_column("job", 420).unwrap();
    s.hide_column("url").unwrap();
    s.hide_column("notes").unwrap_err();

    assert_eq!(s.widths().get("job"), Some(420));
    assert!(!visible(&s).contains(&"url"));
}

#[test]
fn test_resize_blank_column_is_floored() {
    let mut s = sheet(1000.0);
    s.resize_column("blank1", 12).unwrap();
    assert_eq!(s.widths().get("blank1"), Some(60));
}

#[test]
fn test_show_column_shares_leftover() {
    let mut s = sheet(1000.0);
    s.set_visible_columns(&["job", "blank1"]).unwrap();
    // Both were sized by the initial layout and keep their widths.
    assert_eq!(s.widths().get("job"), Some(94));
    assert_eq!(s.widths().get("blank1"), Some(100));

    s.show_column("status").unwrap();
    assert_eq!(visible(&s), vec!["job", "status", "blank1"]);
    // available = 1000 - 48 - 0.5 * 4 = 950; 950 - 194 = 756
    assert_eq!(s.widths().get("status"), Some(756));
}

#[test]
fn test_hide_twice_is_noop() {
    let mut s = sheet(1000.0);
    s.hide_column("due").unwrap();
    let before = s.widths().clone();
    s.hide_column("due").unwrap();
    assert_eq!(s.widths(), &before);
}

#[test]
fn test_unknown_visible_column_leaves_state() {
    let mut s = sheet(1000.0);
    let err = s.set_visible_columns(&["job", "owner"]).unwrap_err();
    assert!(matches!(err, SheetGridError::UnknownColumn(ref k) if k == "owner"));
    assert_eq!(s.visible_columns().len(), 10);
}

#[test]
fn test_total_width_tracks_resizes() {
    let mut s = sheet(1000.0);
    assert_eq!(s.total_width(), 999.5);
    s.resize_column("job", 194).unwrap();
    assert_eq!(s.total_width(), 1099.5);
}

#[test_case(1000.0, None, 952.0 ; "content fits viewport")]
#[test_case(1000.0, Some(1800.0), 1752.0 ; "measured content wider")]
#[test_case(1000.0, Some(300.0), 952.0 ; "measured content narrower")]
// Blank column floored at 60: 48 + 0.5 * 11 + 60 = 113.5
#[test_case(30.0, None, 65.5 ; "viewport narrower than overhead")]
fn test_spacer_width(viewport: f64, measured: Option<f64>, expected: f64) {
    let mut s = sheet(viewport);
    s.record_content_width(measured);
    assert_eq!(s.spacer_width(), expected);
}

#[test]
fn test_spacer_follows_window_resize() {
    let mut s = sheet(1000.0);
    s.set_viewport_width(1600.0);
    s.record_content_width(Some(1000.0));
    assert_eq!(s.spacer_width(), 1552.0);
}

#[test]
fn test_snapshot_serializes() {
    let s = sheet(1000.0);
    let json = serde_json::to_value(s.snapshot()).unwrap();
    assert_eq!(json["widths"]["blank1"], 100);
    assert_eq!(json["total_width"], 999.5);
    assert_eq!(json["visible_columns"][0], "job");
}

#[test]
fn test_unusable_viewport_resize_is_ignored() {
    let mut s = sheet(1000.0);
    s.set_viewport_width(f64::NAN);
    assert_eq!(s.viewport_width(), 1000.0);
    assert_eq!(s.spacer_width(), 952.0);
}

// ============================================================================
// Blank column floor through sheet operations
// ============================================================================

#[derive(Debug, Clone, Copy)]
enum Step {
    Resize(&'static str, u32),
    Hide(&'static str),
    Show(&'static str),
    Viewport(f64),
}

#[test_case(500.0, &[] ; "narrow initial viewport")]
#[test_case(30.0, &[] ; "initial viewport narrower than overhead")]
#[test_case(1000.0, &[Step::Resize("job", 900), Step::Hide("blank1"), Step::Show("blank1")] ; "resize then hide and show blank")]
#[test_case(1000.0, &[Step::Hide("blank1"), Step::Resize("job", 900), Step::Show("blank1")] ; "resize while blank hidden")]
#[test_case(1000.0, &[Step::Resize("job", 900), Step::Hide("status")] ; "resize then hide another column")]
#[test_case(1000.0, &[Step::Viewport(400.0), Step::Hide("blank1"), Step::Show("blank1")] ; "window shrinks then blank reshown")]
fn test_blank_column_never_below_minimum(viewport: f64, steps: &[Step]) {
    let mut s = sheet(viewport);
    for step in steps {
        match *step {
            Step::Resize(key, width) => s.resize_column(key, width).unwrap(),
            Step::Hide(key) => s.hide_column(key).unwrap(),
            Step::Show(key) => s.show_column(key).unwrap(),
            Step::Viewport(width) => s.set_viewport_width(width),
        }
    }

    assert!(s.is_visible("blank1"));
    let blank = s.widths().get("blank1").unwrap();
    assert!(blank >= s.config().blank_min_width, "blank1 = {blank}");
}

#[test]
fn test_hidden_blank_column_is_not_floored_into_view() {
    let mut s = sheet(1000.0);
    s.hide_column("blank1").unwrap();
    assert_eq!(s.widths().get("blank1"), None);
    assert_eq!(s.total_width(), 48.0 + 0.5 * 10.0 + 94.0 * 9.0);
}
