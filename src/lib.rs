//! sheetgrid - spreadsheet grid core for the web
//!
//! Column-width layout and sticky-scrollbar sync for a browser spreadsheet,
//! compiled to WebAssembly:
//! - Distributes the viewport across columns, with a blank filler column
//!   absorbing the rounding remainder
//! - Keeps user-resized columns when columns are hidden or shown
//! - Mirrors horizontal scroll between the sheet and a sticky scrollbar
//! - Shows the welcome dialog once per browser
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { SheetGrid } from 'sheetgrid';
//! await init();
//! const grid = new SheetGrid();
//! grid.attach(contentPane, stickyTrack, stickySpacer);
//! const { widths, total_width } = grid.layout();
//! ```

pub mod config;
pub mod error;
pub mod layout;
pub mod scroll;
pub mod sheet;
pub mod timer;
pub mod types;
pub mod welcome;

#[cfg(target_arch = "wasm32")]
pub mod viewer;

use wasm_bindgen::prelude::*;

pub use config::LayoutConfig;
pub use error::{Result, SheetGridError};
pub use sheet::{LayoutSnapshot, SheetState};
pub use types::*;

#[cfg(target_arch = "wasm32")]
pub use viewer::{SheetGrid, WelcomeModal};

/// Compute the initial layout for a viewport width and return it as JSON
///
/// # Arguments
/// * `viewport_width` - Window width in pixels
/// * `config_json` - Optional layout configuration; defaults apply when absent
///
/// # Errors
/// Returns an error if the configuration is invalid.
#[wasm_bindgen]
pub fn initial_layout_json(
    viewport_width: f64,
    config_json: Option<String>,
) -> std::result::Result<String, JsValue> {
    let config = match config_json {
        Some(json) => LayoutConfig::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?,
        None => LayoutConfig::default(),
    };
    let sheet = SheetState::new(config, Some(viewport_width))
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_json::to_string(&sheet.snapshot())
        .map_err(|e| JsValue::from_str(&format!("JSON serialization error: {e}")))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
