//! Structured error types for sheetgrid.
//!
//! Layout arithmetic itself never fails; these cover the edges where input
//! comes from outside (column keys, configuration, the flag store).

/// All errors that can occur in sheetgrid.
#[derive(Debug, thiserror::Error)]
pub enum SheetGridError {
    /// A column key that is not part of the configured column sequence.
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// The same column key listed twice in a visible-column sequence.
    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),

    /// Configuration values that cannot produce a layout.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// JSON (de)serialization error.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Flag store read/write failure.
    #[error("Flag store: {0}")]
    Store(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SheetGridError>;

#[cfg(target_arch = "wasm32")]
impl From<SheetGridError> for wasm_bindgen::JsValue {
    fn from(e: SheetGridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
