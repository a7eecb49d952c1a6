//! Browser-backed implementations of the core traits.

use js_sys::{Function, Reflect};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlDivElement, Storage, Window};

use crate::error::{Result, SheetGridError};
use crate::scroll::ScrollHandle;
use crate::timer::TimerHost;
use crate::welcome::FlagStore;

/// A scrollable `<div>`
#[derive(Debug, Clone)]
pub(crate) struct DomScrollRegion(HtmlDivElement);

impl DomScrollRegion {
    pub(crate) fn new(element: HtmlDivElement) -> Self {
        Self(element)
    }

    /// Full scrollable width of the rendered content
    pub(crate) fn scroll_width(&self) -> f64 {
        f64::from(self.0.scroll_width())
    }
}

impl ScrollHandle for DomScrollRegion {
    // `scrollLeft` is fractional on high-DPI displays; `scroll_left()` rounds.
    fn scroll_offset(&self) -> f64 {
        Reflect::get(self.0.as_ref(), &JsValue::from_str("scrollLeft"))
            .ok()
            .and_then(|value| value.as_f64())
            .unwrap_or_else(|| f64::from(self.0.scroll_left()))
    }

    fn set_scroll_offset(&self, offset: f64) {
        let _ = Reflect::set(
            self.0.as_ref(),
            &JsValue::from_str("scrollLeft"),
            &JsValue::from_f64(offset),
        );
    }
}

/// `window.setTimeout` with a fixed callback
pub(crate) struct WindowTimer<'a> {
    pub(crate) window: &'a Window,
    pub(crate) callback: &'a Function,
}

impl TimerHost for WindowTimer<'_> {
    type Handle = i32;

    fn set_timeout(&mut self, delay_ms: u32) -> Option<i32> {
        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        self.window
            .set_timeout_with_callback_and_timeout_and_arguments_0(self.callback, delay)
            .ok()
    }

    fn clear_timeout(&mut self, handle: i32) {
        self.window.clear_timeout_with_handle(handle);
    }
}

/// `window.clearTimeout` only, for cancelling on teardown
pub(crate) struct ClearOnly<'a>(pub(crate) &'a Window);

impl TimerHost for ClearOnly<'_> {
    type Handle = i32;

    fn set_timeout(&mut self, _delay_ms: u32) -> Option<i32> {
        None
    }

    fn clear_timeout(&mut self, handle: i32) {
        self.0.clear_timeout_with_handle(handle);
    }
}

/// Flags persisted in `window.localStorage`
pub(crate) struct LocalStorageFlags {
    storage: Option<Storage>,
}

impl LocalStorageFlags {
    /// Storage may be unavailable (private mode, sandboxed iframes); every
    /// read then fails and the caller falls back.
    pub(crate) fn new(window: &Window) -> Self {
        Self {
            storage: window.local_storage().ok().flatten(),
        }
    }

    fn storage(&self) -> Result<&Storage> {
        self.storage
            .as_ref()
            .ok_or_else(|| SheetGridError::Store("localStorage unavailable".into()))
    }
}

impl FlagStore for LocalStorageFlags {
    fn get(&self, key: &str) -> Result<bool> {
        let value = self
            .storage()?
            .get_item(key)
            .map_err(|e| SheetGridError::Store(format!("{e:?}")))?;
        Ok(value.as_deref() == Some("true"))
    }

    fn set(&mut self, key: &str, value: bool) -> Result<()> {
        self.storage()?
            .set_item(key, if value { "true" } else { "false" })
            .map_err(|e| SheetGridError::Store(format!("{e:?}")))
    }
}

/// Current `window.innerWidth`, if there is a window
pub(crate) fn viewport_width(window: Option<&Window>) -> Option<f64> {
    window
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
}
