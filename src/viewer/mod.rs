//! WASM-exported entry points for the browser.
//!
//! `SheetGrid` owns the sheet state and wires it to the DOM:
//! - Mirrors horizontal scroll between the content pane and the sticky track
//! - Sizes the sticky track's spacer from the current layout
//! - Defers the first content measurement until after first paint
//!
//! `WelcomeModal` drives the one-time welcome dialog over `localStorage`.
//!
//! Listeners and timers are removed on `detach()` or when the object is
//! dropped (`free()` from JavaScript).

mod dom;

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Function;
use tracing::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlDivElement};

use crate::config::LayoutConfig;
use crate::scroll::{ScrollSource, ScrollSync};
use crate::sheet::SheetState;
use crate::timer::{OneShot, MEASURE_DELAY_MS};
use crate::welcome::WelcomeGate;
use dom::{ClearOnly, DomScrollRegion, LocalStorageFlags, WindowTimer};

type ScrollListener = (HtmlDivElement, Closure<dyn FnMut(Event)>);

/// State reachable from event closures
struct SharedState {
    sheet: SheetState,
    sync: ScrollSync<DomScrollRegion>,
    spacer: Option<HtmlDivElement>,
    measure_timer: OneShot<i32>,
}

impl SharedState {
    /// Measure the content pane and resize the spacer
    fn measure(&mut self) {
        let measured = self.sync.content().map(DomScrollRegion::scroll_width);
        self.sheet.record_content_width(measured);
        self.apply_spacer_width();
    }

    fn apply_spacer_width(&self) {
        let Some(spacer) = &self.spacer else {
            return;
        };
        let width = self.sheet.spacer_width();
        let style = spacer.style();
        let _ = style.set_property("width", &format!("{width}px"));
        let _ = style.set_property("height", "1px");
        debug!(width, "sticky spacer resized");
    }
}

/// Sheet layout and scroll sync bound to DOM elements
#[wasm_bindgen]
pub struct SheetGrid {
    state: Rc<RefCell<SharedState>>,
    listeners: Vec<ScrollListener>,
    measure_closure: Option<Closure<dyn FnMut()>>,
}

#[wasm_bindgen]
impl SheetGrid {
    /// Create from an optional JSON layout configuration
    ///
    /// # Errors
    /// Returns an error if the configuration is malformed or invalid.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<SheetGrid, JsValue> {
        console_error_panic_hook::set_once();

        let config = match config_json {
            Some(json) => LayoutConfig::from_json(&json)?,
            None => LayoutConfig::default(),
        };
        let window = web_sys::window();
        let sheet = SheetState::new(config, dom::viewport_width(window.as_ref()))?;

        Ok(SheetGrid {
            state: Rc::new(RefCell::new(SharedState {
                sheet,
                sync: ScrollSync::new(),
                spacer: None,
                measure_timer: OneShot::new(MEASURE_DELAY_MS),
            })),
            listeners: Vec::new(),
            measure_closure: None,
        })
    }

    /// Bind the content pane, the sticky track and the track's spacer, and
    /// schedule the first measurement
    pub fn attach(&mut self, content: HtmlDivElement, track: HtmlDivElement, spacer: HtmlDivElement) {
        self.detach();

        {
            let mut s = self.state.borrow_mut();
            s.sync.attach_content(DomScrollRegion::new(content.clone()));
            s.sync.attach_track(DomScrollRegion::new(track.clone()));
            s.spacer = Some(spacer);
            s.measure_timer = OneShot::new(MEASURE_DELAY_MS);
            s.apply_spacer_width();
        }

        for (element, source) in [(content, ScrollSource::Content), (track, ScrollSource::Track)] {
            if let Some(closure) = self.listen(&element, source) {
                self.listeners.push((element, closure));
            }
        }

        self.schedule_measure();
    }

    /// Remove listeners, clear the pending measurement and drop the regions
    pub fn detach(&mut self) {
        for (element, closure) in self.listeners.drain(..) {
            let _ = element
                .remove_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
        }

        let mut s = self.state.borrow_mut();
        if let Some(window) = web_sys::window() {
            s.measure_timer.cancel(&mut ClearOnly(&window));
        }
        s.sync.detach_content();
        s.sync.detach_track();
        s.spacer = None;
    }

    /// Current widths, visible columns, total and spacer width
    ///
    /// # Errors
    /// Returns an error if the layout cannot be converted to a JS value.
    pub fn layout(&self) -> Result<JsValue, JsValue> {
        let snapshot = self.state.borrow().sheet.snapshot();
        serde_wasm_bindgen::to_value(&snapshot)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    /// Apply a user resize of one column
    ///
    /// # Errors
    /// Returns an error if `key` is not a configured column.
    pub fn resize_column(&mut self, key: &str, width: u32) -> Result<(), JsValue> {
        let mut s = self.state.borrow_mut();
        s.sheet.resize_column(key, width)?;
        s.apply_spacer_width();
        Ok(())
    }

    /// Replace the visible columns
    ///
    /// # Errors
    /// Returns an error for unknown or repeated keys.
    pub fn set_visible_columns(&mut self, keys: Vec<String>) -> Result<(), JsValue> {
        let mut s = self.state.borrow_mut();
        s.sheet.set_visible_columns(keys.as_slice())?;
        s.apply_spacer_width();
        Ok(())
    }

    /// # Errors
    /// Returns an error if `key` is not a configured column.
    pub fn hide_column(&mut self, key: &str) -> Result<(), JsValue> {
        let mut s = self.state.borrow_mut();
        s.sheet.hide_column(key)?;
        s.apply_spacer_width();
        Ok(())
    }

    /// # Errors
    /// Returns an error if `key` is not a configured column.
    pub fn show_column(&mut self, key: &str) -> Result<(), JsValue> {
        let mut s = self.state.borrow_mut();
        s.sheet.show_column(key)?;
        s.apply_spacer_width();
        Ok(())
    }

    /// Re-read `window.innerWidth` after a window resize
    pub fn on_window_resize(&mut self) {
        let window = web_sys::window();
        let mut s = self.state.borrow_mut();
        if let Some(width) = dom::viewport_width(window.as_ref()) {
            s.sheet.set_viewport_width(width);
        }
        s.measure();
    }

    /// Measure the rendered content now
    pub fn measure(&mut self) {
        self.state.borrow_mut().measure();
    }

    pub fn select_tab(&mut self, tab: &str) {
        self.state.borrow_mut().sheet.select_tab(tab);
    }

    pub fn selected_tab(&self) -> String {
        self.state.borrow().sheet.selected_tab().to_string()
    }
}

impl SheetGrid {
    fn listen(
        &self,
        element: &HtmlDivElement,
        source: ScrollSource,
    ) -> Option<Closure<dyn FnMut(Event)>> {
        let weak_state = Rc::downgrade(&self.state);
        let closure = Closure::wrap(Box::new(move |_event: Event| {
            let Some(state) = weak_state.upgrade() else {
                return;
            };
            // A scroll fired while the state is mutably borrowed is dropped;
            // the next one catches up.
            let Ok(s) = state.try_borrow() else {
                return;
            };
            let _ = s.sync.on_scroll(source);
        }) as Box<dyn FnMut(Event)>);

        element
            .add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref())
            .ok()?;
        Some(closure)
    }

    fn schedule_measure(&mut self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if self.measure_closure.is_none() {
            let weak_state = Rc::downgrade(&self.state);
            self.measure_closure = Some(Closure::wrap(Box::new(move || {
                if let Some(state) = weak_state.upgrade() {
                    let mut s = state.borrow_mut();
                    if s.measure_timer.fire() {
                        s.measure();
                    }
                }
            }) as Box<dyn FnMut()>));
        }
        let Some(closure) = &self.measure_closure else {
            return;
        };
        let mut host = WindowTimer {
            window: &window,
            callback: closure.as_ref().unchecked_ref(),
        };
        self.state.borrow_mut().measure_timer.arm(&mut host);
    }
}

impl Drop for SheetGrid {
    fn drop(&mut self) {
        self.detach();
    }
}

/// One-time welcome dialog
#[wasm_bindgen]
pub struct WelcomeModal {
    gate: Rc<RefCell<WelcomeGate<LocalStorageFlags, i32>>>,
    on_close: Function,
    auto_dismiss_closure: Option<Closure<dyn FnMut()>>,
}

#[wasm_bindgen]
impl WelcomeModal {
    /// `on_close` is called when the dialog closes on its own
    #[wasm_bindgen(constructor)]
    pub fn new(on_close: Function) -> Result<WelcomeModal, JsValue> {
        console_error_panic_hook::set_once();
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        Ok(WelcomeModal {
            gate: Rc::new(RefCell::new(WelcomeGate::new(LocalStorageFlags::new(&window)))),
            on_close,
            auto_dismiss_closure: None,
        })
    }

    pub fn is_visible(&self) -> bool {
        self.gate.borrow().is_visible()
    }

    /// Show the dialog if it has never been shown. Returns whether it shows.
    ///
    /// # Errors
    /// Returns an error if the "shown" flag cannot be persisted.
    pub fn open(&mut self) -> Result<bool, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        if self.auto_dismiss_closure.is_none() {
            let weak_gate = Rc::downgrade(&self.gate);
            let on_close = self.on_close.clone();
            self.auto_dismiss_closure = Some(Closure::wrap(Box::new(move || {
                let Some(gate) = weak_gate.upgrade() else {
                    return;
                };
                let closed = gate.borrow_mut().on_auto_dismiss();
                if closed {
                    let _ = on_close.call0(&JsValue::NULL);
                }
            }) as Box<dyn FnMut()>));
        }
        let Some(closure) = &self.auto_dismiss_closure else {
            return Ok(false);
        };
        let mut host = WindowTimer {
            window: &window,
            callback: closure.as_ref().unchecked_ref(),
        };
        Ok(self.gate.borrow_mut().open(&mut host)?)
    }

    /// User closed the dialog
    pub fn dismiss(&mut self) {
        if let Some(window) = web_sys::window() {
            self.gate.borrow_mut().dismiss(&mut ClearOnly(&window));
        }
    }
}

impl Drop for WelcomeModal {
    fn drop(&mut self) {
        self.dismiss();
    }
}
