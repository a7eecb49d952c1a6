//! "Shown once" logic for the welcome modal.
//!
//! Whether the modal has been shown lives in an injected [`FlagStore`]
//! (`localStorage` in the browser). The modal closes itself after
//! [`WELCOME_AUTO_DISMISS_MS`] unless the user closes it first.

use std::collections::HashMap;

use tracing::warn;

use crate::error::Result;
use crate::timer::{OneShot, TimerHost};

/// Storage key of the "welcome modal shown" flag
pub const WELCOME_SHOWN_KEY: &str = "sheetgrid.welcome-shown";

/// Delay (ms) before the welcome modal closes on its own
pub const WELCOME_AUTO_DISMISS_MS: u32 = 10_000;

/// Persistent boolean flags
pub trait FlagStore {
    /// Read a flag; an absent flag is `false`.
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<bool>;

    /// Write a flag.
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be written.
    fn set(&mut self, key: &str, value: bool) -> Result<()>;
}

/// In-memory flag store, for native use and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryFlagStore {
    flags: HashMap<String, bool>,
}

impl MemoryFlagStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FlagStore for MemoryFlagStore {
    fn get(&self, key: &str) -> Result<bool> {
        Ok(self.flags.get(key).copied().unwrap_or(false))
    }

    fn set(&mut self, key: &str, value: bool) -> Result<()> {
        self.flags.insert(key.to_string(), value);
        Ok(())
    }
}

/// Decides whether the welcome modal shows, and closes it
pub struct WelcomeGate<S, T> {
    store: S,
    visible: bool,
    auto_dismiss: OneShot<T>,
}

impl<S: FlagStore, T> WelcomeGate<S, T> {
    /// Read the flag and decide visibility. A store that cannot be read is
    /// treated as "not shown yet".
    pub fn new(store: S) -> Self {
        Self::with_delay(store, WELCOME_AUTO_DISMISS_MS)
    }

    pub fn with_delay(store: S, auto_dismiss_ms: u32) -> Self {
        let shown = store.get(WELCOME_SHOWN_KEY).unwrap_or_else(|e| {
            warn!(error = %e, "could not read welcome flag");
            false
        });
        Self {
            store,
            visible: !shown,
            auto_dismiss: OneShot::new(auto_dismiss_ms),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Display the modal if it is due: persist the flag so it never shows
    /// again, and start the auto-dismiss timer.
    ///
    /// # Errors
    /// Returns an error if the flag cannot be written. The modal still shows.
    pub fn open<H: TimerHost<Handle = T>>(&mut self, host: &mut H) -> Result<bool> {
        if !self.visible {
            return Ok(false);
        }
        self.auto_dismiss.arm(host);
        self.store.set(WELCOME_SHOWN_KEY, true)?;
        Ok(true)
    }

    /// User closed the modal
    pub fn dismiss<H: TimerHost<Handle = T>>(&mut self, host: &mut H) {
        self.visible = false;
        self.auto_dismiss.cancel(host);
    }

    /// The auto-dismiss timer ran. Returns true if this closed the modal.
    pub fn on_auto_dismiss(&mut self) -> bool {
        if !self.auto_dismiss.fire() || !self.visible {
            return false;
        }
        self.visible = false;
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::SheetGridError;

    #[derive(Default)]
    struct Host {
        pending: Vec<u32>,
        cleared: Vec<u32>,
    }

    impl TimerHost for Host {
        type Handle = u32;

        fn set_timeout(&mut self, delay_ms: u32) -> Option<u32> {
            self.pending.push(delay_ms);
            Some(1)
        }

        fn clear_timeout(&mut self, handle: u32) {
            self.cleared.push(handle);
        }
    }

    struct BrokenStore;

    impl FlagStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<bool> {
            Err(SheetGridError::Store("unavailable".into()))
        }

        fn set(&mut self, _key: &str, _value: bool) -> Result<()> {
            Err(SheetGridError::Store("unavailable".into()))
        }
    }

    #[test]
    fn test_first_visit_shows_and_persists() {
        let mut host = Host::default();
        let mut gate: WelcomeGate<_, u32> = WelcomeGate::new(MemoryFlagStore::new());
        assert!(gate.is_visible());
        assert!(gate.open(&mut host).unwrap());
        assert_eq!(host.pending, vec![WELCOME_AUTO_DISMISS_MS]);
        assert!(gate.store().get(WELCOME_SHOWN_KEY).unwrap());
    }

    #[test]
    fn test_second_visit_stays_hidden() {
        let mut store = MemoryFlagStore::new();
        store.set(WELCOME_SHOWN_KEY, true).unwrap();
        let mut host = Host::default();
        let mut gate: WelcomeGate<_, u32> = WelcomeGate::new(store);
        assert!(!gate.is_visible());
        assert!(!gate.open(&mut host).unwrap());
        assert!(host.pending.is_empty());
    }

    #[test]
    fn test_auto_dismiss_closes_once() {
        let mut host = Host::default();
        let mut gate: WelcomeGate<_, u32> = WelcomeGate::with_delay(MemoryFlagStore::new(), 50);
        gate.open(&mut host).unwrap();
        assert!(gate.on_auto_dismiss());
        assert!(!gate.is_visible());
        assert!(!gate.on_auto_dismiss());
    }

    #[test]
    fn test_manual_dismiss_cancels_timer() {
        let mut host = Host::default();
        let mut gate: WelcomeGate<_, u32> = WelcomeGate::new(MemoryFlagStore::new());
        gate.open(&mut host).unwrap();
        gate.dismiss(&mut host);
        assert_eq!(host.cleared, vec![1]);
        assert!(!gate.on_auto_dismiss());
    }

    #[test]
    fn test_unreadable_store_shows_modal() {
        let mut host = Host::default();
        let mut gate: WelcomeGate<_, u32> = WelcomeGate::new(BrokenStore);
        assert!(gate.is_visible());
        assert!(matches!(gate.open(&mut host), Err(SheetGridError::Store(_))));
        assert!(gate.is_visible());
    }
}
