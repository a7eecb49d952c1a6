//! Cancellable one-shot timers.
//!
//! The host (the browser's `setTimeout` on wasm32, a fake in tests) owns the
//! actual clock; [`OneShot`] only tracks whether its single callback is still
//! pending, so it can be cleared on unmount and never fires twice.

use tracing::warn;

/// Delay (ms) after mount before the first content-width measurement.
pub const MEASURE_DELAY_MS: u32 = 100;

/// Something that can schedule and clear delayed callbacks
pub trait TimerHost {
    /// Opaque id of a scheduled callback
    type Handle;

    /// Schedule the callback after `delay_ms`. `None` if the host could not.
    fn set_timeout(&mut self, delay_ms: u32) -> Option<Self::Handle>;

    /// Clear a callback that has not fired yet
    fn clear_timeout(&mut self, handle: Self::Handle);
}

/// Lifecycle of a [`OneShot`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OneShotState {
    /// Not scheduled yet
    Idle,
    /// Scheduled and waiting
    Pending,
    /// Callback ran
    Fired,
    /// Cleared before it ran
    Cancelled,
}

/// A timer that is scheduled at most once and fires at most once
#[derive(Debug)]
pub struct OneShot<T> {
    delay_ms: u32,
    handle: Option<T>,
    state: OneShotState,
}

impl<T> OneShot<T> {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            delay_ms,
            handle: None,
            state: OneShotState::Idle,
        }
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    pub fn state(&self) -> OneShotState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        self.state == OneShotState::Pending
    }

    /// Schedule the timer. Only an idle timer can be armed; there is no retry
    /// once it has fired or been cancelled.
    pub fn arm<H: TimerHost<Handle = T>>(&mut self, host: &mut H) -> bool {
        if self.state != OneShotState::Idle {
            return false;
        }
        match host.set_timeout(self.delay_ms) {
            Some(handle) => {
                self.handle = Some(handle);
                self.state = OneShotState::Pending;
                true
            }
            None => {
                warn!(delay_ms = self.delay_ms, "timer host refused to schedule");
                false
            }
        }
    }

    /// Record that the host ran the callback. Returns true only for the first
    /// call on a pending timer.
    pub fn fire(&mut self) -> bool {
        if self.state != OneShotState::Pending {
            return false;
        }
        self.handle = None;
        self.state = OneShotState::Fired;
        true
    }

    /// Clear a pending callback. Cancelling an idle timer prevents it from
    /// ever being armed; cancelling a fired one does nothing.
    pub fn cancel<H: TimerHost<Handle = T>>(&mut self, host: &mut H) {
        match self.state {
            OneShotState::Pending => {
                if let Some(handle) = self.handle.take() {
                    host.clear_timeout(handle);
                }
                self.state = OneShotState::Cancelled;
            }
            OneShotState::Idle => self.state = OneShotState::Cancelled,
            OneShotState::Fired | OneShotState::Cancelled => {}
        }
    }
}
