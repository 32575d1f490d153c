use std::time::Duration;

use super::timer::{TimerHandle, TimerKind, Timers};

/// Trailing-edge debounce for resize bursts: only the last notification in a
/// window triggers a layout pass.
pub struct ResizeCoordinator {
    debounce: Duration,
    pending: Option<TimerHandle>,
}

impl ResizeCoordinator {
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            pending: None,
        }
    }

    pub fn notify(&mut self, timers: &mut Timers, now: Duration) {
        if let Some(handle) = self.pending.take() {
            timers.cancel(handle);
        }
        self.pending = Some(timers.schedule(now, self.debounce, TimerKind::ResizeDebounce));
    }

    /// True when `handle` is the live debounce timer (and clears it).
    pub fn fire(&mut self, handle: TimerHandle) -> bool {
        if self.pending == Some(handle) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn cancel(&mut self, timers: &mut Timers) {
        if let Some(handle) = self.pending.take() {
            timers.cancel(handle);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
