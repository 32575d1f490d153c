//! Cancellable timers on a virtual clock ⏱️
//!
//! Time is a `Duration` since the board's epoch. The runtime maps it onto a
//! real clock; tests just pick numbers.

use std::time::Duration;

/// What a timer is for. The board dispatches on this when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Change-detector poll
    Poll,
    /// Wait for freshly rendered content to settle before measuring
    Settle,
    /// Extra decoration pass after a current-song change
    DecorationRefresh,
    /// Auto-scroll step
    ScrollTick,
    /// End of a boundary pause
    ScrollResume,
    /// Trailing edge of a resize burst
    ResizeDebounce,
}

/// Returned by `schedule*`; pass it back to [`Timers::cancel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone)]
struct Entry {
    handle: TimerHandle,
    kind: TimerKind,
    due: Duration,
    period: Option<Duration>,
}

#[derive(Debug, Default)]
pub struct Timers {
    next_id: u64,
    entries: Vec<Entry>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// One-shot timer firing at `now + delay`.
    pub fn schedule(&mut self, now: Duration, delay: Duration, kind: TimerKind) -> TimerHandle {
        self.insert(now + delay, None, kind)
    }

    /// Repeating timer, first firing one `period` from now.
    pub fn schedule_every(
        &mut self,
        now: Duration,
        period: Duration,
        kind: TimerKind,
    ) -> TimerHandle {
        self.insert(now + period, Some(period), kind)
    }

    fn insert(&mut self, due: Duration, period: Option<Duration>, kind: TimerKind) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            handle,
            kind,
            due,
            period,
        });
        handle
    }

    /// Cancelling an expired or unknown handle is a no-op.
    pub fn cancel(&mut self, handle: TimerHandle) {
        self.entries.retain(|e| e.handle != handle);
    }

    pub fn is_active(&self, handle: TimerHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    pub fn count(&self, kind: TimerKind) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.entries.iter().map(|e| e.due).min()
    }

    /// Take the earliest timer due at or before `now`.
    ///
    /// Repeating timers are re-armed one period after their due time, so a
    /// late caller catches up tick by tick. Ties fire in scheduling order.
    pub fn pop_due(&mut self, now: Duration) -> Option<(TimerHandle, TimerKind, Duration)> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= now)
            .min_by_key(|(_, e)| (e.due, e.handle.0))
            .map(|(i, _)| i)?;

        let entry = &self.entries[idx];
        let fired = (entry.handle, entry.kind, entry.due);
        let period = entry.period;
        match period {
            Some(period) => self.entries[idx].due += period,
            None => {
                self.entries.remove(idx);
            }
        }
        Some(fired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_one_shot_fires_once() {
        let mut timers = Timers::new();
        let h = timers.schedule(ms(0), ms(50), TimerKind::Settle);

        assert!(timers.pop_due(ms(49)).is_none());
        assert_eq!(timers.pop_due(ms(50)), Some((h, TimerKind::Settle, ms(50))));
        assert!(timers.pop_due(ms(1000)).is_none());
        assert!(!timers.is_active(h));
    }

    #[test]
    fn test_repeating_catches_up_in_order() {
        let mut timers = Timers::new();
        timers.schedule_every(ms(0), ms(50), TimerKind::ScrollTick);

        let mut dues = Vec::new();
        while let Some((_, _, due)) = timers.pop_due(ms(160)) {
            dues.push(due.as_millis());
        }
        assert_eq!(dues, vec![50, 100, 150]);
        assert_eq!(timers.next_due(), Some(ms(200)));
    }

    #[test]
    fn test_cancel_removes_timer() {
        let mut timers = Timers::new();
        let a = timers.schedule(ms(0), ms(10), TimerKind::ResizeDebounce);
        let b = timers.schedule(ms(0), ms(20), TimerKind::Poll);
        timers.cancel(a);
        timers.cancel(a);

        assert_eq!(timers.count(TimerKind::ResizeDebounce), 0);
        assert_eq!(timers.pop_due(ms(100)).map(|f| f.0), Some(b));
    }

    #[test]
    fn test_earliest_wins_regardless_of_insert_order() {
        let mut timers = Timers::new();
        timers.schedule(ms(0), ms(30), TimerKind::Poll);
        timers.schedule(ms(0), ms(10), TimerKind::Settle);
        assert_eq!(timers.pop_due(ms(100)).map(|f| f.1), Some(TimerKind::Settle));
    }
}
