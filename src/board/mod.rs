//! The board controller: change detection → render → settle → layout →
//! {auto-scroll, decoration}.
//!
//! Single-threaded and timer driven. The owner feeds it notifications and
//! calls [`BoardController::advance_to`] with the current time; everything
//! else happens in timer callbacks.

pub mod arbiter;
pub mod content;
pub mod decoration;
pub mod detector;
pub mod resize;
pub mod scroll;
pub mod timer;

use std::time::Duration;

use serde::Serialize;

use crate::app::config::DisplayConfig;
use crate::store::SharedStore;
use crate::surface::{Element, Surface};

use arbiter::{Decision, DisplayMode, LayoutArbiter};
use decoration::DecorationUpdate;
use detector::{ChangeDetector, Notification};
use resize::ResizeCoordinator;
use scroll::{AutoScroll, ScrollPhase, ScrollState, TickOutcome};
use timer::{TimerHandle, TimerKind, Timers};

/// Counters for observing the pipeline from the outside.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    pub checks: u64,
    pub renders: u64,
    pub recomputes: u64,
    pub decoration_syncs: u64,
}

pub struct BoardController<S, K> {
    surface: S,
    store: K,
    config: DisplayConfig,
    timers: Timers,
    now: Duration,

    detector: ChangeDetector,
    arbiter: LayoutArbiter,
    scroll: AutoScroll,
    resize: ResizeCoordinator,

    poll: Option<TimerHandle>,
    settle: Option<TimerHandle>,
    decoration_refresh: Option<TimerHandle>,

    mode: Option<DisplayMode>,
    last_decision: Option<Decision>,
    stats: PipelineStats,
}

impl<S: Surface, K: SharedStore> BoardController<S, K> {
    pub fn new(surface: S, store: K, config: DisplayConfig) -> Self {
        Self {
            surface,
            store,
            timers: Timers::new(),
            now: Duration::ZERO,
            detector: ChangeDetector::new(),
            arbiter: LayoutArbiter::new(config.clone()),
            scroll: AutoScroll::new(config.clone()),
            resize: ResizeCoordinator::new(config.resize_debounce()),
            poll: None,
            settle: None,
            decoration_refresh: None,
            mode: None,
            last_decision: None,
            stats: PipelineStats::default(),
            config,
        }
    }

    // --- Accessors ---

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn store_mut(&mut self) -> &mut K {
        &mut self.store
    }

    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    pub fn mode(&self) -> Option<DisplayMode> {
        self.mode
    }

    pub fn last_decision(&self) -> Option<&Decision> {
        self.last_decision.as_ref()
    }

    pub fn stats(&self) -> PipelineStats {
        self.stats
    }

    pub fn scroll_state(&self) -> Option<ScrollState> {
        self.scroll.state()
    }

    pub fn scroll_phase(&self) -> ScrollPhase {
        self.scroll.phase()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    /// When the next timer wants to run, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_due()
    }

    // --- Lifecycle ---

    /// Initial check, poll timer, and a first layout pass so the starting
    /// mode is set even when the store is empty.
    pub fn start(&mut self) {
        self.check_content();
        if self.poll.is_none() {
            self.poll = Some(self.timers.schedule_every(
                self.now,
                self.config.update_interval(),
                TimerKind::Poll,
            ));
        }
        self.schedule_settle();
        tracing::info!(
            poll_ms = self.config.update_interval_ms,
            "board started"
        );
    }

    /// Cancel every timer and park the scroll.
    pub fn shutdown(&mut self) {
        for handle in [
            self.poll.take(),
            self.settle.take(),
            self.decoration_refresh.take(),
        ]
        .into_iter()
        .flatten()
        {
            self.timers.cancel(handle);
        }
        self.resize.cancel(&mut self.timers);
        self.scroll.stop(&mut self.surface, &mut self.timers);
        tracing::info!("board stopped");
    }

    // --- Inputs ---

    /// Something may have changed. Returns true when new content was rendered.
    pub fn notify(&mut self, notification: Notification) -> bool {
        if !notification.is_relevant() {
            return false;
        }
        self.check_content()
    }

    /// [`notify`](Self::notify) for an event that arrived at `now`. The clock
    /// catches up first, so the settle delay counts from the event and not
    /// from the last timer that ran.
    pub fn notify_at(&mut self, now: Duration, notification: Notification) -> bool {
        self.advance_to(now);
        self.notify(notification)
    }

    /// The surface was resized; a layout pass follows once resizing settles.
    pub fn resized(&mut self) {
        self.resize.notify(&mut self.timers, self.now);
    }

    /// [`resized`](Self::resized) for an event that arrived at `now`.
    pub fn resized_at(&mut self, now: Duration) {
        self.advance_to(now);
        self.resized();
    }

    /// Fire every timer due up to `now`, in order.
    pub fn advance_to(&mut self, now: Duration) {
        while let Some((handle, kind, due)) = self.timers.pop_due(now) {
            self.now = self.now.max(due);
            self.fire(handle, kind);
        }
        self.now = self.now.max(now);
    }

    pub fn advance_by(&mut self, delta: Duration) {
        let target = self.now + delta;
        self.advance_to(target);
    }

    // --- Pipeline ---

    fn check_content(&mut self) -> bool {
        self.stats.checks += 1;
        let snapshot = detector::read_snapshot(&self.store);
        let Some(change) = self.detector.observe(snapshot) else {
            return false;
        };

        let last = self.detector.last().clone();
        let entries = content::render_song_list(&mut self.surface, &last.sung_songs);
        content::render_current_song(&mut self.surface, &last.current_song);
        self.stats.renders += 1;
        tracing::debug!(
            entries,
            sung_changed = change.sung_songs,
            current_changed = change.current_song,
            "content rendered"
        );

        if change.current_song {
            if let Some(handle) = self.decoration_refresh.take() {
                self.timers.cancel(handle);
            }
            self.decoration_refresh = Some(self.timers.schedule(
                self.now,
                self.config.decoration_refresh(),
                TimerKind::DecorationRefresh,
            ));
        }
        self.schedule_settle();
        true
    }

    fn schedule_settle(&mut self) {
        if let Some(handle) = self.settle.take() {
            self.timers.cancel(handle);
        }
        self.settle = Some(self.timers.schedule(
            self.now,
            self.config.settle_delay(),
            TimerKind::Settle,
        ));
    }

    /// Stop scrolling, pick a mode, restart scrolling if needed, move the
    /// decoration.
    pub fn recompute_layout(&mut self) -> Decision {
        self.scroll.stop(&mut self.surface, &mut self.timers);

        let has_sung_songs = !self.surface.measure_entries().is_empty();
        let has_current_song = self
            .surface
            .measure(Element::CurrentSong)
            .map(|m| m.displayed)
            .unwrap_or(false);

        let decision = self
            .arbiter
            .select_mode(&mut self.surface, has_sung_songs, has_current_song);
        if decision.scroll {
            self.scroll.start(&mut self.surface, &mut self.timers, self.now);
        }

        if self.mode != Some(decision.mode) {
            tracing::info!(
                from = ?self.mode,
                to = ?decision.mode,
                "display mode changed"
            );
        }
        self.mode = Some(decision.mode);
        self.last_decision = Some(decision);
        self.stats.recomputes += 1;

        self.sync_decoration();
        decision
    }

    pub fn sync_decoration(&mut self) -> DecorationUpdate {
        self.stats.decoration_syncs += 1;
        decoration::sync_decoration(&mut self.surface, &self.config)
    }

    fn fire(&mut self, handle: TimerHandle, kind: TimerKind) {
        match kind {
            TimerKind::Poll => {
                self.check_content();
            }
            TimerKind::Settle => {
                if self.settle == Some(handle) {
                    self.settle = None;
                    self.recompute_layout();
                }
            }
            TimerKind::DecorationRefresh => {
                if self.decoration_refresh == Some(handle) {
                    self.decoration_refresh = None;
                    self.sync_decoration();
                }
            }
            TimerKind::ScrollTick => {
                let outcome = self
                    .scroll
                    .on_tick(handle, &mut self.surface, &mut self.timers, self.now);
                if let TickOutcome::Moved {
                    sync_decoration: true,
                    ..
                } = outcome
                {
                    self.sync_decoration();
                }
            }
            TimerKind::ScrollResume => {
                self.scroll.on_resume(handle);
            }
            TimerKind::ResizeDebounce => {
                if self.resize.fire(handle) {
                    self.recompute_layout();
                }
            }
        }
    }
}
