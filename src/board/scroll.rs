//! Bounce auto-scroll 🌊
//!
//! ```text
//! Idle -> ScrollingDown -> PausedAtBottom -> ScrollingUp -> PausedAtTop -> ScrollingDown ...
//! ```
//!
//! Driven by two timers: a repeating tick and a one-shot resume after each
//! boundary pause. Stopping cancels both and puts the viewport back at 0.

use std::time::Duration;

use serde::Serialize;

use super::timer::{TimerHandle, TimerKind, Timers};
use crate::app::config::DisplayConfig;
use crate::surface::{Element, Surface};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    Down,
    Up,
}

impl Direction {
    pub fn sign(self) -> f64 {
        match self {
            Direction::Down => 1.0,
            Direction::Up => -1.0,
        }
    }

    fn flipped(self) -> Self {
        match self {
            Direction::Down => Direction::Up,
            Direction::Up => Direction::Down,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScrollPhase {
    Idle,
    ScrollingDown,
    PausedAtBottom,
    ScrollingUp,
    PausedAtTop,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScrollState {
    pub position: f64,
    pub direction: Direction,
    pub paused: bool,
}

/// What a tick did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Not running, or a stale timer
    Ignored,
    /// Sitting out a boundary pause
    Paused,
    /// Content no longer overflows; back to idle
    Stopped,
    Moved {
        position: f64,
        /// Moved far enough since the last decoration sync
        sync_decoration: bool,
    },
}

pub struct AutoScroll {
    config: DisplayConfig,
    state: Option<ScrollState>,
    tick: Option<TimerHandle>,
    resume: Option<TimerHandle>,
    last_sync_position: f64,
}

impl AutoScroll {
    pub fn new(config: DisplayConfig) -> Self {
        Self {
            config,
            state: None,
            tick: None,
            resume: None,
            last_sync_position: 0.0,
        }
    }

    pub fn state(&self) -> Option<ScrollState> {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_some()
    }

    pub fn phase(&self) -> ScrollPhase {
        match self.state {
            None => ScrollPhase::Idle,
            Some(s) if s.paused && s.position > 0.0 => ScrollPhase::PausedAtBottom,
            Some(s) if s.paused => ScrollPhase::PausedAtTop,
            Some(s) => match s.direction {
                Direction::Down => ScrollPhase::ScrollingDown,
                Direction::Up => ScrollPhase::ScrollingUp,
            },
        }
    }

    /// (Re)start from the top. Any previous run is stopped first, so there is
    /// never more than one tick timer.
    pub fn start<S: Surface>(&mut self, surface: &mut S, timers: &mut Timers, now: Duration) {
        self.stop(surface, timers);

        self.state = Some(ScrollState {
            position: 0.0,
            direction: Direction::Down,
            paused: false,
        });
        self.last_sync_position = 0.0;
        self.tick = Some(timers.schedule_every(
            now,
            self.config.scroll_interval(),
            TimerKind::ScrollTick,
        ));
        tracing::debug!("auto-scroll started");
    }

    pub fn stop<S: Surface>(&mut self, surface: &mut S, timers: &mut Timers) {
        if let Some(handle) = self.tick.take() {
            timers.cancel(handle);
        }
        if let Some(handle) = self.resume.take() {
            timers.cancel(handle);
        }
        if self.state.take().is_some() {
            tracing::debug!("auto-scroll stopped");
        }
        surface.set_scroll_offset(0.0);
    }

    pub fn on_tick<S: Surface>(
        &mut self,
        handle: TimerHandle,
        surface: &mut S,
        timers: &mut Timers,
        now: Duration,
    ) -> TickOutcome {
        if self.tick != Some(handle) {
            return TickOutcome::Ignored;
        }
        match self.state {
            None => return TickOutcome::Ignored,
            Some(state) if state.paused => return TickOutcome::Paused,
            Some(_) => {}
        }

        // 1. Scroll range, re-measured every tick
        let list_height = surface
            .measure(Element::SungList)
            .map(|m| m.content_height)
            .unwrap_or(0.0);
        let viewport_height = surface
            .measure(Element::ScrollViewport)
            .map(|m| m.height)
            .unwrap_or(0.0);
        let max_scroll = (list_height + self.config.extra_scroll_space - viewport_height).max(0.0);

        if max_scroll <= 0.0 {
            self.stop(surface, timers);
            return TickOutcome::Stopped;
        }

        let Some(state) = self.state.as_mut() else {
            return TickOutcome::Ignored;
        };

        // 2. Advance
        state.position += state.direction.sign() * self.config.scroll_speed;

        // 3. Boundaries: clamp, pause, flip later
        let bottom = max_scroll + self.config.bottom_scroll_buffer;
        let hit_boundary = if state.position >= bottom {
            state.position = bottom;
            true
        } else if state.position <= 0.0 {
            state.position = 0.0;
            true
        } else {
            false
        };

        if hit_boundary {
            state.paused = true;
            self.resume = Some(timers.schedule(
                now,
                self.config.scroll_pause(),
                TimerKind::ScrollResume,
            ));
            tracing::trace!(position = state.position, "auto-scroll paused at boundary");
        }

        let position = state.position;
        surface.set_scroll_offset(position);

        let sync_decoration =
            (position - self.last_sync_position).abs() >= self.config.decoration_sync_step;
        if sync_decoration {
            self.last_sync_position = position;
        }

        TickOutcome::Moved {
            position,
            sync_decoration,
        }
    }

    /// End of a boundary pause: reverse and carry on.
    pub fn on_resume(&mut self, handle: TimerHandle) -> bool {
        if self.resume != Some(handle) {
            return false;
        }
        self.resume = None;
        match self.state.as_mut() {
            Some(state) if state.paused => {
                state.direction = state.direction.flipped();
                state.paused = false;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::content::render_song_list;
    use crate::surface::{HeadlessSurface, Length, StyleProp};

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    /// 10 entries (400px) in a 300px viewport: max scroll = 400 + 20 - 300 = 120
    fn overflowing_surface() -> HeadlessSurface {
        let mut surface = HeadlessSurface::standard();
        let songs: String = (1..=10).map(|i| format!("S{i}\n")).collect();
        render_song_list(&mut surface, &songs);
        surface.set_style(
            Element::ScrollViewport,
            &[StyleProp::Height(Some(Length::Px(300.0)))],
        );
        surface
    }

    fn fast_config() -> DisplayConfig {
        DisplayConfig {
            scroll_speed: 10.0,
            ..DisplayConfig::default()
        }
    }

    /// Fire due timers up to `until`, like the board does.
    fn run(
        scroll: &mut AutoScroll,
        surface: &mut HeadlessSurface,
        timers: &mut Timers,
        until: Duration,
        trace: &mut Vec<(Duration, ScrollState)>,
    ) {
        while let Some((handle, kind, due)) = timers.pop_due(until) {
            match kind {
                TimerKind::ScrollTick => {
                    scroll.on_tick(handle, surface, timers, due);
                }
                TimerKind::ScrollResume => {
                    scroll.on_resume(handle);
                }
                _ => {}
            }
            if let Some(state) = scroll.state() {
                trace.push((due, state));
            }
        }
    }

    #[test]
    fn test_start_resets_to_top() {
        let mut surface = overflowing_surface();
        let mut timers = Timers::new();
        let mut scroll = AutoScroll::new(fast_config());

        scroll.start(&mut surface, &mut timers, ms(0));
        assert_eq!(scroll.phase(), ScrollPhase::ScrollingDown);
        assert_eq!(surface.scroll_offset(), 0.0);

        // A second start never leaves two tick timers behind
        scroll.start(&mut surface, &mut timers, ms(10));
        assert_eq!(timers.count(TimerKind::ScrollTick), 1);
    }

    #[test]
    fn test_bounce_cycle() {
        let mut surface = overflowing_surface();
        let mut timers = Timers::new();
        let mut scroll = AutoScroll::new(fast_config());
        let mut trace = Vec::new();

        scroll.start(&mut surface, &mut timers, ms(0));

        // 125 / 10 => reaches the bottom (clamped to 125) on tick 13 at 650ms
        run(&mut scroll, &mut surface, &mut timers, ms(650), &mut trace);
        assert_eq!(scroll.phase(), ScrollPhase::PausedAtBottom);
        assert_eq!(surface.scroll_offset(), 125.0);

        // Still paused just before the pause ends
        run(&mut scroll, &mut surface, &mut timers, ms(1649), &mut trace);
        assert_eq!(scroll.phase(), ScrollPhase::PausedAtBottom);

        run(&mut scroll, &mut surface, &mut timers, ms(1650), &mut trace);
        assert_eq!(scroll.phase(), ScrollPhase::ScrollingUp);

        run(&mut scroll, &mut surface, &mut timers, ms(1700), &mut trace);
        assert_eq!(scroll.state().map(|s| s.position), Some(115.0));

        // Back to the top, pause, then down again
        run(&mut scroll, &mut surface, &mut timers, ms(2300), &mut trace);
        assert_eq!(scroll.phase(), ScrollPhase::PausedAtTop);
        run(&mut scroll, &mut surface, &mut timers, ms(3400), &mut trace);
        assert_eq!(scroll.phase(), ScrollPhase::ScrollingDown);
    }

    #[test]
    fn test_position_is_monotonic_and_bounded() {
        let mut surface = overflowing_surface();
        let mut timers = Timers::new();
        let config = DisplayConfig {
            scroll_speed: 7.0,
            ..DisplayConfig::default()
        };
        let pause = config.scroll_pause();
        let mut scroll = AutoScroll::new(config);
        let mut trace = Vec::new();

        scroll.start(&mut surface, &mut timers, ms(0));
        run(&mut scroll, &mut surface, &mut timers, ms(10_000), &mut trace);

        let upper = 125.0;
        let mut last_flip_pause_start: Option<Duration> = None;
        for pair in trace.windows(2) {
            let (_, a) = pair[0];
            let (t, b) = pair[1];
            assert!((0.0..=upper).contains(&b.position));
            if a.direction == b.direction {
                match b.direction {
                    Direction::Down => assert!(b.position >= a.position),
                    Direction::Up => assert!(b.position <= a.position),
                }
            }
            if !a.paused && b.paused {
                last_flip_pause_start = Some(t);
            }
            if a.direction != b.direction {
                // Direction only changes once the pause has fully elapsed
                let started = last_flip_pause_start.unwrap_or_default();
                assert!(t - started >= pause);
            }
        }
        assert!(trace.iter().any(|(_, s)| s.direction == Direction::Up));
    }

    #[test]
    fn test_stops_when_content_fits() {
        let mut surface = overflowing_surface();
        let mut timers = Timers::new();
        let mut scroll = AutoScroll::new(fast_config());
        scroll.start(&mut surface, &mut timers, ms(0));

        surface.set_style(
            Element::ScrollViewport,
            &[StyleProp::Height(Some(Length::Px(1000.0)))],
        );
        let mut trace = Vec::new();
        run(&mut scroll, &mut surface, &mut timers, ms(50), &mut trace);

        assert_eq!(scroll.phase(), ScrollPhase::Idle);
        assert_eq!(timers.count(TimerKind::ScrollTick), 0);
        assert_eq!(surface.scroll_offset(), 0.0);
    }

    #[test]
    fn test_stop_cancels_pending_resume() {
        let mut surface = overflowing_surface();
        let mut timers = Timers::new();
        let mut scroll = AutoScroll::new(fast_config());
        let mut trace = Vec::new();

        scroll.start(&mut surface, &mut timers, ms(0));
        run(&mut scroll, &mut surface, &mut timers, ms(650), &mut trace);
        assert_eq!(timers.count(TimerKind::ScrollResume), 1);

        scroll.stop(&mut surface, &mut timers);
        assert_eq!(timers.count(TimerKind::ScrollResume), 0);
        assert_eq!(timers.next_due(), None);
    }

    #[test]
    fn test_decoration_sync_is_throttled() {
        let mut surface = overflowing_surface();
        let mut timers = Timers::new();
        let mut scroll = AutoScroll::new(fast_config());
        scroll.start(&mut surface, &mut timers, ms(0));

        let mut syncs = Vec::new();
        while let Some((handle, kind, due)) = timers.pop_due(ms(600)) {
            if kind == TimerKind::ScrollTick {
                if let TickOutcome::Moved {
                    position,
                    sync_decoration: true,
                } = scroll.on_tick(handle, &mut surface, &mut timers, due)
                {
                    syncs.push(position);
                }
            }
        }
        assert_eq!(syncs, vec![50.0, 100.0]);
    }
}
