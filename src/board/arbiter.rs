//! Display mode selection 🧠
//!
//! Four exclusive modes, picked from what is on screen and how tall it is:
//!
//! | sung songs | current song | overflow | mode          |
//! |------------|--------------|----------|---------------|
//! | no         | yes          | -        | `OnlyCurrent` |
//! | no         | no           | -        | `Empty`       |
//! | yes        | any          | no       | `Natural`     |
//! | yes        | any          | yes      | `Fixed`       |
//!
//! Every decision starts from a clean slate: all styles a previous mode may
//! have set are cleared first.

use serde::{Deserialize, Serialize};

use crate::app::config::DisplayConfig;
use crate::surface::{Element, EntryBox, Length, StyleProp, Surface};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayMode {
    /// Frame grows with content
    Natural,
    /// Frame pinned at max height, list scrolls inside
    Fixed,
    /// Nothing sung yet, only the current song is shown
    OnlyCurrent,
    /// Nothing at all, frame hidden
    Empty,
}

impl DisplayMode {
    /// Marker class consumed by the styling layer.
    pub fn class_name(&self) -> &'static str {
        match self {
            DisplayMode::Natural => "natural-mode",
            DisplayMode::Fixed => "fixed-mode",
            DisplayMode::OnlyCurrent => "only-current-mode",
            DisplayMode::Empty => "empty-mode",
        }
    }
}

/// Numbers measured for a decision (all zero for the content-free modes).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Geometry {
    pub list_height: f64,
    pub current_height: f64,
    pub content_height: f64,
    pub max_frame_height: f64,
    /// Viewport height when a pinned current song shares the frame
    pub available_height: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Decision {
    pub mode: DisplayMode,
    pub has_current_song: bool,
    /// Caller should start the auto-scroll
    pub scroll: bool,
    pub geometry: Geometry,
}

pub struct LayoutArbiter {
    config: DisplayConfig,
}

impl LayoutArbiter {
    pub fn new(config: DisplayConfig) -> Self {
        Self { config }
    }

    /// Clear everything any mode may have set.
    pub fn reset<S: Surface>(&self, surface: &mut S) {
        surface.set_style(
            Element::ScrollViewport,
            &[
                StyleProp::Height(None),
                StyleProp::MaxHeight(None),
                StyleProp::PaddingBottom(None),
            ],
        );
        surface.set_style(Element::SungList, &[StyleProp::PaddingBottom(None)]);
        surface.set_style(
            Element::CurrentSong,
            &[StyleProp::Pinned(false), StyleProp::MarginTop(None)],
        );
        surface.set_style(
            Element::Frame,
            &[
                StyleProp::Height(None),
                StyleProp::MaxHeight(None),
                StyleProp::Display(true),
                StyleProp::ModeClass(None),
            ],
        );
    }

    /// Height limit of the frame for the current surface size. Never
    /// negative: a viewport shorter than the reserved height leaves no room.
    pub fn max_frame_height<S: Surface>(&self, surface: &S) -> f64 {
        self.config
            .max_frame_height
            .unwrap_or_else(|| surface.viewport().height - self.config.frame_reserved_height)
            .max(0.0)
    }

    /// A zero-height surface has not been laid out yet.
    fn is_laid_out<S: Surface>(&self, surface: &S) -> bool {
        self.config.max_frame_height.is_some() || surface.viewport().height > 0.0
    }

    /// Pick and apply a mode. Resets styles first.
    pub fn select_mode<S: Surface>(
        &self,
        surface: &mut S,
        has_sung_songs: bool,
        has_current_song: bool,
    ) -> Decision {
        self.reset(surface);

        if !has_sung_songs {
            let mode = if has_current_song {
                self.apply_only_current(surface);
                DisplayMode::OnlyCurrent
            } else {
                self.apply_empty(surface);
                DisplayMode::Empty
            };
            return Decision {
                mode,
                has_current_song,
                scroll: false,
                geometry: Geometry::default(),
            };
        }

        // 1. Measure (styles are clean, so these are natural heights)
        let list_height = surface
            .measure(Element::SungList)
            .map(|m| m.content_height)
            .unwrap_or(0.0);
        let current_height = surface
            .measure(Element::CurrentSong)
            .map(|m| m.outer_height())
            .unwrap_or(0.0);
        let content_height = list_height + current_height;
        let max_frame_height = self.max_frame_height(surface);

        let mut geometry = Geometry {
            list_height,
            current_height,
            content_height,
            max_frame_height,
            available_height: None,
        };

        // 2. Decide. A zero measurement means "not laid out yet", never overflow.
        let adjusted = content_height + self.config.safety_margin;
        let overflow =
            content_height > 0.0 && self.is_laid_out(surface) && adjusted > max_frame_height;

        let (mode, scroll) = if overflow {
            let scroll = if has_current_song {
                let available = self.apply_fixed_with_current(surface, current_height, max_frame_height);
                geometry.available_height = Some(available);
                let entries = surface.measure_entries();
                self.needs_scroll(list_height, available, &entries)
            } else {
                self.apply_fixed_without_current(surface, max_frame_height);
                true
            };
            (DisplayMode::Fixed, scroll)
        } else {
            self.apply_natural(surface, has_current_song);
            (DisplayMode::Natural, false)
        };

        tracing::debug!(
            ?mode,
            scroll,
            list_height,
            current_height,
            max_frame_height,
            "layout decided"
        );

        Decision {
            mode,
            has_current_song,
            scroll,
            geometry,
        }
    }

    /// Whether a list squeezed above a pinned current song must scroll.
    ///
    /// Both comparisons are strict: landing exactly on the limit does not
    /// scroll. A pinned song that eats the whole frame leaves `available`
    /// at or below zero, and the list still scrolls behind it.
    pub fn needs_scroll(&self, list_height: f64, available: f64, entries: &[EntryBox]) -> bool {
        if list_height <= 0.0 {
            return false;
        }
        if list_height > available - self.config.safety_margin {
            return true;
        }
        entries
            .iter()
            .any(|entry| entry.bottom() + self.config.scroll_visibility_offset > available)
    }

    fn apply_only_current<S: Surface>(&self, surface: &mut S) {
        surface.set_style(
            Element::Frame,
            &[StyleProp::ModeClass(Some(DisplayMode::OnlyCurrent))],
        );
        surface.set_style(
            Element::CurrentSong,
            &[StyleProp::MarginTop(Some(-self.config.only_current_top_margin))],
        );
    }

    fn apply_empty<S: Surface>(&self, surface: &mut S) {
        surface.set_style(
            Element::Frame,
            &[
                StyleProp::Display(false),
                StyleProp::ModeClass(Some(DisplayMode::Empty)),
            ],
        );
    }

    /// Returns the viewport height left above the pinned current song.
    fn apply_fixed_with_current<S: Surface>(
        &self,
        surface: &mut S,
        current_height: f64,
        max_frame_height: f64,
    ) -> f64 {
        let extra = self.config.extra_space_buffer;
        let available = max_frame_height - current_height - extra;

        surface.set_style(
            Element::Frame,
            &[
                StyleProp::Height(Some(Length::Px(max_frame_height))),
                StyleProp::ModeClass(Some(DisplayMode::Fixed)),
            ],
        );
        surface.set_style(Element::CurrentSong, &[StyleProp::Pinned(true)]);
        surface.set_style(
            Element::ScrollViewport,
            &[
                StyleProp::Height(Some(Length::Px(available))),
                StyleProp::MaxHeight(Some(Length::Px(available))),
            ],
        );
        // Room for the pinned song, so the last entries can scroll clear of it
        surface.set_style(
            Element::SungList,
            &[StyleProp::PaddingBottom(Some(current_height + (extra / 2.0).floor()))],
        );
        available
    }

    fn apply_fixed_without_current<S: Surface>(&self, surface: &mut S, max_frame_height: f64) {
        surface.set_style(
            Element::Frame,
            &[
                StyleProp::Height(Some(Length::Px(max_frame_height))),
                StyleProp::ModeClass(Some(DisplayMode::Fixed)),
            ],
        );
        surface.set_style(
            Element::ScrollViewport,
            &[
                StyleProp::Height(Some(Length::Px(max_frame_height))),
                StyleProp::MaxHeight(Some(Length::Px(max_frame_height))),
            ],
        );
        surface.set_style(
            Element::SungList,
            &[StyleProp::PaddingBottom(Some(self.config.safety_margin))],
        );
    }

    fn apply_natural<S: Surface>(&self, surface: &mut S, has_current_song: bool) {
        surface.set_style(
            Element::Frame,
            &[
                StyleProp::Height(Some(Length::Auto)),
                StyleProp::ModeClass(Some(DisplayMode::Natural)),
            ],
        );
        let bottom_padding = if has_current_song {
            0.0
        } else {
            self.config.natural_mode_bottom_padding
        };
        surface.set_style(
            Element::ScrollViewport,
            &[
                StyleProp::Height(Some(Length::Auto)),
                StyleProp::MaxHeight(Some(Length::Unbounded)),
                StyleProp::PaddingBottom(Some(bottom_padding)),
            ],
        );
        surface.set_style(Element::CurrentSong, &[StyleProp::Pinned(false)]);
        surface.set_style(Element::SungList, &[StyleProp::PaddingBottom(Some(0.0))]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::content::{render_current_song, render_song_list};
    use crate::surface::HeadlessSurface;

    fn songs(n: usize) -> String {
        (1..=n).map(|i| format!("Song {i}\n")).collect()
    }

    fn arbiter_with_max(max: f64) -> LayoutArbiter {
        LayoutArbiter::new(DisplayConfig {
            max_frame_height: Some(max),
            ..DisplayConfig::default()
        })
    }

    fn surface_with(sung: &str, current: &str) -> (HeadlessSurface, bool, bool) {
        let mut surface = HeadlessSurface::standard();
        let count = render_song_list(&mut surface, sung);
        let playing = render_current_song(&mut surface, current);
        (surface, count > 0, playing)
    }

    #[test]
    fn test_empty_inputs_hide_frame() {
        let (mut surface, sung, current) = surface_with("", "");
        let decision = LayoutArbiter::new(DisplayConfig::default()).select_mode(&mut surface, sung, current);

        assert_eq!(decision.mode, DisplayMode::Empty);
        assert!(!surface.style(Element::Frame).display);
        assert_eq!(surface.mode(), Some(DisplayMode::Empty));
    }

    #[test]
    fn test_only_current_pulls_song_up() {
        let (mut surface, sung, current) = surface_with("", "Song X");
        let decision = LayoutArbiter::new(DisplayConfig::default()).select_mode(&mut surface, sung, current);

        assert_eq!(decision.mode, DisplayMode::OnlyCurrent);
        assert_eq!(surface.style(Element::CurrentSong).margin_top, Some(-40.0));
        assert!(surface.style(Element::Frame).display);
    }

    #[test]
    fn test_content_free_modes_ignore_heights() {
        // Even an absurdly small frame cannot turn these into Fixed
        for max in [0.0, 10.0, 10_000.0] {
            let arbiter = arbiter_with_max(max);
            let (mut surface, sung, current) = surface_with("", "Song X");
            assert_eq!(arbiter.select_mode(&mut surface, sung, current).mode, DisplayMode::OnlyCurrent);
            let (mut surface, sung, current) = surface_with("", "");
            assert_eq!(arbiter.select_mode(&mut surface, sung, current).mode, DisplayMode::Empty);
        }
    }

    #[test]
    fn test_natural_when_content_plus_margin_fits() {
        // 5 songs * 40 = 200, +80 margin = 280 <= 280
        let arbiter = arbiter_with_max(280.0);
        let (mut surface, sung, current) = surface_with(&songs(5), "");
        let decision = arbiter.select_mode(&mut surface, sung, current);

        assert_eq!(decision.mode, DisplayMode::Natural);
        assert!(!decision.scroll);
        assert_eq!(surface.style(Element::ScrollViewport).padding_bottom, Some(40.0));

        // Same budget with a current song on top: 200 + 60 + 80 = 340
        let arbiter = arbiter_with_max(340.0);
        let (mut surface, sung, current) = surface_with(&songs(5), "Now");
        let decision = arbiter.select_mode(&mut surface, sung, current);
        assert_eq!(decision.mode, DisplayMode::Natural);
        assert_eq!(surface.style(Element::ScrollViewport).padding_bottom, Some(0.0));
        assert!(!surface.style(Element::CurrentSong).pinned);
    }

    #[test]
    fn test_fixed_without_current_always_scrolls() {
        let arbiter = arbiter_with_max(279.0);
        let (mut surface, sung, current) = surface_with(&songs(5), "");
        let decision = arbiter.select_mode(&mut surface, sung, current);

        assert_eq!(decision.mode, DisplayMode::Fixed);
        assert!(decision.scroll);
        assert_eq!(
            surface.style(Element::ScrollViewport).height,
            Some(Length::Px(279.0))
        );
        assert_eq!(surface.style(Element::SungList).padding_bottom, Some(80.0));
    }

    #[test]
    fn test_fixed_with_current_pins_and_shrinks_viewport() {
        let arbiter = arbiter_with_max(500.0);
        let (mut surface, sung, current) = surface_with(&songs(12), "Now");
        let decision = arbiter.select_mode(&mut surface, sung, current);

        assert_eq!(decision.mode, DisplayMode::Fixed);
        // 500 - 60 - 30
        assert_eq!(decision.geometry.available_height, Some(410.0));
        assert!(surface.style(Element::CurrentSong).pinned);
        assert_eq!(
            surface.style(Element::ScrollViewport).max_height,
            Some(Length::Px(410.0))
        );
        // 60 + floor(30 / 2)
        assert_eq!(surface.style(Element::SungList).padding_bottom, Some(75.0));
        assert!(decision.scroll);
    }

    #[test]
    fn test_reset_clears_previous_mode() {
        let arbiter = arbiter_with_max(500.0);
        let (mut surface, sung, current) = surface_with(&songs(12), "Now");
        arbiter.select_mode(&mut surface, sung, current);

        render_song_list(&mut surface, "Only one");
        let decision = arbiter.select_mode(&mut surface, true, true);

        assert_eq!(decision.mode, DisplayMode::Natural);
        assert!(!surface.style(Element::CurrentSong).pinned);
        assert_eq!(surface.style(Element::Frame).height, Some(Length::Auto));
        assert_eq!(surface.mode(), Some(DisplayMode::Natural));
    }

    #[test]
    fn test_zero_measurement_is_not_overflow() {
        // A surface that has not been sized yet
        let arbiter = LayoutArbiter::new(DisplayConfig::default());
        let mut surface = HeadlessSurface::with_size(crate::surface::Size::new(0.0, 0.0));
        render_song_list(&mut surface, &songs(30));
        let decision = arbiter.select_mode(&mut surface, true, false);
        assert_eq!(decision.mode, DisplayMode::Natural);
    }

    #[test]
    fn test_short_viewport_goes_fixed() {
        // 180px tall, less than the 200px reserved: no room for the frame
        let arbiter = LayoutArbiter::new(DisplayConfig::default());
        let mut surface = HeadlessSurface::with_size(crate::surface::Size::new(1280.0, 180.0));
        render_song_list(&mut surface, &songs(5));
        let decision = arbiter.select_mode(&mut surface, true, false);

        assert_eq!(decision.mode, DisplayMode::Fixed);
        assert!(decision.scroll);
        assert_eq!(decision.geometry.max_frame_height, 0.0);
        assert_eq!(surface.style(Element::Frame).height, Some(Length::Px(0.0)));
    }

    #[test]
    fn test_scroll_check_with_no_room_left() {
        let arbiter = LayoutArbiter::new(DisplayConfig::default());
        let none: Vec<EntryBox> = Vec::new();

        assert!(arbiter.needs_scroll(40.0, 0.0, &none));
        assert!(arbiter.needs_scroll(40.0, -25.0, &none));
        assert!(!arbiter.needs_scroll(0.0, -25.0, &none));
    }

    #[test]
    fn test_scroll_check_boundaries_are_strict() {
        let arbiter = LayoutArbiter::new(DisplayConfig::default());
        let none: Vec<EntryBox> = Vec::new();

        // list_height == available - safety_margin: no scroll
        assert!(!arbiter.needs_scroll(320.0, 400.0, &none));
        assert!(arbiter.needs_scroll(320.5, 400.0, &none));

        // entry bottom + visibility offset == available: no scroll
        let flush = [EntryBox { top: 0.0, height: 220.0 }];
        assert!(!arbiter.needs_scroll(220.0, 400.0, &flush));
        let over = [EntryBox { top: 0.0, height: 221.0 }];
        assert!(arbiter.needs_scroll(221.0, 400.0, &over));
    }

    #[test]
    fn test_scroll_check_catches_entries_near_bottom() {
        let arbiter = LayoutArbiter::new(DisplayConfig::default());
        let entries = [
            EntryBox { top: 0.0, height: 40.0 },
            EntryBox { top: 40.0, height: 200.0 },
        ];
        // list 240 < 410 - 80, but 240 + 180 > 410
        assert!(arbiter.needs_scroll(240.0, 410.0, &entries));
    }

    #[test]
    fn test_class_names() {
        assert_eq!(DisplayMode::OnlyCurrent.class_name(), "only-current-mode");
        assert_eq!(DisplayMode::Empty.class_name(), "empty-mode");
    }
}
