//! Deterministic surface for tests, benches and `--headless-dump`.

use serde::Serialize;

use super::boxes::{BoxLayout, BoxMetrics, BoxSurface, TextMeasure};
use super::{Element, Size};
use crate::board::arbiter::DisplayMode;
use crate::board::content::{SongEntry, ZERO_WIDTH_SPACE};

/// Every visible character is `char_width` wide; wrapped lines are
/// `line_height` tall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedMeasure {
    pub line_height: f64,
    pub current_line_height: f64,
    pub char_width: f64,
    /// Space taken by the number column in front of list entries
    pub number_gutter: f64,
}

impl Default for FixedMeasure {
    fn default() -> Self {
        Self {
            line_height: 40.0,
            current_line_height: 60.0,
            char_width: 20.0,
            number_gutter: 60.0,
        }
    }
}

impl FixedMeasure {
    fn lines(&self, text: &str, width: f64) -> f64 {
        let chars = text.chars().filter(|c| *c != ZERO_WIDTH_SPACE).count();
        let per_line = (width / self.char_width).floor().max(1.0) as usize;
        chars.div_ceil(per_line).max(1) as f64
    }
}

impl TextMeasure for FixedMeasure {
    fn entry_height(&self, entry: &SongEntry, width: f64) -> f64 {
        self.lines(&entry.text, (width - self.number_gutter).max(0.0)) * self.line_height
    }

    fn current_song_height(&self, text: &str, width: f64) -> f64 {
        self.lines(text, (width - self.number_gutter).max(0.0)) * self.current_line_height
    }
}

pub type HeadlessSurface = BoxSurface<FixedMeasure>;

impl HeadlessSurface {
    /// 1280x720 with the default fixture metrics.
    pub fn standard() -> Self {
        Self::with_size(Size::new(1280.0, 720.0))
    }

    pub fn with_size(size: Size) -> Self {
        BoxSurface::new(FixedMeasure::default(), BoxMetrics::default(), size)
    }

    pub fn snapshot(&self) -> SurfaceSnapshot {
        SurfaceSnapshot {
            mode: self.mode(),
            scroll_offset: self.scroll_offset(),
            decoration_visible: self.style(Element::Decoration).visible,
            decoration_offset: self.style(Element::Decoration).offset,
            indicator_visible: self.style(Element::NowPlayingIndicator).visible,
            entries: self
                .entries()
                .iter()
                .map(|e| (e.number, e.plain_text()))
                .collect(),
            layout: self.layout(),
        }
    }
}

/// Serializable picture of a surface, used by `--headless-dump`.
#[derive(Debug, Clone, Serialize)]
pub struct SurfaceSnapshot {
    pub mode: Option<DisplayMode>,
    pub scroll_offset: f64,
    pub decoration_visible: bool,
    pub decoration_offset: Option<(f64, f64)>,
    pub indicator_visible: bool,
    pub entries: Vec<(Option<usize>, String)>,
    pub layout: BoxLayout,
}
