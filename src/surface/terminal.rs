//! Terminal surface: virtual pixels on a cell grid 🖥️
//!
//! Every cell is `cell_width_px` x `cell_height_px`. Text wraps at any
//! character (the board inserts break opportunities everywhere), measured
//! with `unicode-width` so CJK titles take two columns per glyph.

use unicode_width::UnicodeWidthChar;

use super::boxes::{BoxMetrics, BoxSurface, TextMeasure};
use super::Size;
use crate::app::config::TerminalConfig;
use crate::board::content::{SongEntry, ZERO_WIDTH_SPACE};

/// Columns reserved in front of every list entry (`" 12. "`).
pub const GUTTER_COLS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMeasure {
    pub cell_width_px: f64,
    pub cell_height_px: f64,
}

impl CellMeasure {
    pub fn from_config(config: &TerminalConfig) -> Self {
        Self {
            cell_width_px: config.cell_width_px.max(1.0),
            cell_height_px: config.cell_height_px.max(1.0),
        }
    }

    /// Whole columns that fit in `width_px`.
    pub fn cols(&self, width_px: f64) -> usize {
        (width_px / self.cell_width_px).floor().max(0.0) as usize
    }

    /// Pixel distance to cell rows, rounded to the nearest row.
    pub fn rows(&self, height_px: f64) -> u16 {
        (height_px / self.cell_height_px).round().clamp(0.0, u16::MAX as f64) as u16
    }

    pub fn col_at(&self, x_px: f64) -> u16 {
        (x_px / self.cell_width_px).floor().clamp(0.0, u16::MAX as f64) as u16
    }

    pub fn row_at(&self, y_px: f64) -> u16 {
        (y_px / self.cell_height_px).floor().clamp(0.0, u16::MAX as f64) as u16
    }

    /// Columns left for entry text once the gutter is taken.
    pub fn entry_cols(&self, width_px: f64) -> usize {
        self.cols(width_px).saturating_sub(GUTTER_COLS)
    }
}

impl TextMeasure for CellMeasure {
    fn entry_height(&self, entry: &SongEntry, width: f64) -> f64 {
        let lines = wrap_cells(&entry.text, self.entry_cols(width)).len().max(1);
        lines as f64 * self.cell_height_px
    }

    /// Label row plus the wrapped title.
    fn current_song_height(&self, text: &str, width: f64) -> f64 {
        let lines = wrap_cells(text, self.cols(width)).len().max(1);
        (lines + 1) as f64 * self.cell_height_px
    }
}

/// Character-break wrap by display width. Break opportunities are dropped
/// from the output; a single glyph wider than the line gets a line of its own.
pub fn wrap_cells(text: &str, max_width: usize) -> Vec<String> {
    if text.is_empty() {
        return vec![];
    }
    if max_width == 0 {
        return vec![text.chars().filter(|c| *c != ZERO_WIDTH_SPACE).collect()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for c in text.chars() {
        if c == ZERO_WIDTH_SPACE {
            continue;
        }
        let w = c.width().unwrap_or(0);
        if current_width + w > max_width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }
        current.push(c);
        current_width += w;
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

pub type TerminalSurface = BoxSurface<CellMeasure>;

impl TerminalSurface {
    /// Surface covering a `cols` x `rows` terminal.
    ///
    /// The frame leaves a status row above it and a few columns either side
    /// for the decoration. Inside the frame, three rows sit above the list:
    /// border, heading, divider.
    pub fn for_terminal(cols: u16, rows: u16, config: &TerminalConfig) -> Self {
        let measure = CellMeasure::from_config(config);
        let cw = measure.cell_width_px;
        let ch = measure.cell_height_px;
        let metrics = BoxMetrics {
            frame_top: ch,
            frame_inset_x: 6.0 * cw,
            chrome_top: 3.0 * ch,
            chrome_bottom: ch,
            chrome_x: 4.0 * cw,
            current_margin_top: 0.0,
            current_margin_bottom: 0.0,
        };
        BoxSurface::new(measure, metrics, cells_to_px(&measure, cols, rows))
    }

    pub fn resize_cells(&mut self, cols: u16, rows: u16) {
        let size = cells_to_px(self.text_measure(), cols, rows);
        self.resize(size);
    }
}

fn cells_to_px(measure: &CellMeasure, cols: u16, rows: u16) -> Size {
    Size::new(
        cols as f64 * measure.cell_width_px,
        rows as f64 * measure.cell_height_px,
    )
}
