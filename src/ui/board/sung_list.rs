use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::config::TerminalConfig;
use crate::board::content::SongEntry;
use crate::surface::terminal::{wrap_cells, CellMeasure, GUTTER_COLS};
use crate::surface::TerminalSurface;
use crate::ui::Theme;

/// Entries as styled lines, in the same wrap the surface measured with.
pub fn entry_lines<'a>(entries: &[SongEntry], text_cols: usize, theme: &Theme) -> Vec<Line<'a>> {
    let mut lines = Vec::new();
    for entry in entries {
        let (gutter, text_style) = match entry.number {
            Some(n) => (
                Span::styled(
                    format!("{:>width$}. ", n, width = GUTTER_COLS - 2),
                    Style::default().fg(theme.overlay),
                ),
                Style::default().fg(theme.text),
            ),
            None => (
                Span::styled(
                    format!("{:^width$}", "♪", width = GUTTER_COLS),
                    Style::default().fg(theme.cyan),
                ),
                Style::default()
                    .fg(theme.cyan)
                    .add_modifier(Modifier::ITALIC),
            ),
        };

        let mut wrapped = wrap_cells(&entry.text, text_cols);
        if wrapped.is_empty() {
            wrapped.push(String::new());
        }
        for (i, chunk) in wrapped.into_iter().enumerate() {
            let lead = if i == 0 {
                gutter.clone()
            } else {
                Span::raw(" ".repeat(GUTTER_COLS))
            };
            lines.push(Line::from(vec![lead, Span::styled(chunk, text_style)]));
        }
    }
    lines
}

pub fn render(f: &mut Frame, area: Rect, surface: &TerminalSurface, theme: &Theme, _config: &TerminalConfig) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let measure: &CellMeasure = surface.text_measure();
    let layout = surface.layout();
    let lines = entry_lines(surface.entries(), measure.entry_cols(layout.content_width), theme);

    // Offset is clamped by the surface; the board only ever moves it in px
    let offset_rows = measure.rows(surface.effective_scroll_offset());
    f.render_widget(Paragraph::new(lines).scroll((offset_rows, 0)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::content::parse_sung_songs;

    #[test]
    fn test_numbers_and_wrap() {
        let entries = parse_sung_songs("Alpha\n//Break\nabcdefghij");
        let lines = entry_lines(&entries, 6, &Theme::default());

        let rendered: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
        assert_eq!(
            rendered,
            vec!["  1. Alpha", "  ♪  Break", "  2. abcdef", "     ghij"]
        );
    }
}
