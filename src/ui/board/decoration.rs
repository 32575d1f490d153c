use ratatui::{
    layout::Rect,
    style::Style,
    text::Span,
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::config::TerminalConfig;
use crate::surface::{Element, TerminalSurface};
use crate::ui::Theme;

/// Cell where the decoration glyph starts, if it is visible and fits.
pub fn anchor(surface: &TerminalSurface, glyph: &str, area: Rect) -> Option<Rect> {
    let style = surface.style(Element::Decoration);
    let (right, top) = style.offset?;
    if !style.visible || glyph.is_empty() {
        return None;
    }

    let measure = surface.text_measure();
    let edge_px = surface.layout().container.right - right;
    let width = glyph.width() as u16;
    let x = measure.col_at(edge_px).checked_sub(width)?;
    let y = measure.row_at(top);

    let cell = Rect::new(x, y, width, 1);
    (cell.intersection(area) == cell).then_some(cell)
}

pub fn render(f: &mut Frame, area: Rect, surface: &TerminalSurface, theme: &Theme, config: &TerminalConfig) {
    if let Some(cell) = anchor(surface, &config.decoration_glyph, area) {
        let glyph = Span::styled(config.decoration_glyph.clone(), Style::default().fg(theme.magenta));
        f.render_widget(Paragraph::new(glyph), cell);
    }
}
