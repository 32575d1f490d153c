use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

use crate::app::config::TerminalConfig;
use crate::surface::terminal::wrap_cells;
use crate::surface::{Element, TerminalSurface};
use crate::ui::Theme;

/// "Now singing" slot: a label row, then the wrapped title 🎤
pub fn render(f: &mut Frame, area: Rect, surface: &TerminalSurface, theme: &Theme, config: &TerminalConfig) {
    let Some(title) = surface.current_song() else {
        return;
    };
    let measure = surface.text_measure();
    let cols = measure.cols(surface.layout().content_width);

    // Surfaces without an indicator just show a plain label
    let indicator_on = surface.style(Element::NowPlayingIndicator).visible;
    let label_style = if indicator_on {
        Style::default()
            .fg(theme.yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.overlay)
    };

    let mut lines = vec![Line::from(Span::styled(
        config.now_singing_label.clone(),
        label_style,
    ))];
    lines.extend(wrap_cells(title, cols).into_iter().map(|chunk| {
        Line::from(Span::styled(
            chunk,
            Style::default()
                .fg(theme.text)
                .add_modifier(Modifier::BOLD),
        ))
    }));

    // May sit over the list heading (pulled up when nothing is sung)
    f.render_widget(Clear, area);
    f.render_widget(Paragraph::new(lines), area);
}
