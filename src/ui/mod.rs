pub mod board;
pub mod layout;
pub mod theme;
pub mod utils;

pub use theme::Theme;

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::app::config::TerminalConfig;
use crate::board::arbiter::DisplayMode;
use crate::surface::TerminalSurface;

pub fn ui(f: &mut Frame, surface: &TerminalSurface, theme: &Theme, config: &TerminalConfig) {
    let area = f.area();

    // 1. Layout
    let main_layout = layout::get_main_layout(area);
    render_status(f, main_layout.status_area, surface, theme);

    let Some(rects) = layout::get_board_layout(&surface.layout(), surface.text_measure(), area) else {
        // Empty mode: frame hidden
        render_waiting(f, main_layout.body_area, theme);
        return;
    };

    // 2. Frame + list heading
    let accent = theme.mode_accent(surface.mode());
    let title = Line::from(Span::styled(
        utils::truncate(&config.title, rects.frame.width.saturating_sub(4) as usize),
        Style::default().fg(accent).add_modifier(Modifier::BOLD),
    ));
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(title)
        .title_alignment(Alignment::Left)
        .border_style(Style::default().fg(accent));
    let inner = block.inner(rects.frame);
    f.render_widget(block, rects.frame);
    render_heading(f, inner, surface, theme);

    // 3. Sung list, then the current song on top of it
    board::sung_list::render(f, rects.viewport, surface, theme, config);
    if let Some(current) = rects.current {
        board::current_song::render(f, current, surface, theme, config);
    }

    // 4. Decoration last, it overlaps the frame corner
    board::decoration::render(f, area, surface, theme, config);
}

fn render_status(f: &mut Frame, area: Rect, surface: &TerminalSurface, theme: &Theme) {
    let mode = surface
        .mode()
        .map(|m| m.class_name())
        .unwrap_or("starting");
    let hint = Line::from(vec![
        Span::styled(mode, Style::default().fg(theme.overlay)),
        Span::styled(
            "  q ",
            Style::default()
                .fg(theme.overlay)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("quit ", Style::default().fg(theme.overlay)),
    ]);
    f.render_widget(Paragraph::new(hint).alignment(Alignment::Right), area);
}

/// Count line plus a divider, in the two rows the surface reserves above the
/// list.
fn render_heading(f: &mut Frame, inner: Rect, surface: &TerminalSurface, theme: &Theme) {
    if inner.height < 2 || surface.mode() == Some(DisplayMode::OnlyCurrent) {
        return;
    }
    let numbered = surface
        .entries()
        .iter()
        .filter(|e| e.number.is_some())
        .count();
    let heading = vec![
        Line::from(Span::styled(
            format!("{numbered} sung"),
            Style::default().fg(theme.overlay),
        )),
        Line::from(Span::styled(
            "─".repeat(inner.width as usize),
            Style::default().fg(theme.surface),
        )),
    ];
    let area = Rect::new(inner.x, inner.y, inner.width, 2);
    f.render_widget(Paragraph::new(heading), area);
}

fn render_waiting(f: &mut Frame, area: Rect, theme: &Theme) {
    if area.height == 0 {
        return;
    }
    let row = Rect::new(area.x, area.y + area.height / 2, area.width, 1);
    let hint = Paragraph::new(Line::from(Span::styled(
        "waiting for the first song…",
        Style::default()
            .fg(theme.overlay)
            .add_modifier(Modifier::ITALIC),
    )))
    .alignment(Alignment::Center);
    f.render_widget(hint, row);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::content::{render_current_song, render_song_list};
    use crate::board::arbiter::LayoutArbiter;
    use crate::app::config::DisplayConfig;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(surface: &TerminalSurface) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let config = TerminalConfig::default();
        terminal
            .draw(|f| ui(f, surface, &Theme::default(), &config))
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(80)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_renders_numbered_list_and_current_song() {
        let config = TerminalConfig::default();
        let mut surface = TerminalSurface::for_terminal(80, 24, &config);
        render_song_list(&mut surface, "First\n//Break\nSecond");
        render_current_song(&mut surface, "Encore");
        LayoutArbiter::new(DisplayConfig::default()).select_mode(&mut surface, true, true);

        let screen = draw(&surface);
        assert!(screen.contains("1. First"));
        assert!(screen.contains("♪  Break"));
        assert!(screen.contains("2. Second"));
        assert!(screen.contains("♫ now singing"));
        assert!(screen.contains("Encore"));
        assert!(screen.contains("natural-mode"));
    }

    #[test]
    fn test_empty_mode_hides_frame() {
        let config = TerminalConfig::default();
        let mut surface = TerminalSurface::for_terminal(80, 24, &config);
        LayoutArbiter::new(DisplayConfig::default()).select_mode(&mut surface, false, false);

        let screen = draw(&surface);
        assert!(screen.contains("waiting for the first song"));
        assert!(!screen.contains('╭'));
    }
}
