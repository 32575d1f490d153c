use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::surface::terminal::CellMeasure;
use crate::surface::BoxLayout;

pub struct MainLayout {
    pub status_area: Rect,
    pub body_area: Rect,
}

pub fn get_main_layout(area: Rect) -> MainLayout {
    // The surface keeps the first row free for this (frame_top is one cell)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Status
            Constraint::Min(0),    // Board
        ])
        .split(area);

    MainLayout {
        status_area: chunks[0],
        body_area: chunks[1],
    }
}

/// Cell rects for one frame of the board, clipped to the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    pub frame: Rect,
    pub viewport: Rect,
    pub current: Option<Rect>,
}

/// Map surface pixels onto the cell grid. `None` when the frame is hidden.
pub fn get_board_layout(layout: &BoxLayout, measure: &CellMeasure, area: Rect) -> Option<BoardLayout> {
    if !layout.frame_displayed {
        return None;
    }
    let current = layout
        .current_displayed
        .then(|| to_cells(&layout.current, measure, area))
        .filter(|r| r.height > 0);

    Some(BoardLayout {
        frame: to_cells(&layout.frame, measure, area),
        viewport: to_cells(&layout.viewport, measure, area),
        current,
    })
}

pub fn to_cells(rect: &crate::surface::Rect, measure: &CellMeasure, area: Rect) -> Rect {
    let x = measure.col_at(rect.left);
    let y = measure.row_at(rect.top);
    let width = measure.cols(rect.width()).min(u16::MAX as usize) as u16;
    let height = measure.rows(rect.height());
    Rect::new(x, y, width, height).intersection(area)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_cells_clips_to_area() {
        let measure = CellMeasure {
            cell_width_px: 10.0,
            cell_height_px: 20.0,
        };
        let area = Rect::new(0, 0, 80, 24);

        let inside = crate::surface::Rect::new(60.0, 20.0, 740.0, 140.0);
        assert_eq!(to_cells(&inside, &measure, area), Rect::new(6, 1, 68, 6));

        let tall = crate::surface::Rect::new(0.0, 400.0, 100.0, 900.0);
        assert_eq!(to_cells(&tall, &measure, area), Rect::new(0, 20, 10, 4));
    }
}
