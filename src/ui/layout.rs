//! Layout helpers: split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Two side-by-side ring panes above a one-line status bar.
pub struct AppLayout {
    pub left_area: Rect,
    pub right_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // ring panes (take all remaining space)
                Constraint::Length(1), // status bar
            ])
            .split(area);

        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[0]);

        Self {
            left_area: panes[0],
            right_area: panes[1],
            status_area: rows[1],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panes_share_the_width_above_the_status_bar() {
        let layout = AppLayout::from_area(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.status_area, Rect::new(0, 23, 80, 1));
        assert_eq!(layout.left_area.width + layout.right_area.width, 80);
        assert_eq!(layout.left_area.height, 23);
        assert_eq!(layout.right_area.x, layout.left_area.width);
    }
}
