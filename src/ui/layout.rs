//! Layout helpers — split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Profile view on top, one-line status bar at the bottom.
pub struct AppLayout {
    pub profile_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // profile view
                Constraint::Length(1), // status bar
            ])
            .split(area);

        Self {
            profile_area: chunks[0],
            status_area: chunks[1],
        }
    }
}
