use ratatui::layout::{Constraint, Direction, Layout as RatLayout, Rect};

pub struct Layout {
    pub inner_area: Rect, // Area inside the outer border
    pub input_area: Rect,
    pub list_area: Rect,
    pub status_area: Rect,
}

impl Layout {
    /// Minimum terminal dimensions required for the application
    /// Width: 30 columns keeps one todo row plus its date line readable
    /// Height: 9 lines (2 outer borders + 3 input + 3 list + 1 status)
    pub const MIN_WIDTH: u16 = 30;
    pub const MIN_HEIGHT: u16 = 9;

    pub fn calculate(size: Rect) -> Self {
        let min_width_with_border = Self::MIN_WIDTH + 2;
        let min_height_with_border = Self::MIN_HEIGHT + 2;
        let width = size.width.max(min_width_with_border);
        let height = size.height.max(min_height_with_border);
        let size = Rect::new(size.x, size.y, width, height);

        // Inner area accounts for the outer border (1 char on each side)
        let inner_area = Rect::new(
            size.x + 1,
            size.y + 1,
            size.width.saturating_sub(2),
            size.height.saturating_sub(2),
        );

        // Split vertically: input box (3 lines with borders), list, status (1 line)
        let vertical = RatLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Input
                Constraint::Min(1),    // Todo list
                Constraint::Length(1), // Status
            ])
            .split(inner_area);

        Self {
            inner_area,
            input_area: vertical[0],
            list_area: vertical[1],
            status_area: vertical[2],
        }
    }
}
