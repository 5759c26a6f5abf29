use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Results screen layout
pub struct ResultsLayout {
    pub search_area: Rect,
    pub results_area: Rect,
    pub preview_area: Rect,
    pub status_area: Rect,
}

impl ResultsLayout {
    /// Split the screen into:
    /// - Search box: 3 rows (top)
    /// - Result list: 60% width (left)
    /// - Preview pane: 40% width (right)
    /// - Status bar: bottom row
    pub fn new(area: Rect) -> Self {
        let vertical_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search box
                Constraint::Min(3),    // Main area
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        let horizontal_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(60), // Result list
                Constraint::Percentage(40), // Preview pane
            ])
            .split(vertical_chunks[1]);

        Self {
            search_area: vertical_chunks[0],
            results_area: horizontal_chunks[0],
            preview_area: horizontal_chunks[1],
            status_area: vertical_chunks[2],
        }
    }
}

/// Viewer screen layout
pub struct ViewerLayout {
    pub header_area: Rect,
    pub search_area: Rect,
    pub content_area: Rect,
    pub status_area: Rect,
}

impl ViewerLayout {
    /// Split the screen into:
    /// - Header: 2 rows (title + metadata)
    /// - Find box: 3 rows
    /// - Conversation content: remaining rows
    /// - Status bar: bottom row
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Length(3), // Find box
                Constraint::Min(3),    // Content
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        Self {
            header_area: chunks[0],
            search_area: chunks[1],
            content_area: chunks[2],
            status_area: chunks[3],
        }
    }
}
