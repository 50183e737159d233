use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main layout structure
pub struct MainLayout {
    pub nav_area: Rect,
    pub content_area: Rect,
    pub status_area: Rect,
    pub keybindings_area: Rect,
}

/// Create the main layout
/// - Top bar: navigation tabs, user and clock (1 row)
/// - Main area: the current view
/// - Status line (1 row)
/// - Bottom bar: keybindings for the current view (1 row)
pub fn create_layout(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Navigation bar
            Constraint::Min(0),    // View content
            Constraint::Length(1), // Status message
            Constraint::Length(1), // Keybindings bar
        ])
        .split(area);

    MainLayout {
        nav_area: chunks[0],
        content_area: chunks[1],
        status_area: chunks[2],
        keybindings_area: chunks[3],
    }
}

/// Split an area into `n` equal columns
pub fn columns(area: Rect, n: u32) -> Vec<Rect> {
    let n = n.max(1);
    let constraints: Vec<Constraint> = (0..n).map(|_| Constraint::Ratio(1, n)).collect();
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area)
        .to_vec()
}

/// Create a centered modal area with a fixed height
pub fn create_modal_area(area: Rect, height: u16) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_layout() {
        let area = Rect::new(0, 0, 100, 50);
        let layout = create_layout(area);

        assert_eq!(layout.nav_area.height, 1);
        assert_eq!(layout.status_area.height, 1);
        assert_eq!(layout.keybindings_area.height, 1);
        assert_eq!(layout.content_area.height, 47);
        assert_eq!(layout.keybindings_area.y, 49);
    }

    #[test]
    fn test_columns() {
        let cols = columns(Rect::new(0, 0, 100, 20), 4);
        assert_eq!(cols.len(), 4);
        assert_eq!(cols.iter().map(|c| c.width).sum::<u16>(), 100);
        assert!(cols.iter().all(|c| c.height == 20));
    }

    #[test]
    fn test_create_modal_area() {
        let area = Rect::new(0, 0, 100, 50);
        let modal = create_modal_area(area, 16);

        assert!(modal.width < area.width);
        assert_eq!(modal.height, 16);
    }
}
