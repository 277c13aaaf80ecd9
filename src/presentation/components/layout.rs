use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// A `width` x `height` rectangle centered inside `area`.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(area.width.saturating_sub(width) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1]);
    horizontal[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centers_inside_area() {
        let rect = centered_rect(Rect::new(0, 0, 100, 40), 40, 10);
        assert_eq!(rect, Rect::new(30, 15, 40, 10));
    }

    #[test]
    fn clamps_to_area() {
        let rect = centered_rect(Rect::new(0, 0, 20, 5), 40, 10);
        assert_eq!(rect.width, 20);
        assert_eq!(rect.height, 5);
    }
}
