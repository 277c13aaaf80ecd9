use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub fn render_header(frame: &mut Frame<'_>, area: Rect, title: &str, screen: Option<&str>, dirty: bool) {
    let mut spans = vec![Span::styled(
        title.to_string(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(screen) = screen {
        spans.push(Span::styled(" / ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(
            screen.to_string(),
            Style::default().fg(Color::Yellow),
        ));
    }
    if dirty {
        spans.push(Span::styled(" [modified]", Style::default().fg(Color::Red)));
    }
    let widget = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(widget, area);
}
