use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

use super::layout::centered_rect;

/// Centered message box used by the welcome and fallback views.
pub fn render_message(frame: &mut Frame<'_>, area: Rect, title: &str, lines: &[&str]) {
    let content_width = lines
        .iter()
        .map(|line| UnicodeWidthStr::width(*line))
        .chain(std::iter::once(UnicodeWidthStr::width(title)))
        .max()
        .unwrap_or(0) as u16;
    let width = content_width.saturating_add(6);
    let height = (lines.len() as u16).saturating_add(4);
    let rect = centered_rect(area, width, height);
    frame.render_widget(Clear, rect);

    let text = lines
        .iter()
        .map(|line| Line::from(line.to_string()))
        .collect::<Vec<_>>();
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(title.to_string())
                .title_style(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
                .borders(Borders::ALL),
        );
    frame.render_widget(widget, rect);
}
