use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState},
};

/// Quick-access list of every registered schema.
pub fn render_schema_panel(frame: &mut Frame<'_>, area: Rect, names: &[String], current: Option<usize>) {
    let items = names
        .iter()
        .map(|name| ListItem::new(name.clone()))
        .collect::<Vec<_>>();
    let mut state = ListState::default();
    state.select(current.filter(|index| *index < names.len()));

    let list = List::new(items)
        .block(Block::default().title("Schemas").borders(Borders::ALL))
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");
    frame.render_stateful_widget(list, area, &mut state);
}

/// Column width needed to show the longest schema name.
pub fn panel_width(names: &[String]) -> u16 {
    let longest = names
        .iter()
        .map(|name| unicode_width::UnicodeWidthStr::width(name.as_str()))
        .max()
        .unwrap_or(0);
    (longest as u16).saturating_add(6).clamp(14, 32)
}
