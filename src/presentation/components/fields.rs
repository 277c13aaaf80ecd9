use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

use crate::form::{Description, Emphasis};

use super::super::widgets::FieldWidget;

pub struct FormView<'a> {
    pub title: &'a str,
    pub doc: Option<&'a str>,
    pub widgets: &'a [FieldWidget],
    pub focus: usize,
    pub selected_item: Option<usize>,
}

pub fn render_fields(frame: &mut Frame<'_>, area: Rect, view: &FormView<'_>) {
    let mut field_area = area;
    if let Some(doc) = view.doc.filter(|doc| !doc.is_empty()) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(2)])
            .split(area);
        let details = Paragraph::new(doc.to_string())
            .wrap(Wrap { trim: true })
            .block(Block::default().title("About").borders(Borders::ALL));
        frame.render_widget(details, chunks[0]);
        field_area = chunks[1];
    }

    if view.widgets.is_empty() {
        let placeholder = Paragraph::new("This schema has no fields").block(
            Block::default()
                .title(view.title.to_string())
                .borders(Borders::ALL),
        );
        frame.render_widget(placeholder, field_area);
        return;
    }

    let content_width = field_area.width.saturating_sub(6);
    let selected_index = view.focus.min(view.widgets.len() - 1);
    let mut items = Vec::with_capacity(view.widgets.len());
    let mut cursor_hint: Option<CursorHint> = None;
    let mut line_offset = 0usize;

    for (idx, widget) in view.widgets.iter().enumerate() {
        let is_selected = idx == selected_index;
        let selected_item = if is_selected { view.selected_item } else { None };
        let render = build_field_render(widget, is_selected, selected_item, content_width);
        if cursor_hint.is_none()
            && let Some(mut hint) = render.cursor_hint
        {
            hint.line_offset += line_offset;
            cursor_hint = Some(hint);
        }
        if idx < selected_index {
            line_offset += render.lines.len();
        }
        items.push(ListItem::new(render.lines));
    }

    let mut list_state = ListState::default();
    list_state.select(Some(selected_index));

    let list = List::new(items)
        .block(
            Block::default()
                .title(view.title.to_string())
                .borders(Borders::ALL),
        )
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("» ");

    frame.render_stateful_widget(list, field_area, &mut list_state);

    // Only place the cursor when the focused field starts on the first page.
    if let Some(cursor) = cursor_hint
        && list_state.offset() == 0
    {
        let max_line = field_area.height.saturating_sub(2) as usize;
        if cursor.line_offset < max_line {
            let cursor_y = field_area.y + 1 + cursor.line_offset as u16;
            let cursor_x = field_area
                .x
                .saturating_add(1)
                .saturating_add(2)
                .saturating_add(cursor.column_offset)
                .saturating_add(cursor.value_width);
            frame.set_cursor_position((cursor_x, cursor_y));
        }
    }
}

struct FieldRender {
    lines: Vec<Line<'static>>,
    cursor_hint: Option<CursorHint>,
}

struct CursorHint {
    line_offset: usize,
    column_offset: u16,
    value_width: u16,
}

fn build_field_render(
    widget: &FieldWidget,
    is_selected: bool,
    selected_item: Option<usize>,
    max_width: u16,
) -> FieldRender {
    let mut lines = Vec::new();
    let label_style = if is_selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    };
    lines.push(Line::from(Span::styled(widget.label.clone(), label_style)));

    let (value_panel, cursor_hint) = value_panel_lines(widget, is_selected, max_width);
    lines.extend(value_panel);
    lines.extend(item_lines(widget, selected_item));
    lines.extend(description_lines(&widget.description));

    if let Some(error) = error_lines(widget, max_width) {
        lines.extend(error);
    }

    FieldRender { lines, cursor_hint }
}

fn value_panel_lines(
    widget: &FieldWidget,
    is_selected: bool,
    max_width: u16,
) -> (Vec<Line<'static>>, Option<CursorHint>) {
    let clamp_width = max_width.max(4) as usize;
    let value_style = if widget.shows_placeholder() {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC)
    } else {
        Style::default().fg(Color::White)
    };
    let mut wrapped_value: Vec<String> = wrap(widget.shown_input(), clamp_width)
        .into_iter()
        .map(|segment| segment.into_owned())
        .collect();
    if wrapped_value.is_empty() {
        wrapped_value.push(String::new());
    }
    let add_button = if widget.has_add_button() { " [+]" } else { "" };

    if !is_selected {
        let last = wrapped_value.len() - 1;
        let lines = wrapped_value
            .into_iter()
            .enumerate()
            .map(|(idx, segment)| {
                let mut spans = vec![Span::raw("  "), Span::styled(segment, value_style)];
                if idx == last && !add_button.is_empty() {
                    spans.push(Span::styled(add_button, Style::default().fg(Color::Green)));
                }
                Line::from(spans)
            })
            .collect();
        return (lines, None);
    }

    let inner_width = wrapped_value
        .iter()
        .map(|line| UnicodeWidthStr::width(line.as_str()))
        .max()
        .unwrap_or(0);
    let border_line = "─".repeat(inner_width.saturating_add(2));
    let border_style = Style::default().fg(Color::Yellow);
    let mut lines = vec![Line::from(Span::styled(
        format!("┌{border_line}┐"),
        border_style,
    ))];
    let value_line_index = lines.len() + wrapped_value.len() - 1;
    let last = wrapped_value.len() - 1;
    for (idx, segment) in wrapped_value.iter().enumerate() {
        let width = UnicodeWidthStr::width(segment.as_str());
        let padding = " ".repeat(inner_width - width);
        let mut spans = vec![
            Span::styled("│ ", border_style),
            Span::styled(format!("{segment}{padding}"), value_style.add_modifier(Modifier::BOLD)),
            Span::styled(" │", border_style),
        ];
        if idx == last && !add_button.is_empty() {
            spans.push(Span::styled(
                add_button,
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        lines.push(Line::from(spans));
    }
    lines.push(Line::from(Span::styled(
        format!("└{border_line}┘"),
        border_style,
    )));

    // Typing starts at column 0 while the placeholder is displayed.
    let value_width = if widget.shows_placeholder() {
        0
    } else {
        wrapped_value
            .last()
            .map(|line| UnicodeWidthStr::width(line.as_str()))
            .unwrap_or(0) as u16
    };
    let cursor_hint = CursorHint {
        line_offset: value_line_index,
        column_offset: 0,
        value_width,
    };
    (lines, Some(cursor_hint))
}

fn item_lines(widget: &FieldWidget, selected_item: Option<usize>) -> Vec<Line<'static>> {
    widget
        .items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let selected = selected_item == Some(idx);
            let marker = if selected { "›" } else { " " };
            let value_style = if selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(vec![
                Span::raw(format!("  {marker} ")),
                Span::styled(item.value.clone(), value_style),
                Span::raw(" "),
                Span::styled(item.remove_label(), Style::default().fg(Color::Red)),
            ])
        })
        .collect()
}

fn segment_style(emphasis: Emphasis) -> Style {
    match emphasis {
        Emphasis::Plain => Style::default().fg(Color::Gray),
        Emphasis::Required => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        Emphasis::TypeHint => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    }
}

fn description_lines(description: &Description) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut current = vec![Span::raw("  ")];
    for segment in &description.segments {
        let style = segment_style(segment.emphasis);
        let mut parts = segment.text.split('\n').peekable();
        while let Some(part) = parts.next() {
            if !part.is_empty() {
                current.push(Span::styled(part.to_string(), style));
            }
            if parts.peek().is_some() {
                lines.push(Line::from(std::mem::replace(
                    &mut current,
                    vec![Span::raw("  ")],
                )));
            }
        }
    }
    lines.push(Line::from(current));
    lines
}

fn error_lines(widget: &FieldWidget, max_width: u16) -> Option<Vec<Line<'static>>> {
    widget.error.as_ref().map(|message| {
        let mut lines = vec![Line::from(Span::styled(
            "  Error:",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))];
        for line in wrap(message, max_width.max(8) as usize) {
            lines.push(Line::from(Span::styled(
                format!("    {}", line.into_owned()),
                Style::default().fg(Color::Red),
            )));
        }
        lines
    })
}
