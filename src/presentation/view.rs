use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use super::components::{
    FormView, panel_width, render_fields, render_footer, render_header, render_message,
    render_schema_panel,
};
use super::widgets::FieldWidget;

const WELCOME_LINES: [&str; 3] = [
    "Edit the bot configuration one schema at a time.",
    "Ctrl+N / Ctrl+P switch schema, Ctrl+S saves, Ctrl+Q quits.",
    "Press Enter to start.",
];
const FALLBACK_LINES: [&str; 2] = [
    "No configuration schema is registered.",
    "Press Ctrl+Q to quit.",
];

/// What the main area shows.
pub enum ViewKind<'a> {
    Welcome,
    Form {
        title: &'a str,
        doc: Option<&'a str>,
        widgets: &'a [FieldWidget],
        focus: usize,
        selected_item: Option<usize>,
    },
    /// The current schema cannot be turned into a form.
    Broken { message: &'a str },
    Fallback,
}

pub struct UiContext<'a> {
    pub title: &'a str,
    pub schemas: &'a [String],
    pub current: Option<usize>,
    pub view: ViewKind<'a>,
    pub status_message: &'a str,
    pub notice: Option<&'a str>,
    pub dirty: bool,
    pub error_count: usize,
    pub help: Option<&'a str>,
}

pub fn draw(frame: &mut Frame<'_>, ctx: UiContext<'_>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let screen = ctx
        .current
        .and_then(|index| ctx.schemas.get(index))
        .map(String::as_str);
    render_header(frame, rows[0], ctx.title, screen, ctx.dirty);

    let body = if ctx.schemas.is_empty() {
        rows[1]
    } else {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(panel_width(ctx.schemas)),
                Constraint::Min(10),
            ])
            .split(rows[1]);
        render_schema_panel(frame, columns[0], ctx.schemas, ctx.current);
        columns[1]
    };

    match &ctx.view {
        ViewKind::Welcome => render_message(frame, body, "Welcome", &WELCOME_LINES),
        ViewKind::Form {
            title,
            doc,
            widgets,
            focus,
            selected_item,
        } => render_fields(
            frame,
            body,
            &FormView {
                title: *title,
                doc: *doc,
                widgets: *widgets,
                focus: *focus,
                selected_item: *selected_item,
            },
        ),
        ViewKind::Broken { message } => render_message(
            frame,
            body,
            "Schema unavailable",
            &[*message, "Ctrl+N / Ctrl+P to switch"],
        ),
        ViewKind::Fallback => render_message(frame, body, "Nothing to edit", &FALLBACK_LINES),
    }

    render_footer(frame, rows[2], &ctx);
}
