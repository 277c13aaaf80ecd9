use std::time::Instant;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use tracing::{error, info};

use crate::{
    form::{EditorKind, FormEvent, SessionError},
    presentation::{self, UiContext, ViewKind, render_screen},
    store::ConfigStore,
};

use super::{
    input::{KeyCommand, classify, edit_buffer},
    options::UiOptions,
    registry::{RegistryError, Screen, ScreenRegistry},
    status::StatusLine,
    terminal::TerminalSession,
    validation::{SaveOutcome, save_current},
};

const HELP_TEXT: &str = "Tab/↑↓ field • Enter add/next • ←/→ item • Del remove • Ctrl+N/P schema • Ctrl+W discard • Ctrl+S save • Ctrl+Q quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Welcome,
    Schema,
    Fallback,
}

/// The focused field of the current screen.
struct FocusedField {
    name: String,
    editor: EditorKind,
}

pub(crate) struct App {
    registry: ScreenRegistry,
    store: Box<dyn ConfigStore>,
    options: UiOptions,
    status: StatusLine,
    view: View,
    focus: usize,
    selected_item: Option<usize>,
    broken: Option<String>,
    exit_armed: bool,
    should_quit: bool,
    saved: Vec<String>,
}

impl App {
    pub fn new(registry: ScreenRegistry, store: Box<dyn ConfigStore>, options: UiOptions) -> Self {
        let status = StatusLine::new(options.notice_duration);
        let mut app = Self {
            registry,
            store,
            options,
            status,
            view: View::Welcome,
            focus: 0,
            selected_item: None,
            broken: None,
            exit_armed: false,
            should_quit: false,
            saved: Vec::new(),
        };
        if app.registry.is_empty() {
            app.view = View::Fallback;
        } else if !app.options.show_welcome {
            app.enter_current();
        }
        app
    }

    /// Drive the terminal until the user quits. Returns each schema saved along the way, once.
    pub fn run(&mut self) -> Result<Vec<String>> {
        info!(event = "app.run.started", schemas = self.registry.len());
        let mut terminal = TerminalSession::enter()?;
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            if event::poll(self.options.tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key),
                    Event::Resize(_, _) => {}
                    Event::Mouse(_) => {}
                    Event::FocusGained | Event::FocusLost | Event::Paste(_) => {}
                }
            }
            self.status.tick(Instant::now());
        }
        info!(event = "app.run.finished", saved = self.saved.len());
        Ok(std::mem::take(&mut self.saved))
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let schemas = self.registry.names().map(str::to_string).collect::<Vec<_>>();
        let current = self
            .registry
            .current_name()
            .and_then(|name| schemas.iter().position(|schema| schema == name));
        let screen = self.current_screen();
        let widgets = screen.map(render_screen).unwrap_or_default();

        let view = match self.view {
            View::Welcome => ViewKind::Welcome,
            View::Fallback => ViewKind::Fallback,
            View::Schema => match (&self.broken, screen) {
                (Some(message), _) => ViewKind::Broken {
                    message: message.as_str(),
                },
                (None, Some(screen)) => ViewKind::Form {
                    title: screen.model().schema_name(),
                    doc: screen.model().doc(),
                    widgets: &widgets,
                    focus: self.focus,
                    selected_item: self.selected_item,
                },
                (None, None) => ViewKind::Fallback,
            },
        };
        let help = if self.options.show_help {
            Some(HELP_TEXT)
        } else {
            None
        };

        presentation::draw(
            frame,
            UiContext {
                title: &self.options.title,
                schemas: &schemas,
                current,
                view,
                status_message: self.status.message(),
                notice: self.status.notice(),
                dirty: screen.is_some_and(|screen| screen.session().is_dirty()),
                error_count: screen.map(Screen::error_count).unwrap_or(0),
                help,
            },
        );
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let command = classify(&key);
        if command == KeyCommand::Quit {
            self.on_exit();
            return;
        }
        if command != KeyCommand::None {
            self.exit_armed = false;
        }

        match self.view {
            View::Fallback => {}
            View::Welcome => match command {
                KeyCommand::Submit | KeyCommand::SwitchSchema(1) => {
                    self.registry.advance();
                    self.enter_current();
                }
                KeyCommand::SwitchSchema(_) => {
                    self.registry.retreat();
                    self.enter_current();
                }
                _ => {}
            },
            View::Schema => self.handle_schema_command(command),
        }
    }

    fn handle_schema_command(&mut self, command: KeyCommand) {
        match command {
            KeyCommand::Save => self.on_save(),
            KeyCommand::SwitchSchema(delta) => {
                if delta >= 0 {
                    self.registry.advance();
                } else {
                    self.registry.retreat();
                }
                self.enter_current();
                self.status.ready();
            }
            KeyCommand::CloseScreen => {
                self.registry.close_current();
                self.enter_current();
                self.status.set_raw("Changes discarded");
            }
            KeyCommand::NextField => self.move_focus(1),
            KeyCommand::PrevField => self.move_focus(-1),
            KeyCommand::SelectItem(delta) => self.select_item(delta),
            KeyCommand::RemoveItem => self.remove_selected_item(),
            KeyCommand::Submit => self.submit(),
            KeyCommand::ResetStatus => {
                self.status.dismiss_notice();
                self.status.ready();
            }
            KeyCommand::Edit(key) => self.edit_focused(&key),
            KeyCommand::Quit | KeyCommand::None => {}
        }
    }

    fn enter_current(&mut self) {
        self.focus = 0;
        self.selected_item = None;
        self.broken = None;
        match self.registry.open_current(self.store.as_ref()) {
            Ok(_) => self.view = View::Schema,
            Err(RegistryError::Empty) => self.view = View::Fallback,
            Err(err) => {
                self.broken = Some(err.to_string());
                self.view = View::Schema;
            }
        }
    }

    fn current_screen(&self) -> Option<&Screen> {
        if self.broken.is_some() {
            return None;
        }
        self.registry.current_screen()
    }

    fn focused_field(&self) -> Option<FocusedField> {
        let entry = self.current_screen()?.model().entries().get(self.focus)?;
        Some(FocusedField {
            name: entry.name().to_string(),
            editor: entry.editor,
        })
    }

    fn move_focus(&mut self, delta: isize) {
        let Some(count) = self.current_screen().map(|screen| screen.model().len()) else {
            return;
        };
        if count == 0 {
            return;
        }
        self.focus = (self.focus as isize + delta).rem_euclid(count as isize) as usize;
        self.selected_item = None;
    }

    fn item_count(&self, field: &str) -> usize {
        self.current_screen()
            .and_then(|screen| screen.session().list(field))
            .map(|list| list.items().len())
            .unwrap_or(0)
    }

    fn select_item(&mut self, delta: i32) {
        let Some(field) = self.focused_field() else {
            return;
        };
        if field.editor != EditorKind::Multi {
            return;
        }
        let count = self.item_count(&field.name) as i32;
        if count == 0 {
            self.selected_item = None;
            return;
        }
        let next = match self.selected_item {
            None if delta >= 0 => 0,
            None => count - 1,
            Some(index) => (index as i32 + delta).rem_euclid(count),
        };
        self.selected_item = Some(next as usize);
    }

    fn remove_selected_item(&mut self) {
        let (Some(field), Some(index)) = (self.focused_field(), self.selected_item) else {
            return;
        };
        let Some(screen) = self.registry.current_screen_mut() else {
            return;
        };
        let Some(position) = screen
            .session()
            .list(&field.name)
            .and_then(|list| list.items().get(index))
            .map(|item| item.position)
        else {
            return;
        };
        let event = FormEvent::RemoveItem {
            field: field.name.clone(),
            position,
        };
        if screen.session_mut().apply(event).is_ok() {
            screen.clear_error(&field.name);
        }
        let remaining = self.item_count(&field.name);
        self.selected_item = if remaining == 0 {
            None
        } else {
            Some(index.min(remaining - 1))
        };
    }

    fn submit(&mut self) {
        let Some(field) = self.focused_field() else {
            return;
        };
        if field.editor == EditorKind::Single {
            self.move_focus(1);
            return;
        }
        let Some(screen) = self.registry.current_screen_mut() else {
            return;
        };
        let event = FormEvent::AddItem {
            field: field.name.clone(),
        };
        match screen.session_mut().apply(event) {
            Ok(_) => {
                screen.clear_error(&field.name);
                self.selected_item = None;
                self.status.editing(&field.name);
            }
            Err(err @ SessionError::EmptyInput { .. }) => self.status.notify(err.to_string()),
            Err(err) => self.status.set_raw(err.to_string()),
        }
    }

    fn edit_focused(&mut self, key: &KeyEvent) {
        let Some(field) = self.focused_field() else {
            return;
        };
        let Some(screen) = self.registry.current_screen_mut() else {
            return;
        };
        let session = screen.session();
        let mut buffer = match field.editor {
            EditorKind::Single => session.value(&field.name).unwrap_or_default().to_string(),
            EditorKind::Multi => session
                .list(&field.name)
                .map(|list| list.pending().to_string())
                .unwrap_or_default(),
        };
        if !edit_buffer(&mut buffer, key) {
            return;
        }
        let event = match field.editor {
            EditorKind::Single => FormEvent::SetValue {
                field: field.name.clone(),
                raw: buffer,
            },
            EditorKind::Multi => FormEvent::SetPending {
                field: field.name.clone(),
                raw: buffer,
            },
        };
        match screen.session_mut().apply(event) {
            Ok(_) => {
                screen.clear_error(&field.name);
                self.status.editing(&field.name);
            }
            Err(err) => self.status.set_raw(err.to_string()),
        }
    }

    fn on_save(&mut self) {
        match save_current(&mut self.registry, self.store.as_mut()) {
            Ok(SaveOutcome::Saved { schema, .. }) => {
                self.status.saved(&schema);
                if !self.saved.contains(&schema) {
                    self.saved.push(schema);
                }
            }
            Ok(SaveOutcome::Rejected { issues, .. }) => {
                self.status.issues_remaining(issues);
                if let Some(index) = self.first_error_index() {
                    self.focus = index;
                    self.selected_item = None;
                }
            }
            Err(err) => {
                error!(event = "app.save.failed", error = %format!("{err:#}"));
                self.status.set_raw(format!("Save failed: {err:#}"));
            }
        }
    }

    fn first_error_index(&self) -> Option<usize> {
        let screen = self.current_screen()?;
        screen
            .model()
            .entries()
            .iter()
            .position(|entry| screen.field_error(entry.name()).is_some())
    }

    fn on_exit(&mut self) {
        let dirty = !self.registry.dirty_screens().is_empty();
        if self.options.confirm_exit && dirty && !self.exit_armed {
            self.exit_armed = true;
            self.status.pending_exit();
            return;
        }
        self.should_quit = true;
    }
}
