//! Terminal-independent description of what a form screen shows.

use crate::app::Screen;
use crate::form::{Description, EditorKind, FormModel, FormSession};

/// A committed list item together with its remove control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemWidget {
    pub position: usize,
    pub value: String,
}

impl ItemWidget {
    pub fn remove_label(&self) -> &'static str {
        "[-]"
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldWidget {
    pub name: String,
    pub label: String,
    /// Current working text of the input box (pending text for list fields).
    pub input: String,
    pub placeholder: String,
    pub description: Description,
    pub editor: EditorKind,
    pub items: Vec<ItemWidget>,
    pub error: Option<String>,
}

impl FieldWidget {
    pub fn has_add_button(&self) -> bool {
        self.editor == EditorKind::Multi
    }

    pub fn shows_placeholder(&self) -> bool {
        self.input.is_empty()
    }

    /// Text drawn inside the input box.
    pub fn shown_input(&self) -> &str {
        if self.input.is_empty() {
            &self.placeholder
        } else {
            &self.input
        }
    }
}

/// One widget per model entry, in declaration order, reflecting the session's working state.
pub fn render(model: &FormModel, session: &FormSession) -> Vec<FieldWidget> {
    model
        .entries()
        .iter()
        .map(|entry| {
            let (input, items) = match entry.editor {
                EditorKind::Single => (
                    session.value(entry.name()).unwrap_or_default().to_string(),
                    Vec::new(),
                ),
                EditorKind::Multi => match session.list(entry.name()) {
                    Some(list) => (
                        list.pending().to_string(),
                        list.items()
                            .iter()
                            .map(|item| ItemWidget {
                                position: item.position,
                                value: item.value.clone(),
                            })
                            .collect(),
                    ),
                    None => (String::new(), Vec::new()),
                },
            };
            FieldWidget {
                name: entry.name().to_string(),
                label: entry.label.clone(),
                input,
                placeholder: entry.placeholder.clone(),
                description: entry.description.clone(),
                editor: entry.editor,
                items,
                error: None,
            }
        })
        .collect()
}

/// Like [`render`], with the errors of the screen's last rejected save attached.
pub fn render_screen(screen: &Screen) -> Vec<FieldWidget> {
    let mut widgets = render(screen.model(), screen.session());
    for widget in &mut widgets {
        widget.error = screen.field_error(&widget.name).map(str::to_string);
    }
    widgets
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::{eric_config, mysql_config};
    use crate::form::Emphasis;

    fn session_for(model: FormModel) -> (Arc<FormModel>, FormSession) {
        let model = Arc::new(model);
        let session = FormSession::new(Arc::clone(&model));
        (model, session)
    }

    #[test]
    fn fresh_session_shows_placeholders() {
        let (model, session) = session_for(FormModel::build(&mysql_config()).unwrap());
        let widgets = render(&model, &session);
        let pool = widgets.iter().find(|w| w.name == "pool_size").unwrap();
        assert_eq!(pool.shown_input(), "40");
        assert!(pool.shows_placeholder());
        assert!(!pool.has_add_button());
    }

    #[test]
    fn list_field_lists_items_with_positions() {
        let (model, mut session) = session_for(FormModel::build(&eric_config()).unwrap());
        for account in ["1", "2", "3"] {
            session.set_pending("accounts", account).unwrap();
            session.add_item("accounts").unwrap();
        }
        session.remove_item("accounts", 2).unwrap();
        session.set_pending("accounts", "9").unwrap();

        let widgets = render(&model, &session);
        let accounts = widgets.iter().find(|w| w.name == "accounts").unwrap();
        assert!(accounts.has_add_button());
        assert_eq!(accounts.input, "9");
        let positions = accounts.items.iter().map(|i| i.position).collect::<Vec<_>>();
        assert_eq!(positions, vec![1, 3]);
    }

    #[test]
    fn required_description_carries_marker() {
        let (model, session) = session_for(FormModel::build(&eric_config()).unwrap());
        let widgets = render(&model, &session);
        let name = &widgets[0];
        assert_eq!(name.description.segments[0].emphasis, Emphasis::Required);
        assert!(name.error.is_none());
    }
}
