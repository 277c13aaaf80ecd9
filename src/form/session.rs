use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use crate::domain::{FieldDescriptor, FieldKind, ScalarKind, TypedValue, ValueMap};

use super::coerce::convert;
use super::entry::{EditorKind, FormEntry};
use super::error::{CommitError, CommitFailure, CoercionError, FieldFailure, SessionError};
use super::model::FormModel;

/// A discrete edit delivered by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    SetValue { field: String, raw: String },
    SetPending { field: String, raw: String },
    AddItem { field: String },
    RemoveItem { field: String, position: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Updated,
    ItemAdded { position: usize },
    ItemRemoved { position: usize },
    Unchanged,
}

/// One committed item of a multi-value field, addressed by its session position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub position: usize,
    pub value: String,
}

/// Working state of a multi-value field.
///
/// Positions start at 1 and are never reused within a session, so removing an item
/// leaves the remaining ones addressable by their original positions.
#[derive(Debug, Clone)]
pub struct ListEdit {
    items: Vec<ListItem>,
    pending: String,
    next_position: usize,
    touched: bool,
}

impl Default for ListEdit {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            pending: String::new(),
            next_position: 1,
            touched: false,
        }
    }
}

impl ListEdit {
    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    pub fn pending(&self) -> &str {
        &self.pending
    }

    pub fn next_position(&self) -> usize {
        self.next_position
    }

    fn push(&mut self, value: String) -> usize {
        let position = self.next_position;
        self.next_position += 1;
        self.items.push(ListItem { position, value });
        self.touched = true;
        position
    }

    fn remove(&mut self, position: usize) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.position != position);
        self.items.len() != before
    }

    fn seed(&mut self, values: Vec<String>) {
        *self = ListEdit::default();
        for value in values {
            self.push(value);
        }
        // A stored list, even an empty one, is a working value.
        self.touched = true;
    }
}

#[derive(Debug, Clone)]
enum WorkingValue {
    Single(Option<String>),
    Multi(ListEdit),
}

/// Stateful editing session over one [`FormModel`].
#[derive(Debug, Clone)]
pub struct FormSession {
    model: Arc<FormModel>,
    working: IndexMap<String, WorkingValue>,
    dirty: bool,
}

impl FormSession {
    pub fn new(model: Arc<FormModel>) -> Self {
        let working = model
            .entries()
            .iter()
            .map(|entry| {
                let value = match entry.editor {
                    EditorKind::Single => WorkingValue::Single(None),
                    EditorKind::Multi => WorkingValue::Multi(ListEdit::default()),
                };
                (entry.name().to_string(), value)
            })
            .collect();
        Self {
            model,
            working,
            dirty: false,
        }
    }

    pub fn model(&self) -> &FormModel {
        &self.model
    }

    /// Pre-populate working values from previously stored values. Unknown keys are ignored.
    pub fn seed(&mut self, values: &ValueMap) {
        for (name, value) in values {
            let Some(entry) = self.model.entry(name) else {
                continue;
            };
            let element = entry.descriptor.kind.element();
            match self.working.get_mut(name) {
                Some(WorkingValue::Single(slot)) => *slot = Some(seed_text(value, element)),
                Some(WorkingValue::Multi(list)) => {
                    let items = match value {
                        TypedValue::List(items) => items
                            .iter()
                            .map(|item| seed_text(item, element))
                            .collect(),
                        scalar => vec![seed_text(scalar, element)],
                    };
                    list.seed(items);
                }
                None => {}
            }
        }
    }

    pub fn apply(&mut self, event: FormEvent) -> Result<EventOutcome, SessionError> {
        match event {
            FormEvent::SetValue { field, raw } => {
                self.set_value(&field, raw)?;
                Ok(EventOutcome::Updated)
            }
            FormEvent::SetPending { field, raw } => {
                self.set_pending(&field, raw)?;
                Ok(EventOutcome::Updated)
            }
            FormEvent::AddItem { field } => self
                .add_item(&field)
                .map(|position| EventOutcome::ItemAdded { position }),
            FormEvent::RemoveItem { field, position } => {
                if self.remove_item(&field, position)? {
                    Ok(EventOutcome::ItemRemoved { position })
                } else {
                    Ok(EventOutcome::Unchanged)
                }
            }
        }
    }

    pub fn set_value(&mut self, field: &str, raw: impl Into<String>) -> Result<(), SessionError> {
        match self.slot_mut(field)? {
            WorkingValue::Single(slot) => {
                *slot = Some(raw.into());
                self.dirty = true;
                Ok(())
            }
            WorkingValue::Multi(_) => Err(wrong_editor(field, "single")),
        }
    }

    pub fn set_pending(&mut self, field: &str, raw: impl Into<String>) -> Result<(), SessionError> {
        let list = self.list_mut(field)?;
        list.pending = raw.into();
        Ok(())
    }

    /// Commit the pending input of `field` as a new item and return its position.
    pub fn add_item(&mut self, field: &str) -> Result<usize, SessionError> {
        let list = self.list_mut(field)?;
        if list.pending.is_empty() {
            return Err(SessionError::EmptyInput {
                field: field.to_string(),
            });
        }
        let value = std::mem::take(&mut list.pending);
        let position = list.push(value);
        self.dirty = true;
        debug!(event = "form.session.item_added", field, position);
        Ok(position)
    }

    /// Remove the item at `position`; returns `false` when no such item is tracked.
    pub fn remove_item(&mut self, field: &str, position: usize) -> Result<bool, SessionError> {
        let removed = self.list_mut(field)?.remove(position);
        if removed {
            self.dirty = true;
            debug!(event = "form.session.item_removed", field, position);
        }
        Ok(removed)
    }

    pub fn value(&self, field: &str) -> Option<&str> {
        match self.working.get(field)? {
            WorkingValue::Single(slot) => slot.as_deref(),
            WorkingValue::Multi(_) => None,
        }
    }

    pub fn list(&self, field: &str) -> Option<&ListEdit> {
        match self.working.get(field)? {
            WorkingValue::Multi(list) => Some(list),
            WorkingValue::Single(_) => None,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Validate and convert every field. Either the full mapping or every failure.
    pub fn commit(&self) -> Result<ValueMap, CommitFailure> {
        let mut values = ValueMap::with_capacity(self.model.len());
        let mut failures = Vec::new();
        for entry in self.model.entries() {
            match self.commit_field(entry) {
                Ok(value) => {
                    values.insert(entry.name().to_string(), value);
                }
                Err(error) => failures.push(FieldFailure {
                    field: entry.name().to_string(),
                    error,
                }),
            }
        }
        if failures.is_empty() {
            Ok(values)
        } else {
            debug!(
                event = "form.session.commit_rejected",
                schema = self.model.schema_name(),
                failures = failures.len()
            );
            Err(CommitFailure { failures })
        }
    }

    fn commit_field(&self, entry: &FormEntry) -> Result<TypedValue, CommitError> {
        let descriptor = &entry.descriptor;
        match self.working.get(entry.name()) {
            Some(WorkingValue::Single(Some(raw))) if !raw.is_empty() => {
                convert(&TypedValue::Text(raw.clone()), descriptor.kind)
                    .map_err(CommitError::InvalidValue)
            }
            Some(WorkingValue::Multi(list)) if list.touched => {
                let element = FieldKind::Scalar(descriptor.kind.element());
                list.items
                    .iter()
                    .map(|item| {
                        convert(&TypedValue::Text(item.value.clone()), element).map_err(
                            |source| CommitError::InvalidItem {
                                position: item.position,
                                source,
                            },
                        )
                    })
                    .collect::<Result<Vec<_>, _>>()
                    .map(TypedValue::List)
            }
            _ => fallback(descriptor),
        }
    }

    fn slot_mut(&mut self, field: &str) -> Result<&mut WorkingValue, SessionError> {
        self.working
            .get_mut(field)
            .ok_or_else(|| SessionError::UnknownField {
                field: field.to_string(),
            })
    }

    fn list_mut(&mut self, field: &str) -> Result<&mut ListEdit, SessionError> {
        match self.slot_mut(field)? {
            WorkingValue::Multi(list) => Ok(list),
            WorkingValue::Single(_) => Err(wrong_editor(field, "multi")),
        }
    }
}

fn fallback(descriptor: &FieldDescriptor) -> Result<TypedValue, CommitError> {
    let value = descriptor
        .fallback_value()
        .ok_or(CommitError::MissingRequiredField)?;
    coerce_default(&value, descriptor.kind).map_err(CommitError::InvalidValue)
}

fn coerce_default(value: &TypedValue, kind: FieldKind) -> Result<TypedValue, CoercionError> {
    match (kind, value) {
        (FieldKind::Scalar(_), _) => convert(value, kind),
        (FieldKind::List(element), TypedValue::List(items)) => items
            .iter()
            .map(|item| convert(item, FieldKind::Scalar(element)))
            .collect::<Result<Vec<_>, _>>()
            .map(TypedValue::List),
        (FieldKind::List(element), scalar) => {
            convert(scalar, FieldKind::Scalar(element)).map(|item| TypedValue::List(vec![item]))
        }
    }
}

/// Render a stored value as editable text for a field of `element` kind.
///
/// Whole numbers stored for float fields keep a fractional part so they commit again.
fn seed_text(value: &TypedValue, element: ScalarKind) -> String {
    match (value, element) {
        (TypedValue::Integer(n), ScalarKind::Float) => TypedValue::Float(*n as f64).render(),
        _ => value.render(),
    }
}

fn wrong_editor(field: &str, expected: &'static str) -> SessionError {
    SessionError::WrongEditor {
        field: field.to_string(),
        expected,
    }
}
