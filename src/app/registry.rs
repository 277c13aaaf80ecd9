use std::sync::Arc;

use indexmap::IndexMap;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::{ConfigSchema, DescriptorError};
use crate::form::{FormModel, FormSession};
use crate::store::ConfigStore;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("unknown schema '{name}'")]
    UnknownSchema { name: String },

    #[error("schema '{name}' cannot be edited: {source}")]
    Broken {
        name: String,
        source: DescriptorError,
    },

    #[error("no schemas available")]
    Empty,
}

/// What the navigation currently points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Schema(String),
    /// Schemas are registered but none is selected yet.
    Idle,
    /// No schema is registered; the only affordance is to exit.
    Fallback,
}

/// An opened schema view: its session plus the field errors of the last rejected commit.
#[derive(Debug, Clone)]
pub struct Screen {
    session: FormSession,
    errors: IndexMap<String, String>,
}

impl Screen {
    fn new(session: FormSession) -> Self {
        Self {
            session,
            errors: IndexMap::new(),
        }
    }

    pub fn model(&self) -> &FormModel {
        self.session.model()
    }

    pub fn session(&self) -> &FormSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut FormSession {
        &mut self.session
    }

    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn set_errors(&mut self, errors: IndexMap<String, String>) {
        self.errors = errors;
    }

    pub fn clear_error(&mut self, field: &str) {
        self.errors.shift_remove(field);
    }

    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }
}

#[derive(Debug, Clone)]
enum Slot {
    Unbuilt,
    Ready(Box<Screen>),
    Broken(DescriptorError),
}

/// Known schemas, their lazily built screens, and a cyclic navigation cursor.
#[derive(Debug, Clone)]
pub struct ScreenRegistry {
    schemas: Vec<ConfigSchema>,
    slots: Vec<Slot>,
    current: Option<usize>,
}

impl ScreenRegistry {
    pub fn new(schemas: Vec<ConfigSchema>) -> Self {
        let slots = vec![Slot::Unbuilt; schemas.len()];
        info!(event = "app.registry.created", schemas = schemas.len());
        Self {
            schemas,
            slots,
            current: None,
        }
    }

    pub fn from_store(store: &dyn ConfigStore) -> Self {
        Self::new(store.list_schemas())
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.iter().map(|schema| schema.name.as_str())
    }

    pub fn schema(&self, name: &str) -> Option<&ConfigSchema> {
        self.schemas.iter().find(|schema| schema.name == name)
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current
            .and_then(|index| self.schemas.get(index))
            .map(|schema| schema.name.as_str())
    }

    pub fn current_schema(&self) -> Option<&ConfigSchema> {
        self.current.and_then(|index| self.schemas.get(index))
    }

    pub fn navigation(&self) -> Navigation {
        if self.is_empty() {
            return Navigation::Fallback;
        }
        match self.current_name() {
            Some(name) => Navigation::Schema(name.to_string()),
            None => Navigation::Idle,
        }
    }

    /// Move to the next schema, wrapping past the last. Starts at the first.
    pub fn advance(&mut self) -> Navigation {
        self.step(1)
    }

    /// Move to the previous schema, wrapping before the first.
    pub fn retreat(&mut self) -> Navigation {
        self.step(-1)
    }

    fn step(&mut self, delta: isize) -> Navigation {
        if self.is_empty() {
            return Navigation::Fallback;
        }
        let count = self.schemas.len() as isize;
        let next = match self.current {
            None if delta >= 0 => 0,
            None => count - 1,
            Some(index) => (index as isize + delta).rem_euclid(count),
        };
        self.current = Some(next as usize);
        self.navigation()
    }

    pub fn select(&mut self, name: &str) -> Result<(), RegistryError> {
        let index = self.index_of(name)?;
        self.current = Some(index);
        Ok(())
    }

    /// Verify every schema can be turned into a form without opening sessions.
    pub fn check_all(&self) -> Vec<(String, DescriptorError)> {
        self.schemas
            .iter()
            .filter_map(|schema| match FormModel::build(schema) {
                Ok(_) => None,
                Err(err) => Some((schema.name.clone(), err)),
            })
            .collect()
    }

    /// Build (once) and return the screen of the current schema.
    pub fn open_current(
        &mut self,
        store: &dyn ConfigStore,
    ) -> Result<&mut Screen, RegistryError> {
        if self.is_empty() {
            return Err(RegistryError::Empty);
        }
        let index = match self.current {
            Some(index) => index,
            None => {
                self.current = Some(0);
                0
            }
        };
        self.open_index(index, store)
    }

    pub fn open(
        &mut self,
        name: &str,
        store: &dyn ConfigStore,
    ) -> Result<&mut Screen, RegistryError> {
        let index = self.index_of(name)?;
        self.current = Some(index);
        self.open_index(index, store)
    }

    fn open_index(
        &mut self,
        index: usize,
        store: &dyn ConfigStore,
    ) -> Result<&mut Screen, RegistryError> {
        if matches!(self.slots[index], Slot::Unbuilt) {
            self.slots[index] = build_slot(&self.schemas[index], store);
        }
        let name = &self.schemas[index].name;
        match &mut self.slots[index] {
            Slot::Ready(screen) => Ok(screen.as_mut()),
            Slot::Broken(err) => Err(RegistryError::Broken {
                name: name.clone(),
                source: err.clone(),
            }),
            Slot::Unbuilt => Err(RegistryError::UnknownSchema { name: name.clone() }),
        }
    }

    /// The already opened screen of the current schema, if any.
    pub fn current_screen(&self) -> Option<&Screen> {
        match self.slots.get(self.current?)? {
            Slot::Ready(screen) => Some(screen.as_ref()),
            _ => None,
        }
    }

    pub fn current_screen_mut(&mut self) -> Option<&mut Screen> {
        match self.slots.get_mut(self.current?)? {
            Slot::Ready(screen) => Some(screen.as_mut()),
            _ => None,
        }
    }

    /// Discard the current schema's session; the next open starts fresh.
    pub fn close_current(&mut self) {
        if let Some(index) = self.current
            && let Some(slot) = self.slots.get_mut(index)
            && matches!(slot, Slot::Ready(_))
        {
            *slot = Slot::Unbuilt;
        }
    }

    /// Names of schemas whose open session has unsaved edits.
    pub fn dirty_screens(&self) -> Vec<&str> {
        self.schemas
            .iter()
            .zip(&self.slots)
            .filter_map(|(schema, slot)| match slot {
                Slot::Ready(screen) if screen.session.is_dirty() => Some(schema.name.as_str()),
                _ => None,
            })
            .collect()
    }

    fn index_of(&self, name: &str) -> Result<usize, RegistryError> {
        self.schemas
            .iter()
            .position(|schema| schema.name == name)
            .ok_or_else(|| RegistryError::UnknownSchema {
                name: name.to_string(),
            })
    }
}

fn build_slot(schema: &ConfigSchema, store: &dyn ConfigStore) -> Slot {
    let model = match FormModel::build(schema) {
        Ok(model) => model,
        Err(err) => {
            warn!(
                event = "app.registry.schema_broken",
                schema = %schema.name,
                error = %err
            );
            return Slot::Broken(err);
        }
    };
    let mut session = FormSession::new(Arc::new(model));
    match store.load(schema) {
        Ok(Some(values)) => session.seed(&values),
        Ok(None) => {}
        Err(err) => warn!(
            event = "app.registry.load_failed",
            schema = %schema.name,
            error = %format!("{err:#}")
        ),
    }
    info!(event = "app.registry.screen_opened", schema = %schema.name);
    Slot::Ready(Box::new(Screen::new(session)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FieldDefinition, TypedValue, ValueMap, builtin_schemas, mysql_config};
    use crate::store::MemoryStore;

    fn names(count: usize) -> Vec<ConfigSchema> {
        (0..count)
            .map(|i| ConfigSchema::new(format!("S{i}"), format!("s{i}")))
            .collect()
    }

    #[test]
    fn advance_cycles_and_wraps() {
        let mut registry = ScreenRegistry::new(names(3));
        assert_eq!(registry.navigation(), Navigation::Idle);
        assert_eq!(registry.advance(), Navigation::Schema("S0".into()));
        assert_eq!(registry.advance(), Navigation::Schema("S1".into()));
        assert_eq!(registry.advance(), Navigation::Schema("S2".into()));
        assert_eq!(registry.advance(), Navigation::Schema("S0".into()));
        assert_eq!(registry.retreat(), Navigation::Schema("S2".into()));
    }

    #[test]
    fn empty_registry_falls_back() {
        let mut registry = ScreenRegistry::new(Vec::new());
        assert_eq!(registry.navigation(), Navigation::Fallback);
        assert_eq!(registry.advance(), Navigation::Fallback);
        assert_eq!(registry.retreat(), Navigation::Fallback);
        let store = MemoryStore::default();
        assert_eq!(
            registry.open_current(&store).unwrap_err(),
            RegistryError::Empty
        );
    }

    #[test]
    fn open_is_lazy_and_cached() {
        let store = MemoryStore::new(builtin_schemas());
        let mut registry = ScreenRegistry::from_store(&store);
        assert!(registry.current_screen().is_none());
        registry
            .open("MySQLConfig", &store)
            .unwrap()
            .session_mut()
            .set_value("pool_size", "8")
            .unwrap();
        registry.advance();
        registry.select("MySQLConfig").unwrap();
        let screen = registry.open_current(&store).unwrap();
        assert_eq!(screen.session().value("pool_size"), Some("8"));
        assert_eq!(registry.dirty_screens(), vec!["MySQLConfig"]);
    }

    #[test]
    fn close_discards_session() {
        let store = MemoryStore::new(vec![mysql_config()]);
        let mut registry = ScreenRegistry::from_store(&store);
        registry
            .open_current(&store)
            .unwrap()
            .session_mut()
            .set_value("pool_size", "8")
            .unwrap();
        registry.close_current();
        let screen = registry.open_current(&store).unwrap();
        assert_eq!(screen.session().value("pool_size"), None);
    }

    #[test]
    fn open_seeds_from_stored_values() {
        let mut stored = ValueMap::new();
        stored.insert("pool_size".into(), TypedValue::Integer(12));
        let store = MemoryStore::new(vec![mysql_config()]).with_values("MySQLConfig", stored);
        let mut registry = ScreenRegistry::from_store(&store);
        let screen = registry.open_current(&store).unwrap();
        assert_eq!(screen.session().value("pool_size"), Some("12"));
        assert!(!screen.session().is_dirty());
    }

    #[test]
    fn broken_schema_does_not_affect_others() {
        let broken = ConfigSchema::new("Broken", "broken")
            .field(FieldDefinition::new("payload", "dict[str, str]"));
        let store = MemoryStore::new(vec![broken, mysql_config()]);
        let mut registry = ScreenRegistry::from_store(&store);
        assert_eq!(registry.check_all().len(), 1);
        let err = registry.open("Broken", &store).unwrap_err();
        assert!(matches!(err, RegistryError::Broken { .. }));
        assert!(registry.open("MySQLConfig", &store).is_ok());
    }

    #[test]
    fn selecting_unknown_schema_fails() {
        let mut registry = ScreenRegistry::new(names(1));
        assert_eq!(
            registry.select("Nope"),
            Err(RegistryError::UnknownSchema {
                name: "Nope".into()
            })
        );
    }
}
