use anyhow::{Context, Result};
use indexmap::IndexMap;
use tracing::{info, warn};

use crate::form::CommitFailure;
use crate::store::ConfigStore;

use super::registry::ScreenRegistry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved { schema: String, fields: usize },
    Rejected { schema: String, issues: usize },
}

/// Commit the current screen and hand the values to the store.
///
/// A rejected commit leaves the session untouched and records one error per failing
/// field on the screen; a store failure is returned as an error.
pub fn save_current(
    registry: &mut ScreenRegistry,
    store: &mut dyn ConfigStore,
) -> Result<SaveOutcome> {
    let schema = registry
        .current_schema()
        .cloned()
        .context("no configuration screen is open")?;
    let screen = registry
        .current_screen_mut()
        .with_context(|| format!("screen for {} is not open", schema.name))?;

    match screen.session().commit() {
        Ok(values) => {
            store
                .save(&schema, &values)
                .with_context(|| format!("failed to save {}", schema.name))?;
            screen.clear_errors();
            screen.session_mut().mark_clean();
            info!(
                event = "app.save.completed",
                schema = %schema.name,
                fields = values.len()
            );
            Ok(SaveOutcome::Saved {
                schema: schema.name,
                fields: values.len(),
            })
        }
        Err(failure) => {
            let issues = failure.len();
            warn!(event = "app.save.rejected", schema = %schema.name, issues);
            screen.set_errors(field_errors(&failure));
            Ok(SaveOutcome::Rejected {
                schema: schema.name,
                issues,
            })
        }
    }
}

fn field_errors(failure: &CommitFailure) -> IndexMap<String, String> {
    failure
        .failures
        .iter()
        .map(|failure| (failure.field.clone(), failure.error.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TypedValue, eric_config, mysql_config};
    use crate::store::MemoryStore;

    #[test]
    fn saves_committed_values_and_marks_clean() {
        let mut store = MemoryStore::new(vec![mysql_config()]);
        let mut registry = ScreenRegistry::from_store(&store);
        registry
            .open_current(&store)
            .unwrap()
            .session_mut()
            .set_value("pool_size", "16")
            .unwrap();
        let outcome = save_current(&mut registry, &mut store).unwrap();
        assert_eq!(
            outcome,
            SaveOutcome::Saved {
                schema: "MySQLConfig".into(),
                fields: 3
            }
        );
        let saved = store.values("MySQLConfig").unwrap();
        assert_eq!(saved["pool_size"], TypedValue::Integer(16));
        assert!(!registry.current_screen().unwrap().session().is_dirty());
    }

    #[test]
    fn rejected_commit_records_field_errors_without_saving() {
        let mut store = MemoryStore::new(vec![eric_config()]);
        let mut registry = ScreenRegistry::from_store(&store);
        registry
            .open_current(&store)
            .unwrap()
            .session_mut()
            .set_value("default_account", "abc")
            .unwrap();
        let outcome = save_current(&mut registry, &mut store).unwrap();
        assert!(matches!(outcome, SaveOutcome::Rejected { issues: 5, .. }));
        assert_eq!(store.save_count(), 0);
        let screen = registry.current_screen().unwrap();
        assert_eq!(
            screen.field_error("name"),
            Some("required field is not set")
        );
        assert!(screen.field_error("default_account").is_some());
        assert!(screen.session().is_dirty());
    }

    #[test]
    fn saving_without_open_screen_fails() {
        let mut store = MemoryStore::new(vec![mysql_config()]);
        let mut registry = ScreenRegistry::from_store(&store);
        assert!(save_current(&mut registry, &mut store).is_err());
    }
}
