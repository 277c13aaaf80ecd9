use std::fs;

use pretty_assertions::assert_eq;

use configform::app::{SaveOutcome, ScreenRegistry, save_current};
use configform::domain::{TypedValue, builtin_schemas, eric_config};
use configform::form::FormEvent;
use configform::store::{ConfigStore, FileStore};

fn fill_eric(registry: &mut ScreenRegistry, store: &FileStore) {
    let screen = registry.open("EricConfig", store).unwrap();
    let session = screen.session_mut();
    session.set_value("name", "eric").unwrap();
    for account in ["10001", "10002"] {
        session
            .apply(FormEvent::SetPending {
                field: "accounts".into(),
                raw: account.into(),
            })
            .unwrap();
        session
            .apply(FormEvent::AddItem {
                field: "accounts".into(),
            })
            .unwrap();
    }
    session.set_value("default_account", "10002").unwrap();
    session.set_value("host", "http://localhost:8080").unwrap();
    session.set_value("verify_key", "secret").unwrap();
    session.set_value("debug", "True").unwrap();
}

#[test]
fn saved_values_seed_the_next_session() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(dir.path(), builtin_schemas());
    let mut registry = ScreenRegistry::from_store(&store);
    fill_eric(&mut registry, &store);

    let outcome = save_current(&mut registry, &mut store).unwrap();
    assert_eq!(
        outcome,
        SaveOutcome::Saved {
            schema: "EricConfig".into(),
            fields: 11,
        }
    );
    assert!(dir.path().join("config.json").is_file());

    let reopened = FileStore::new(dir.path(), builtin_schemas());
    let mut registry = ScreenRegistry::from_store(&reopened);
    let screen = registry.open("EricConfig", &reopened).unwrap();
    let session = screen.session();
    assert_eq!(session.value("name"), Some("eric"));
    assert_eq!(session.value("debug"), Some("true"));
    let accounts = session
        .list("accounts")
        .unwrap()
        .items()
        .iter()
        .map(|item| item.value.as_str())
        .collect::<Vec<_>>();
    assert_eq!(accounts, vec!["10001", "10002"]);

    let committed = session.commit().unwrap();
    assert_eq!(Some(committed), reopened.load(&eric_config()).unwrap());
}

#[test]
fn rejected_save_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(dir.path(), builtin_schemas());
    let mut registry = ScreenRegistry::from_store(&store);
    registry
        .open("EricConfig", &store)
        .unwrap()
        .session_mut()
        .set_value("default_account", "abc")
        .unwrap();

    let outcome = save_current(&mut registry, &mut store).unwrap();
    assert!(matches!(outcome, SaveOutcome::Rejected { issues: 5, .. }));
    assert!(fs::read_dir(dir.path()).unwrap().next().is_none());
    let screen = registry.current_screen().unwrap();
    assert_eq!(
        screen.field_error("default_account"),
        Some("invalid value for int: abc")
    );
}

#[test]
fn nested_domains_land_in_subdirectories() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(dir.path(), builtin_schemas());
    let mut registry = ScreenRegistry::from_store(&store);
    registry
        .open("MySQLConfig", &store)
        .unwrap()
        .session_mut()
        .set_value("pool_size", "16")
        .unwrap();
    save_current(&mut registry, &mut store).unwrap();

    let contents = fs::read_to_string(dir.path().join("library").join("mysql.json")).unwrap();
    let stored: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(stored["pool_size"], serde_json::json!(16));
    assert_eq!(stored["max_overflow"], serde_json::json!(60));

    let loaded = store
        .load(registry.schema("MySQLConfig").unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(loaded["disable_pooling"], TypedValue::Boolean(false));
}
