#![deny(rust_2018_idioms)]

pub mod app;
pub mod domain;
pub mod form;
pub mod io;
pub mod logging;
pub mod presentation;
pub mod store;

pub use app::{ConfigUi, UiOptions};

pub mod prelude {
    pub use super::app::{ConfigUi, ScreenRegistry, UiOptions, save_current};
    pub use super::domain::{ConfigSchema, FieldDefinition, TypedValue, ValueMap, builtin_schemas};
    pub use super::form::{FormEvent, FormModel, FormSession};
    pub use super::store::{ConfigStore, FileStore, MemoryStore};
}
