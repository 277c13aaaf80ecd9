//! Configuration-store collaborators: where schemas come from and where commits go.

mod file;
mod memory;

use anyhow::Result;

use crate::domain::{ConfigSchema, ValueMap};

pub use file::FileStore;
pub use memory::MemoryStore;

pub trait ConfigStore {
    /// Every known schema, in registration order.
    fn list_schemas(&self) -> Vec<ConfigSchema>;

    /// Currently stored values of `schema`, `None` when nothing was saved yet.
    fn load(&self, schema: &ConfigSchema) -> Result<Option<ValueMap>>;

    /// Persist a commit result. Last save wins.
    fn save(&mut self, schema: &ConfigSchema, values: &ValueMap) -> Result<()>;
}
