use std::collections::HashMap;

use anyhow::Result;

use crate::domain::{ConfigSchema, ValueMap};

use super::ConfigStore;

/// Keeps schemas and saved values in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    schemas: Vec<ConfigSchema>,
    values: HashMap<String, ValueMap>,
    saves: usize,
}

impl MemoryStore {
    pub fn new(schemas: Vec<ConfigSchema>) -> Self {
        Self {
            schemas,
            values: HashMap::new(),
            saves: 0,
        }
    }

    pub fn with_values(mut self, schema_name: impl Into<String>, values: ValueMap) -> Self {
        self.values.insert(schema_name.into(), values);
        self
    }

    pub fn values(&self, schema_name: &str) -> Option<&ValueMap> {
        self.values.get(schema_name)
    }

    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl ConfigStore for MemoryStore {
    fn list_schemas(&self) -> Vec<ConfigSchema> {
        self.schemas.clone()
    }

    fn load(&self, schema: &ConfigSchema) -> Result<Option<ValueMap>> {
        Ok(self.values.get(&schema.name).cloned())
    }

    fn save(&mut self, schema: &ConfigSchema, values: &ValueMap) -> Result<()> {
        self.values.insert(schema.name.clone(), values.clone());
        self.saves += 1;
        Ok(())
    }
}
