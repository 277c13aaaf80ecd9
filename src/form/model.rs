use crate::domain::{ConfigSchema, DescriptorError, describe_schema};

use super::entry::{EditorKind, FormEntry};

/// Ordered form entries synthesized from one schema. Rebuild on schema change.
#[derive(Debug, Clone)]
pub struct FormModel {
    schema_name: String,
    doc: Option<String>,
    entries: Vec<FormEntry>,
}

impl FormModel {
    pub fn build(schema: &ConfigSchema) -> Result<Self, DescriptorError> {
        let entries = describe_schema(schema)?
            .into_iter()
            .map(FormEntry::from_descriptor)
            .collect();
        Ok(Self {
            schema_name: schema.name.clone(),
            doc: schema.doc.clone(),
            entries,
        })
    }

    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    pub fn entries(&self) -> &[FormEntry] {
        &self.entries
    }

    pub fn entry(&self, name: &str) -> Option<&FormEntry> {
        self.entries.iter().find(|entry| entry.name() == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn multi_entries(&self) -> impl Iterator<Item = &FormEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.editor == EditorKind::Multi)
    }
}
