use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::domain::{ConfigSchema, ValueMap};
use crate::io::{DocumentFormat, parse_values_str, serialize_values, write_document};

use super::ConfigStore;

/// Stores one document per schema below a root directory.
///
/// The dotted domain `library.mysql` maps to `<root>/library/mysql.<ext>`.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
    format: DocumentFormat,
    pretty: bool,
    schemas: Vec<ConfigSchema>,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>, schemas: Vec<ConfigSchema>) -> Self {
        Self {
            root: root.into(),
            format: DocumentFormat::default(),
            pretty: true,
            schemas,
        }
    }

    pub fn with_format(mut self, format: DocumentFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, schema: &ConfigSchema) -> PathBuf {
        let mut path = self.root.clone();
        for segment in schema.domain.split('.').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        if path == self.root {
            path.push(&schema.name);
        }
        path.set_extension(self.format.extension());
        path
    }
}

impl ConfigStore for FileStore {
    fn list_schemas(&self) -> Vec<ConfigSchema> {
        self.schemas.clone()
    }

    fn load(&self, schema: &ConfigSchema) -> Result<Option<ValueMap>> {
        let path = self.path_for(schema);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err).with_context(|| format!("failed to read {}", path.display()));
            }
        };
        parse_values_str(&contents, self.format)
            .map(Some)
            .with_context(|| format!("failed to load {}", path.display()))
    }

    fn save(&mut self, schema: &ConfigSchema, values: &ValueMap) -> Result<()> {
        let path = self.path_for(schema);
        let payload = serialize_values(values, self.format, self.pretty)?;
        write_document(&path, &payload)
            .with_context(|| format!("failed to save {}", schema.name))?;
        info!(
            event = "store.file.saved",
            schema = %schema.name,
            path = %path.display(),
            fields = values.len()
        );
        Ok(())
    }
}
