use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::ValueMap;

use super::DocumentFormat;

/// Serialize a value mapping in the given format.
pub fn serialize_values(values: &ValueMap, format: DocumentFormat, pretty: bool) -> Result<String> {
    match format {
        DocumentFormat::Json => {
            if pretty {
                serde_json::to_string_pretty(values).context("failed to serialize JSON")
            } else {
                serde_json::to_string(values).context("failed to serialize JSON")
            }
        }
        #[cfg(feature = "yaml")]
        DocumentFormat::Yaml => serde_yaml::to_string(values).context("failed to serialize YAML"),
        #[cfg(feature = "toml")]
        DocumentFormat::Toml => {
            if pretty {
                toml::to_string_pretty(values).context("failed to serialize TOML")
            } else {
                toml::to_string(values).context("failed to serialize TOML")
            }
        }
    }
}

/// Write `payload` to `path`, creating parent directories as needed.
pub fn write_document(path: &Path, payload: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    let mut file =
        File::create(path).with_context(|| format!("failed to create file {}", path.display()))?;
    file.write_all(payload.as_bytes())?;
    if !payload.ends_with('\n') {
        file.write_all(b"\n")?;
    }
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TypedValue;
    use crate::io::parse_values_str;

    fn sample() -> ValueMap {
        let mut values = ValueMap::new();
        values.insert("link".into(), TypedValue::from("sqlite+aiosqlite:///data/data.db"));
        values.insert("pool_size".into(), TypedValue::Integer(40));
        values
    }

    #[test]
    fn json_output_parses_back() {
        let payload = serialize_values(&sample(), DocumentFormat::Json, true).unwrap();
        assert!(payload.contains("\"pool_size\": 40"));
        assert_eq!(parse_values_str(&payload, DocumentFormat::Json).unwrap(), sample());
    }

    #[test]
    fn writes_into_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library").join("database.json");
        write_document(&path, "{}").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}\n");
    }
}
