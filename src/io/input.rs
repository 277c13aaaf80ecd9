use anyhow::{Context, Result, bail};
use serde_json::Value;

use crate::domain::{TypedValue, ValueMap};

use super::DocumentFormat;

/// Parse a stored configuration document into a value mapping.
///
/// Keys keep document order. Nested tables and `null` entries are skipped since no
/// schema field can hold them.
pub fn parse_values_str(contents: &str, format: DocumentFormat) -> Result<ValueMap> {
    let document = parse_document_str(contents, format)?;
    let Value::Object(map) = document else {
        bail!("configuration document must be a table at the top level");
    };
    let mut values = ValueMap::with_capacity(map.len());
    for (key, value) in map {
        if value.is_null() || value.is_object() {
            continue;
        }
        let typed = serde_json::from_value::<TypedValue>(value)
            .with_context(|| format!("unsupported value for key '{key}'"))?;
        values.insert(key, typed);
    }
    Ok(values)
}

fn parse_document_str(contents: &str, format: DocumentFormat) -> Result<Value> {
    if contents.trim().is_empty() {
        return Ok(Value::Object(Default::default()));
    }
    match format {
        DocumentFormat::Json => {
            serde_json::from_str::<Value>(contents).with_context(|| "failed to parse JSON document")
        }
        #[cfg(feature = "yaml")]
        DocumentFormat::Yaml => {
            serde_yaml::from_str::<Value>(contents).with_context(|| "failed to parse YAML document")
        }
        #[cfg(feature = "toml")]
        DocumentFormat::Toml => contents
            .parse::<toml::Table>()
            .with_context(|| "failed to parse TOML document")
            .and_then(|value| {
                serde_json::to_value(value).context("failed to convert TOML to JSON")
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_json_in_document_order() {
        let values = parse_values_str(
            r#"{"pool_size": 40, "disable_pooling": false, "prefix": [".", "/"], "ratio": 0.5}"#,
            DocumentFormat::Json,
        )
        .unwrap();
        let keys = values.keys().map(String::as_str).collect::<Vec<_>>();
        assert_eq!(keys, vec!["pool_size", "disable_pooling", "prefix", "ratio"]);
        assert_eq!(values["pool_size"], TypedValue::Integer(40));
        assert_eq!(values["prefix"], TypedValue::from(vec![".", "/"]));
        assert_eq!(values["ratio"], TypedValue::Float(0.5));
    }

    #[test]
    fn empty_document_yields_no_values() {
        let values = parse_values_str("  \n", DocumentFormat::Json).unwrap();
        assert!(values.is_empty());
    }

    #[test]
    fn skips_null_and_nested_tables() {
        let values =
            parse_values_str(r#"{"a": null, "b": {"c": 1}, "d": "x"}"#, DocumentFormat::Json)
                .unwrap();
        assert_eq!(values.len(), 1);
        assert_eq!(values["d"], TypedValue::from("x"));
    }

    #[test]
    fn rejects_non_table_documents() {
        assert!(parse_values_str("[1, 2]", DocumentFormat::Json).is_err());
    }
}
