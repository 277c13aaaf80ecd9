use thiserror::Error;

use super::schema::{ConfigSchema, FieldDefault, FieldDefinition, FieldKind};
use super::value::TypedValue;

/// Placeholder shown when a field defaults to the empty string.
pub const UNSET_PLACEHOLDER: &str = "<unset>";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    #[error("field '{field}' declares unsupported type '{declared}'")]
    UnsupportedKind { field: String, declared: String },
}

/// Displayable rendering of a field's literal default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultText {
    Unset,
    Text(String),
    List(Vec<String>),
}

impl DefaultText {
    fn from_value(value: &TypedValue) -> Self {
        match value {
            TypedValue::Text(text) if text.is_empty() => DefaultText::Unset,
            TypedValue::List(_) => DefaultText::List(value.render_items()),
            other => DefaultText::Text(other.render()),
        }
    }

    pub fn placeholder(&self) -> String {
        match self {
            DefaultText::Unset => UNSET_PLACEHOLDER.to_string(),
            DefaultText::Text(text) => text.clone(),
            DefaultText::List(items) => items.join(", "),
        }
    }
}

/// Read-only view of one configuration field, derived once per schema.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
    pub documentation: String,
    pub type_hint: String,
    pub default: Option<DefaultText>,
    pub(crate) fallback: FieldDefault,
}

impl FieldDescriptor {
    pub fn from_definition(definition: &FieldDefinition) -> Result<Self, DescriptorError> {
        let kind = FieldKind::parse(&definition.declared_type).map_err(|_| {
            DescriptorError::UnsupportedKind {
                field: definition.name.clone(),
                declared: definition.declared_type.clone(),
            }
        })?;
        let default = match &definition.default {
            FieldDefault::Value(value) => Some(DefaultText::from_value(value)),
            FieldDefault::Missing | FieldDefault::Factory(_) => None,
        };
        Ok(Self {
            name: definition.name.clone(),
            kind,
            required: definition.default.is_missing(),
            documentation: definition
                .doc
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_string(),
            type_hint: kind.type_hint(),
            default,
            fallback: definition.default.clone(),
        })
    }

    /// Value committed when the session holds no working value for this field.
    pub fn fallback_value(&self) -> Option<TypedValue> {
        self.fallback.resolve()
    }
}

/// Extract descriptors for every field of `schema`, in declaration order.
pub fn describe_schema(schema: &ConfigSchema) -> Result<Vec<FieldDescriptor>, DescriptorError> {
    schema
        .fields
        .iter()
        .map(FieldDescriptor::from_definition)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ScalarKind;

    #[test]
    fn missing_default_marks_field_required() {
        let descriptor =
            FieldDescriptor::from_definition(&FieldDefinition::new("name", "str")).unwrap();
        assert!(descriptor.required);
        assert_eq!(descriptor.default, None);
        assert_eq!(descriptor.documentation, "");
    }

    #[test]
    fn falsy_defaults_are_optional() {
        for value in [
            TypedValue::Boolean(false),
            TypedValue::Integer(0),
            TypedValue::Text(String::new()),
        ] {
            let definition = FieldDefinition::new("flag", "str").with_default(value);
            let descriptor = FieldDescriptor::from_definition(&definition).unwrap();
            assert!(!descriptor.required);
            assert!(descriptor.default.is_some());
        }
    }

    #[test]
    fn factory_default_is_optional_without_display() {
        let definition = FieldDefinition::new("owners", "list[int]")
            .with_factory(|| TypedValue::List(Vec::new()));
        let descriptor = FieldDescriptor::from_definition(&definition).unwrap();
        assert!(!descriptor.required);
        assert_eq!(descriptor.default, None);
        assert_eq!(descriptor.kind, FieldKind::List(ScalarKind::Integer));
        assert_eq!(descriptor.type_hint, "list[int]");
        assert_eq!(descriptor.fallback_value(), Some(TypedValue::List(Vec::new())));
    }

    #[test]
    fn empty_string_default_uses_unset_sentinel() {
        let definition = FieldDefinition::new("proxy", "str").with_default("");
        let descriptor = FieldDescriptor::from_definition(&definition).unwrap();
        assert_eq!(descriptor.default, Some(DefaultText::Unset));
        assert_eq!(DefaultText::Unset.placeholder(), UNSET_PLACEHOLDER);
    }

    #[test]
    fn unsupported_type_names_the_field() {
        let schema = ConfigSchema::new("Broken", "broken")
            .field(FieldDefinition::new("ok", "int"))
            .field(FieldDefinition::new("mapping", "dict[str, int]"));
        let err = describe_schema(&schema).unwrap_err();
        assert_eq!(
            err,
            DescriptorError::UnsupportedKind {
                field: "mapping".into(),
                declared: "dict[str, int]".into(),
            }
        );
    }
}
