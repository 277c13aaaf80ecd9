use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::form::CoercionError;

use super::value::TypedValue;

/// The closed set of primitive value kinds a field may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Text,
    Integer,
    Float,
    Boolean,
}

impl ScalarKind {
    pub const ALL: [ScalarKind; 4] = [
        ScalarKind::Text,
        ScalarKind::Integer,
        ScalarKind::Float,
        ScalarKind::Boolean,
    ];

    /// Canonical name used in type hints.
    pub fn name(self) -> &'static str {
        match self {
            ScalarKind::Text => "str",
            ScalarKind::Integer => "int",
            ScalarKind::Float => "float",
            ScalarKind::Boolean => "bool",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScalarKind {
    type Err = CoercionError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "str" | "string" | "text" => Ok(ScalarKind::Text),
            "int" | "integer" => Ok(ScalarKind::Integer),
            "float" | "number" | "double" => Ok(ScalarKind::Float),
            "bool" | "boolean" => Ok(ScalarKind::Boolean),
            _ => Err(CoercionError::UnsupportedKind {
                kind: raw.trim().to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Scalar(ScalarKind),
    List(ScalarKind),
}

impl FieldKind {
    pub fn is_list(self) -> bool {
        matches!(self, FieldKind::List(_))
    }

    pub fn element(self) -> ScalarKind {
        match self {
            FieldKind::Scalar(kind) | FieldKind::List(kind) => kind,
        }
    }

    /// Human-readable rendering: the generic form for lists, the simple name otherwise.
    pub fn type_hint(self) -> String {
        match self {
            FieldKind::Scalar(kind) => kind.name().to_string(),
            FieldKind::List(kind) => format!("list[{}]", kind.name()),
        }
    }

    /// Parse a declared type such as `int` or `list[str]`.
    pub fn parse(declared: &str) -> Result<Self, CoercionError> {
        let trimmed = declared.trim();
        let lowered = trimmed.to_ascii_lowercase();
        for prefix in ["list[", "vec<", "sequence["] {
            if let Some(rest) = lowered.strip_prefix(prefix) {
                let closing = if prefix.ends_with('<') { '>' } else { ']' };
                let inner = rest
                    .strip_suffix(closing)
                    .ok_or_else(|| CoercionError::UnsupportedKind {
                        kind: trimmed.to_string(),
                    })?;
                let element = inner.parse::<ScalarKind>().map_err(|_| {
                    CoercionError::UnsupportedKind {
                        kind: trimmed.to_string(),
                    }
                })?;
                return Ok(FieldKind::List(element));
            }
        }
        trimmed.parse::<ScalarKind>().map(FieldKind::Scalar)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_hint())
    }
}

/// Produces a fresh default value each time a field falls back to it.
#[derive(Clone)]
pub struct DefaultFactory(Arc<dyn Fn() -> TypedValue + Send + Sync>);

impl DefaultFactory {
    pub fn new(factory: impl Fn() -> TypedValue + Send + Sync + 'static) -> Self {
        Self(Arc::new(factory))
    }

    pub fn produce(&self) -> TypedValue {
        (self.0)()
    }
}

impl fmt::Debug for DefaultFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DefaultFactory(..)")
    }
}

#[derive(Debug, Clone, Default)]
pub enum FieldDefault {
    #[default]
    Missing,
    Value(TypedValue),
    Factory(DefaultFactory),
}

impl FieldDefault {
    pub fn is_missing(&self) -> bool {
        matches!(self, FieldDefault::Missing)
    }

    pub fn resolve(&self) -> Option<TypedValue> {
        match self {
            FieldDefault::Missing => None,
            FieldDefault::Value(value) => Some(value.clone()),
            FieldDefault::Factory(factory) => Some(factory.produce()),
        }
    }
}

/// One declared field of a configuration schema.
#[derive(Debug, Clone)]
pub struct FieldDefinition {
    pub name: String,
    pub declared_type: String,
    pub default: FieldDefault,
    pub doc: Option<String>,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            default: FieldDefault::Missing,
            doc: None,
        }
    }

    pub fn with_default(mut self, value: impl Into<TypedValue>) -> Self {
        self.default = FieldDefault::Value(value.into());
        self
    }

    pub fn with_factory(
        mut self,
        factory: impl Fn() -> TypedValue + Send + Sync + 'static,
    ) -> Self {
        self.default = FieldDefault::Factory(DefaultFactory::new(factory));
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }
}

/// A named configuration model: an ordered set of field definitions.
#[derive(Debug, Clone)]
pub struct ConfigSchema {
    pub name: String,
    /// Dotted storage domain, e.g. `library.mysql`.
    pub domain: String,
    pub doc: Option<String>,
    pub fields: Vec<FieldDefinition>,
}

impl ConfigSchema {
    pub fn new(name: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            domain: domain.into(),
            doc: None,
            fields: Vec::new(),
        }
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    pub fn find(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|field| field.name == name)
    }
}
