use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::schema::ScalarKind;

/// Committed values of one schema, keyed by field name in declaration order.
pub type ValueMap = IndexMap<String, TypedValue>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypedValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<TypedValue>),
}

impl TypedValue {
    /// Scalar kind of this value, `None` for lists.
    pub fn scalar_kind(&self) -> Option<ScalarKind> {
        match self {
            TypedValue::Text(_) => Some(ScalarKind::Text),
            TypedValue::Integer(_) => Some(ScalarKind::Integer),
            TypedValue::Float(_) => Some(ScalarKind::Float),
            TypedValue::Boolean(_) => Some(ScalarKind::Boolean),
            TypedValue::List(_) => None,
        }
    }

    pub fn is_kind(&self, kind: ScalarKind) -> bool {
        self.scalar_kind() == Some(kind)
    }

    /// Canonical string form, accepted back by the coercion rules of its own kind.
    pub fn render(&self) -> String {
        match self {
            TypedValue::Text(text) => text.clone(),
            TypedValue::Integer(value) => value.to_string(),
            TypedValue::Float(value) => {
                if value.is_finite() && value.fract() == 0.0 {
                    format!("{value:.1}")
                } else {
                    value.to_string()
                }
            }
            TypedValue::Boolean(flag) => flag.to_string(),
            TypedValue::List(items) => items
                .iter()
                .map(TypedValue::render)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    /// Item renderings for list values; a scalar renders as a single item.
    pub fn render_items(&self) -> Vec<String> {
        match self {
            TypedValue::List(items) => items.iter().map(TypedValue::render).collect(),
            other => vec![other.render()],
        }
    }
}

impl From<&str> for TypedValue {
    fn from(value: &str) -> Self {
        TypedValue::Text(value.to_string())
    }
}

impl From<String> for TypedValue {
    fn from(value: String) -> Self {
        TypedValue::Text(value)
    }
}

impl From<i64> for TypedValue {
    fn from(value: i64) -> Self {
        TypedValue::Integer(value)
    }
}

impl From<f64> for TypedValue {
    fn from(value: f64) -> Self {
        TypedValue::Float(value)
    }
}

impl From<bool> for TypedValue {
    fn from(value: bool) -> Self {
        TypedValue::Boolean(value)
    }
}

impl<T: Into<TypedValue>> From<Vec<T>> for TypedValue {
    fn from(items: Vec<T>) -> Self {
        TypedValue::List(items.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn float_rendering_keeps_fraction() {
        assert_eq!(TypedValue::Float(30.0).render(), "30.0");
        assert_eq!(TypedValue::Float(2.75).render(), "2.75");
    }

    #[test]
    fn serializes_as_plain_values() {
        let value = TypedValue::from(vec![1_i64, 2]);
        assert_eq!(serde_json::to_value(&value).unwrap(), json!([1, 2]));
        let parsed: TypedValue = serde_json::from_value(json!(false)).unwrap();
        assert_eq!(parsed, TypedValue::Boolean(false));
        let parsed: TypedValue = serde_json::from_value(json!(2.5)).unwrap();
        assert_eq!(parsed, TypedValue::Float(2.5));
        let parsed: TypedValue = serde_json::from_value(json!(7)).unwrap();
        assert_eq!(parsed, TypedValue::Integer(7));
    }

    #[test]
    fn list_renders_items_joined() {
        let value = TypedValue::from(vec![".", "/"]);
        assert_eq!(value.render(), "., /");
        assert_eq!(value.render_items(), vec![".".to_string(), "/".to_string()]);
    }
}
