use std::fmt;

use thiserror::Error;

use crate::domain::ScalarKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoercionError {
    #[error("type {kind} is not supported")]
    UnsupportedKind { kind: String },

    #[error("invalid value for {kind}: {raw}")]
    InvalidValue { kind: ScalarKind, raw: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("unknown field '{field}'")]
    UnknownField { field: String },

    #[error("field '{field}' does not use a {expected} editor")]
    WrongEditor { field: String, expected: &'static str },

    #[error("input cannot be empty")]
    EmptyInput { field: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommitError {
    #[error("{0}")]
    InvalidValue(CoercionError),

    #[error("item #{position}: {source}")]
    InvalidItem {
        position: usize,
        source: CoercionError,
    },

    #[error("required field is not set")]
    MissingRequiredField,
}

/// A commit failure attributed to one field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {error}")]
pub struct FieldFailure {
    pub field: String,
    pub error: CommitError,
}

/// Every per-field failure of a rejected commit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct CommitFailure {
    pub failures: Vec<FieldFailure>,
}

impl CommitFailure {
    pub fn for_field(&self, field: &str) -> Option<&CommitError> {
        self.failures
            .iter()
            .find(|failure| failure.field == field)
            .map(|failure| &failure.error)
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }
}

impl fmt::Display for CommitFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines = self
            .failures
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        write!(f, "{}", lines.join("; "))
    }
}
