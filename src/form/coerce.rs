use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{FieldKind, ScalarKind, TypedValue};

use super::error::CoercionError;

static FLOAT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A[0-9]+\.[0-9]+\z").expect("float pattern is valid")
});

/// Whether `raw` is well-formed for `kind`.
pub fn validate(raw: &str, kind: ScalarKind) -> bool {
    match kind {
        ScalarKind::Text => true,
        ScalarKind::Integer => {
            !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) && raw.parse::<i64>().is_ok()
        }
        ScalarKind::Float => {
            FLOAT_PATTERN.is_match(raw) && raw.parse::<f64>().is_ok_and(f64::is_finite)
        }
        ScalarKind::Boolean => {
            raw.eq_ignore_ascii_case("true") || raw.eq_ignore_ascii_case("false")
        }
    }
}

/// Validate then cast `raw` into the native value of `kind`.
pub fn coerce(raw: &str, kind: ScalarKind) -> Result<TypedValue, CoercionError> {
    if !validate(raw, kind) {
        return Err(CoercionError::InvalidValue {
            kind,
            raw: raw.to_string(),
        });
    }
    let value = match kind {
        ScalarKind::Text => TypedValue::Text(raw.to_string()),
        ScalarKind::Integer => TypedValue::Integer(raw.parse().map_err(|_| invalid(raw, kind))?),
        ScalarKind::Float => TypedValue::Float(raw.parse().map_err(|_| invalid(raw, kind))?),
        ScalarKind::Boolean => TypedValue::Boolean(raw.eq_ignore_ascii_case("true")),
    };
    Ok(value)
}

/// Convert `value` to `kind`.
///
/// Values already carrying the native type of `kind` are returned unchanged; text is
/// validated and coerced. List kinds are not scalar and fail with `UnsupportedKind`.
pub fn convert(value: &TypedValue, kind: FieldKind) -> Result<TypedValue, CoercionError> {
    let FieldKind::Scalar(scalar) = kind else {
        return Err(CoercionError::UnsupportedKind {
            kind: kind.type_hint(),
        });
    };
    if value.is_kind(scalar) {
        return Ok(value.clone());
    }
    match value {
        TypedValue::Text(raw) => coerce(raw, scalar),
        other => Err(invalid(&other.render(), scalar)),
    }
}

/// Convenience for string input against a scalar kind.
pub fn convert_str(raw: &str, kind: ScalarKind) -> Result<TypedValue, CoercionError> {
    convert(&TypedValue::Text(raw.to_string()), FieldKind::Scalar(kind))
}

fn invalid(raw: &str, kind: ScalarKind) -> CoercionError {
    CoercionError::InvalidValue {
        kind,
        raw: raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_accepts_digits_only() {
        assert_eq!(coerce("42", ScalarKind::Integer).unwrap(), TypedValue::Integer(42));
        for raw in ["4.2", "-1", " 1", "1 ", "", "+3", "1e3"] {
            assert!(!validate(raw, ScalarKind::Integer), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn integer_overflow_is_invalid() {
        let raw = "99999999999999999999";
        assert!(!validate(raw, ScalarKind::Integer));
        assert!(coerce(raw, ScalarKind::Integer).is_err());
    }

    #[test]
    #[allow(clippy::approx_constant)]
    fn float_requires_fraction() {
        assert_eq!(coerce("3.14", ScalarKind::Float).unwrap(), TypedValue::Float(3.14));
        for raw in ["3", ".5", "5.", "-1.0", "1e3", "1.0e3", "1.0\n"] {
            assert!(!validate(raw, ScalarKind::Float), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn float_overflowing_to_infinity_is_rejected() {
        let raw = format!("{}.0", "9".repeat(400));
        assert!(!validate(&raw, ScalarKind::Float));
        assert!(matches!(
            coerce(&raw, ScalarKind::Float),
            Err(CoercionError::InvalidValue { kind: ScalarKind::Float, .. })
        ));
        assert_eq!(
            coerce("1.5", ScalarKind::Float).unwrap(),
            TypedValue::Float(1.5)
        );
    }

    #[test]
    fn boolean_is_case_insensitive() {
        assert_eq!(coerce("True", ScalarKind::Boolean).unwrap(), TypedValue::Boolean(true));
        assert_eq!(coerce("FALSE", ScalarKind::Boolean).unwrap(), TypedValue::Boolean(false));
        assert!(!validate("yes", ScalarKind::Boolean));
        assert!(!validate("1", ScalarKind::Boolean));
    }

    #[test]
    fn text_is_identity() {
        assert_eq!(coerce("", ScalarKind::Text).unwrap(), TypedValue::Text(String::new()));
        assert_eq!(
            coerce(" spaced ", ScalarKind::Text).unwrap(),
            TypedValue::Text(" spaced ".into())
        );
    }

    #[test]
    fn validate_agrees_with_coerce() {
        let samples = [
            "", "0", "42", "007", "4.2", "3.", "true", "False", "yes", "abc", "1.5", "-2",
        ];
        for kind in ScalarKind::ALL {
            for raw in samples {
                assert_eq!(
                    validate(raw, kind),
                    coerce(raw, kind).is_ok(),
                    "{kind} / {raw:?}"
                );
            }
        }
    }

    #[test]
    fn rendering_round_trips() {
        for flag in [true, false] {
            let value = TypedValue::Boolean(flag);
            assert_eq!(coerce(&value.render(), ScalarKind::Boolean).unwrap(), value);
        }
        for n in [0_i64, 7, 40, i64::MAX] {
            assert_eq!(
                coerce(&n.to_string(), ScalarKind::Integer).unwrap(),
                TypedValue::Integer(n)
            );
        }
        let value = TypedValue::Float(30.0);
        assert_eq!(coerce(&value.render(), ScalarKind::Float).unwrap(), value);
    }

    #[test]
    fn convert_passes_native_values_through() {
        let value = TypedValue::Integer(5);
        assert_eq!(
            convert(&value, FieldKind::Scalar(ScalarKind::Integer)).unwrap(),
            value
        );
        assert_eq!(
            convert(&TypedValue::Boolean(true), FieldKind::Scalar(ScalarKind::Integer)),
            Err(CoercionError::InvalidValue {
                kind: ScalarKind::Integer,
                raw: "true".into(),
            })
        );
    }

    #[test]
    fn convert_rejects_list_kinds() {
        let err = convert(&TypedValue::from("1"), FieldKind::List(ScalarKind::Integer));
        assert_eq!(
            err,
            Err(CoercionError::UnsupportedKind {
                kind: "list[int]".into()
            })
        );
        assert!(matches!(
            "complex".parse::<ScalarKind>(),
            Err(CoercionError::UnsupportedKind { .. })
        ));
    }

    #[test]
    fn convert_str_reports_invalid_value() {
        assert_eq!(
            convert_str("4.2", ScalarKind::Integer),
            Err(CoercionError::InvalidValue {
                kind: ScalarKind::Integer,
                raw: "4.2".into(),
            })
        );
    }
}
