//! Schema-driven argument validation and coercion
//!
//! [`validate_arguments`] is the single routine that turns a raw argument
//! bag into [`TypedArguments`]. Every tool goes through it; handlers never
//! re-check their inputs.
//!
//! # Rules
//!
//! | Input | Outcome |
//! |-------|---------|
//! | bag is neither an object nor `null` | `Invalid arguments format` |
//! | required argument absent or `null` | `<name> is required` |
//! | value of the wrong JSON type | `<name> must be a <type>` |
//! | integer argument, non-integral number | truncated toward zero |
//! | integer argument outside the `i64` range | `<name> must be a number` |
//! | string outside a declared enumeration | `<name> must be one of: ...` |
//! | optional argument absent or `null` | omitted |
//! | argument not in the schema | ignored |
//!
//! Arguments are checked in schema declaration order and the first violation
//! is reported.

use super::arguments::{ArgumentValue, TypedArguments};
use super::schema::{ArgumentSpec, ArgumentType, Schema};
use serde_json::Value;
use thiserror::Error;

/// Why an argument bag was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid arguments format")]
    InvalidFormat,

    #[error("{0} is required")]
    Missing(String),

    #[error("{name} must be a {expected}")]
    WrongType { name: String, expected: ArgumentType },

    #[error("{name} must be one of: {}", .allowed.join(", "))]
    NotAllowed { name: String, allowed: Vec<String> },
}

impl ValidationError {
    /// Name of the offending argument, if the error concerns one
    pub fn argument(&self) -> Option<&str> {
        match self {
            ValidationError::InvalidFormat => None,
            ValidationError::Missing(name)
            | ValidationError::WrongType { name, .. }
            | ValidationError::NotAllowed { name, .. } => Some(name),
        }
    }
}

/// Validate a raw argument bag against `schema` and coerce it.
pub fn validate_arguments(schema: &Schema, bag: &Value) -> Result<TypedArguments, ValidationError> {
    let empty = serde_json::Map::new();
    let map = match bag {
        Value::Object(map) => map,
        Value::Null => &empty,
        _ => return Err(ValidationError::InvalidFormat),
    };

    let mut typed = TypedArguments::new();
    for spec in schema.arguments() {
        match map.get(&spec.name) {
            None | Some(Value::Null) => {
                if spec.required {
                    return Err(ValidationError::Missing(spec.name.clone()));
                }
            }
            Some(value) => {
                typed.insert(spec.name.clone(), coerce(spec, value)?);
            }
        }
    }

    Ok(typed)
}

/// Names in `bag` that `schema` does not declare
pub fn undeclared_arguments<'a>(schema: &Schema, bag: &'a Value) -> Vec<&'a str> {
    bag.as_object()
        .map(|map| {
            map.keys()
                .filter(|k| schema.get(k).is_none())
                .map(String::as_str)
                .collect()
        })
        .unwrap_or_default()
}

fn coerce(spec: &ArgumentSpec, value: &Value) -> Result<ArgumentValue, ValidationError> {
    let wrong_type = || ValidationError::WrongType {
        name: spec.name.clone(),
        expected: spec.arg_type,
    };

    match spec.arg_type {
        ArgumentType::Integer => narrow_to_i64(value).map(ArgumentValue::Integer).ok_or_else(wrong_type),
        ArgumentType::Boolean => value.as_bool().map(ArgumentValue::Boolean).ok_or_else(wrong_type),
        ArgumentType::String => {
            let s = value.as_str().ok_or_else(wrong_type)?;
            if !spec.allows(s) {
                return Err(ValidationError::NotAllowed {
                    name: spec.name.clone(),
                    allowed: spec.allowed.clone().unwrap_or_default(),
                });
            }
            Ok(ArgumentValue::String(s.to_string()))
        }
    }
}

/// Narrow a JSON number to `i64`.
///
/// Integers already in range are taken as-is so large IDs keep full
/// precision. Anything else goes through `f64` and is truncated toward zero
/// (`3.9` → `3`, `-2.5` → `-2`), never rounded.
pub fn narrow_to_i64(value: &Value) -> Option<i64> {
    let Value::Number(number) = value else {
        return None;
    };

    if let Some(v) = number.as_i64() {
        return Some(v);
    }

    let truncated = number.as_f64()?.trunc();
    // i64::MAX as f64 rounds up to 2^63, hence the strict upper bound
    if truncated.is_finite() && truncated >= i64::MIN as f64 && truncated < i64::MAX as f64 {
        Some(truncated as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry_schema() -> Schema {
        Schema::empty()
            .with_argument(ArgumentSpec::integer("entry_id", "The ID of the entry", true))
            .with_argument(
                ArgumentSpec::string("status", "New status", true)
                    .with_allowed(["read", "unread", "removed"]),
            )
    }

    fn filter_schema() -> Schema {
        Schema::empty()
            .with_argument(ArgumentSpec::string("status", "Status filter", false))
            .with_argument(ArgumentSpec::integer("limit", "Limit", false))
            .with_argument(ArgumentSpec::boolean("crawler", "Crawler", false))
    }

    #[test]
    fn test_non_object_bag_is_invalid_format() {
        for bag in [json!([1, 2]), json!("feed_id"), json!(7), json!(true)] {
            let err = validate_arguments(&entry_schema(), &bag).unwrap_err();
            assert_eq!(err, ValidationError::InvalidFormat);
            assert_eq!(err.to_string(), "Invalid arguments format");
        }
    }

    #[test]
    fn test_null_bag_is_empty_object() {
        let err = validate_arguments(&entry_schema(), &Value::Null).unwrap_err();
        assert_eq!(err.to_string(), "entry_id is required");

        let typed = validate_arguments(&Schema::empty(), &Value::Null).unwrap();
        assert!(typed.is_empty());
    }

    #[test]
    fn test_missing_required() {
        let err = validate_arguments(&entry_schema(), &json!({"status": "read"})).unwrap_err();
        assert_eq!(err, ValidationError::Missing("entry_id".to_string()));
        assert_eq!(err.argument(), Some("entry_id"));
    }

    #[test]
    fn test_null_required_counts_as_missing() {
        let err = validate_arguments(&entry_schema(), &json!({"entry_id": null})).unwrap_err();
        assert_eq!(err.to_string(), "entry_id is required");
    }

    #[test]
    fn test_first_violation_in_declaration_order() {
        let err = validate_arguments(&entry_schema(), &json!({})).unwrap_err();
        assert_eq!(err.to_string(), "entry_id is required");

        let err = validate_arguments(&entry_schema(), &json!({"entry_id": 1})).unwrap_err();
        assert_eq!(err.to_string(), "status is required");
    }

    #[test]
    fn test_wrong_types() {
        let err = validate_arguments(&entry_schema(), &json!({"entry_id": "10", "status": "read"}))
            .unwrap_err();
        assert_eq!(err.to_string(), "entry_id must be a number");

        let err = validate_arguments(&entry_schema(), &json!({"entry_id": 10, "status": 1}))
            .unwrap_err();
        assert_eq!(err.to_string(), "status must be a string");

        let err = validate_arguments(&filter_schema(), &json!({"crawler": "yes"})).unwrap_err();
        assert_eq!(err.to_string(), "crawler must be a boolean");
    }

    #[test]
    fn test_enumeration_rejected() {
        let err = validate_arguments(&entry_schema(), &json!({"entry_id": 10, "status": "archived"}))
            .unwrap_err();
        assert_eq!(err.to_string(), "status must be one of: read, unread, removed");
    }

    #[test]
    fn test_open_string_accepts_anything() {
        let typed = validate_arguments(&filter_schema(), &json!({"status": "whatever"})).unwrap();
        assert_eq!(typed.get_str("status"), Some("whatever"));
    }

    #[test]
    fn test_optional_absent_is_omitted() {
        let typed = validate_arguments(&filter_schema(), &json!({"limit": null})).unwrap();
        assert!(!typed.contains("limit"));
        assert!(!typed.contains("status"));
        assert!(typed.is_empty());
    }

    #[test]
    fn test_undeclared_arguments_ignored() {
        let bag = json!({"entry_id": 5, "status": "read", "extra": 1});
        let typed = validate_arguments(&entry_schema(), &bag).unwrap();
        assert_eq!(typed.len(), 2);
        assert!(!typed.contains("extra"));
        assert_eq!(undeclared_arguments(&entry_schema(), &bag), vec!["extra"]);
    }

    #[test]
    fn test_narrowing_truncates_toward_zero() {
        assert_eq!(narrow_to_i64(&json!(3.0)), Some(3));
        assert_eq!(narrow_to_i64(&json!(3.9)), Some(3));
        assert_eq!(narrow_to_i64(&json!(-2.5)), Some(-2));
        assert_eq!(narrow_to_i64(&json!(0.4)), Some(0));
    }

    #[test]
    fn test_narrowing_keeps_large_integers_exact() {
        assert_eq!(narrow_to_i64(&json!(i64::MAX)), Some(i64::MAX));
        assert_eq!(narrow_to_i64(&json!(9_007_199_254_740_993_i64)), Some(9_007_199_254_740_993));
    }

    #[test]
    fn test_narrowing_rejects_out_of_range_and_non_numbers() {
        assert_eq!(narrow_to_i64(&json!(u64::MAX)), None);
        assert_eq!(narrow_to_i64(&json!(1e300)), None);
        assert_eq!(narrow_to_i64(&json!(-1e300)), None);
        assert_eq!(narrow_to_i64(&json!("3")), None);
        assert_eq!(narrow_to_i64(&json!(true)), None);
    }

    #[test]
    fn test_out_of_range_integer_is_wrong_type() {
        let err = validate_arguments(&entry_schema(), &json!({"entry_id": 1e30, "status": "read"}))
            .unwrap_err();
        assert_eq!(err.to_string(), "entry_id must be a number");
    }
}
