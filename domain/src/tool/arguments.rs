//! Validated, strongly-typed tool arguments
//!
//! [`TypedArguments`] is produced only by the validator, so a handler that
//! receives one can rely on every required argument being present with the
//! declared type. Optional arguments absent from the bag are simply missing.

use std::collections::HashMap;

/// A coerced argument value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentValue {
    Integer(i64),
    String(String),
    Boolean(bool),
}

/// Typed projection of an argument bag, scoped to one invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypedArguments {
    values: HashMap<String, ArgumentValue>,
}

impl TypedArguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: ArgumentValue) {
        self.values.insert(name.into(), value);
    }

    pub fn with(mut self, name: impl Into<String>, value: ArgumentValue) -> Self {
        self.insert(name, value);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get an optional integer argument
    pub fn get_i64(&self, name: &str) -> Option<i64> {
        match self.values.get(name) {
            Some(ArgumentValue::Integer(v)) => Some(*v),
            _ => None,
        }
    }

    /// Get an optional string argument
    pub fn get_str(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(ArgumentValue::String(v)) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Get an optional boolean argument
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        match self.values.get(name) {
            Some(ArgumentValue::Boolean(v)) => Some(*v),
            _ => None,
        }
    }

    /// Get a required integer argument.
    ///
    /// Only fails if the schema and the handler disagree about the argument,
    /// which is a catalog bug rather than a caller error.
    pub fn require_i64(&self, name: &str) -> Result<i64, MissingArgument> {
        self.get_i64(name).ok_or_else(|| MissingArgument(name.to_string()))
    }

    /// Get a required string argument
    pub fn require_str(&self, name: &str) -> Result<&str, MissingArgument> {
        self.get_str(name).ok_or_else(|| MissingArgument(name.to_string()))
    }
}

/// A handler asked for an argument its schema does not guarantee
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0} is required")]
pub struct MissingArgument(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_getters() {
        let args = TypedArguments::new()
            .with("feed_id", ArgumentValue::Integer(42))
            .with("status", ArgumentValue::String("unread".into()))
            .with("crawler", ArgumentValue::Boolean(true));

        assert_eq!(args.get_i64("feed_id"), Some(42));
        assert_eq!(args.get_str("status"), Some("unread"));
        assert_eq!(args.get_bool("crawler"), Some(true));
        assert_eq!(args.len(), 3);
    }

    #[test]
    fn test_getters_do_not_cross_types() {
        let args = TypedArguments::new().with("feed_id", ArgumentValue::Integer(42));

        assert_eq!(args.get_str("feed_id"), None);
        assert_eq!(args.get_bool("feed_id"), None);
    }

    #[test]
    fn test_require_missing() {
        let args = TypedArguments::new();

        let err = args.require_i64("entry_id").unwrap_err();
        assert_eq!(err.to_string(), "entry_id is required");
        assert!(args.require_str("title").is_err());
        assert!(args.is_empty());
    }
}
