//! Argument schema for tool descriptors
//!
//! A [`Schema`] is an ordered list of [`ArgumentSpec`]s. The order is the
//! order arguments are validated in and the order they are advertised to the
//! transport, so the first violation reported is always deterministic.

use serde::{Deserialize, Serialize};

/// Dynamic type an argument must have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgumentType {
    /// Whole number, narrowed to `i64`
    Integer,
    /// UTF-8 string, optionally restricted to an enumerated set
    String,
    /// `true` / `false`
    Boolean,
}

impl ArgumentType {
    /// Name used in validation messages and in the advertised JSON Schema.
    ///
    /// Integers are advertised as `number` because tool-calling clients send
    /// generic JSON numbers; the dispatcher narrows them itself.
    pub fn as_str(&self) -> &'static str {
        match self {
            ArgumentType::Integer => "number",
            ArgumentType::String => "string",
            ArgumentType::Boolean => "boolean",
        }
    }
}

impl std::fmt::Display for ArgumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Specification of a single named argument
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentSpec {
    /// Argument name as it appears in the argument bag
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Expected dynamic type
    pub arg_type: ArgumentType,
    /// Whether the argument must be present
    pub required: bool,
    /// Legal values for string arguments (`None` = any string)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed: Option<Vec<String>>,
}

impl ArgumentSpec {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        arg_type: ArgumentType,
        required: bool,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            arg_type,
            required,
            allowed: None,
        }
    }

    pub fn integer(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self::new(name, description, ArgumentType::Integer, required)
    }

    pub fn string(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self::new(name, description, ArgumentType::String, required)
    }

    pub fn boolean(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self::new(name, description, ArgumentType::Boolean, required)
    }

    /// Restrict a string argument to an enumerated set of values
    pub fn with_allowed<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Whether `value` is legal for this argument's enumeration
    pub fn allows(&self, value: &str) -> bool {
        match &self.allowed {
            Some(values) => values.iter().any(|v| v == value),
            None => true,
        }
    }
}

/// Declarative shape of a tool's argument bag
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    arguments: Vec<ArgumentSpec>,
}

impl Schema {
    /// A schema that accepts no arguments
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_argument(mut self, spec: ArgumentSpec) -> Self {
        self.arguments.push(spec);
        self
    }

    pub fn arguments(&self) -> &[ArgumentSpec] {
        &self.arguments
    }

    pub fn get(&self, name: &str) -> Option<&ArgumentSpec> {
        self.arguments.iter().find(|a| a.name == name)
    }

    pub fn required(&self) -> impl Iterator<Item = &ArgumentSpec> {
        self.arguments.iter().filter(|a| a.required)
    }

    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }

    /// Render as a JSON Schema object for capability advertisement.
    ///
    /// Property order follows declaration order.
    pub fn to_json_schema(&self) -> serde_json::Value {
        let mut properties = serde_json::Map::new();
        let mut required = Vec::new();

        for arg in &self.arguments {
            let mut prop = serde_json::Map::new();
            prop.insert("type".to_string(), serde_json::json!(arg.arg_type.as_str()));
            prop.insert("description".to_string(), serde_json::json!(arg.description));
            if let Some(values) = &arg.allowed {
                prop.insert("enum".to_string(), serde_json::json!(values));
            }
            properties.insert(arg.name.clone(), serde_json::Value::Object(prop));

            if arg.required {
                required.push(serde_json::json!(arg.name));
            }
        }

        let mut schema = serde_json::Map::new();
        schema.insert("type".to_string(), serde_json::json!("object"));
        schema.insert("properties".to_string(), serde_json::Value::Object(properties));
        if !required.is_empty() {
            schema.insert("required".to_string(), serde_json::Value::Array(required));
        }
        serde_json::Value::Object(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_schema() -> Schema {
        Schema::empty()
            .with_argument(ArgumentSpec::integer("entry_id", "The ID of the entry", true))
            .with_argument(
                ArgumentSpec::string("status", "New status", true)
                    .with_allowed(["read", "unread", "removed"]),
            )
            .with_argument(ArgumentSpec::boolean("starred", "Starred only", false))
    }

    #[test]
    fn test_argument_type_names() {
        assert_eq!(ArgumentType::Integer.to_string(), "number");
        assert_eq!(ArgumentType::String.to_string(), "string");
        assert_eq!(ArgumentType::Boolean.to_string(), "boolean");
    }

    #[test]
    fn test_allows_without_enumeration() {
        let spec = ArgumentSpec::string("title", "Title", true);
        assert!(spec.allows("anything at all"));
    }

    #[test]
    fn test_allows_with_enumeration() {
        let schema = status_schema();
        let status = schema.get("status").unwrap();
        assert!(status.allows("read"));
        assert!(status.allows("removed"));
        assert!(!status.allows("archived"));
        assert!(!status.allows("READ"));
    }

    #[test]
    fn test_required_iterates_in_declaration_order() {
        let schema = status_schema();
        let names: Vec<_> = schema.required().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["entry_id", "status"]);
    }

    #[test]
    fn test_to_json_schema() {
        let json = status_schema().to_json_schema();

        assert_eq!(json["type"], "object");
        assert_eq!(json["properties"]["entry_id"]["type"], "number");
        assert_eq!(json["properties"]["status"]["enum"][2], "removed");
        assert_eq!(json["properties"]["starred"]["type"], "boolean");
        assert!(json["properties"]["starred"].get("enum").is_none());

        let required = json["required"].as_array().unwrap();
        assert_eq!(required.len(), 2);
        assert_eq!(required[0], "entry_id");

        let keys: Vec<_> = json["properties"].as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["entry_id", "status", "starred"]);
    }

    #[test]
    fn test_empty_schema_omits_required() {
        let json = Schema::empty().to_json_schema();
        assert_eq!(json["type"], "object");
        assert!(json["properties"].as_object().unwrap().is_empty());
        assert!(json.get("required").is_none());
    }
}
