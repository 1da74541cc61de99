//! Tool domain entities

use super::schema::{ArgumentSpec, Schema};
use serde::{Deserialize, Serialize};

/// Static description of a tool: name, human description and argument schema
///
/// Identity is the name. Descriptors are built once when the catalog is
/// assembled and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Unique, stable identifier (e.g., "get_feed")
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Argument schema
    pub schema: Schema,
}

impl ToolDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            schema: Schema::empty(),
        }
    }

    pub fn with_argument(mut self, spec: ArgumentSpec) -> Self {
        self.schema = self.schema.with_argument(spec);
        self
    }

    /// JSON Schema of the argument bag, as advertised to clients
    pub fn input_schema(&self) -> serde_json::Value {
        self.schema.to_json_schema()
    }
}

/// A call to a tool with a raw, untrusted argument bag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Name of the tool to call
    pub tool_name: String,
    /// Arguments exactly as received from the transport
    #[serde(default)]
    pub arguments: serde_json::Value,
}

impl ToolCall {
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            arguments: serde_json::Value::Null,
        }
    }

    pub fn with_arguments(mut self, arguments: serde_json::Value) -> Self {
        self.arguments = arguments;
        self
    }

    /// Add one argument, turning a null bag into an object
    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        if self.arguments.is_null() {
            self.arguments = serde_json::Value::Object(serde_json::Map::new());
        }
        if let Some(map) = self.arguments.as_object_mut() {
            map.insert(key.into(), value.into());
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_descriptor() {
        let tool = ToolDescriptor::new("get_feed", "Get a specific feed by ID")
            .with_argument(ArgumentSpec::integer("feed_id", "The ID of the feed", true));

        assert_eq!(tool.name, "get_feed");
        assert_eq!(tool.schema.arguments().len(), 1);
        assert_eq!(tool.input_schema()["required"][0], "feed_id");
    }

    #[test]
    fn test_tool_call_with_arg() {
        let call = ToolCall::new("get_feed").with_arg("feed_id", 3);

        assert_eq!(call.tool_name, "get_feed");
        assert_eq!(call.arguments["feed_id"], 3);
    }

    #[test]
    fn test_tool_call_defaults_to_null_bag() {
        let call: ToolCall = serde_json::from_value(serde_json::json!({
            "tool_name": "get_feeds"
        }))
        .unwrap();
        assert!(call.arguments.is_null());
    }

    #[test]
    fn test_with_arg_leaves_non_object_bag_untouched() {
        let call = ToolCall::new("get_feed")
            .with_arguments(serde_json::json!([1, 2]))
            .with_arg("feed_id", 3);
        assert!(call.arguments.is_array());
    }
}
