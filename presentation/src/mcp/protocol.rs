//! JSON-RPC / MCP protocol types for the stdio transport.
//!
//! This module defines the message structures exchanged with a
//! tool-calling client over line-delimited JSON-RPC 2.0.
//!
//! # Protocol Overview
//!
//! - **Requests**: client → server, carry an `id` (`initialize`, `tools/list`, `tools/call`, `ping`)
//! - **Notifications**: client → server, no `id` (`notifications/initialized`, `notifications/cancelled`)
//! - **Responses**: server → client, one per request, `result` or `error`

use miniflux_mcp_domain::{InvocationResult, ToolDescriptor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Value, json};

pub const JSONRPC_VERSION: &str = "2.0";

/// MCP protocol revision this server speaks
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Incoming JSON-RPC message (request or notification)
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(default)]
    pub jsonrpc: String,
    /// `None` for notifications; an explicit `"id": null` is a request
    #[serde(default, deserialize_with = "present")]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

/// Distinguishes a member that is present but `null` from an absent one
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

impl JsonRpcRequest {
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// JSON-RPC response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Value, error: RpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: None,
            error: Some(error),
        }
    }
}

/// JSON-RPC error object
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcError {
    pub const PARSE_ERROR: i64 = -32700;
    pub const INVALID_REQUEST: i64 = -32600;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INVALID_PARAMS: i64 = -32602;
    pub const INTERNAL_ERROR: i64 = -32603;

    fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn parse_error(detail: impl std::fmt::Display) -> Self {
        Self::new(Self::PARSE_ERROR, format!("Parse error: {}", detail))
    }

    pub fn invalid_request(detail: impl std::fmt::Display) -> Self {
        Self::new(Self::INVALID_REQUEST, format!("Invalid request: {}", detail))
    }

    pub fn method_not_found(method: &str) -> Self {
        Self::new(Self::METHOD_NOT_FOUND, format!("Method not found: {}", method))
    }

    pub fn invalid_params(detail: impl std::fmt::Display) -> Self {
        Self::new(Self::INVALID_PARAMS, format!("Invalid params: {}", detail))
    }

    pub fn internal_error(detail: impl std::fmt::Display) -> Self {
        Self::new(Self::INTERNAL_ERROR, format!("Internal error: {}", detail))
    }
}

/// Name and version reported in the `initialize` handshake
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

impl ServerInfo {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// Result of `initialize`
pub fn initialize_result(info: &ServerInfo) -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": { "listChanged": false }
        },
        "serverInfo": info,
    })
}

/// One entry of the `tools/list` result
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct McpTool {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

impl From<&ToolDescriptor> for McpTool {
    fn from(descriptor: &ToolDescriptor) -> Self {
        Self {
            name: descriptor.name.clone(),
            description: descriptor.description.clone(),
            input_schema: descriptor.input_schema(),
        }
    }
}

/// Params of `tools/call`
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallParams {
    pub name: String,
    /// Raw argument bag, validated later by the dispatcher
    #[serde(default)]
    pub arguments: Value,
}

/// Params of `notifications/cancelled`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelledParams {
    pub request_id: Value,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Text content block of a tool result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextContent {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: String,
}

/// Result of `tools/call`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallToolResult {
    pub content: Vec<TextContent>,
    pub is_error: bool,
}

impl From<InvocationResult> for CallToolResult {
    fn from(result: InvocationResult) -> Self {
        let (text, is_error) = match result {
            InvocationResult::Success(text) => (text, false),
            InvocationResult::Failure(text) => (text, true),
        };
        Self {
            content: vec![TextContent { kind: "text", text }],
            is_error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use miniflux_mcp_domain::ArgumentSpec;

    #[test]
    fn test_request_and_notification() {
        let request: JsonRpcRequest =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":7,"method":"tools/list"}"#).unwrap();
        assert!(!request.is_notification());
        assert_eq!(request.id, Some(json!(7)));

        let notification: JsonRpcRequest =
            serde_json::from_str(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
                .unwrap();
        assert!(notification.is_notification());
        assert!(notification.params.is_none());
    }

    #[test]
    fn test_null_id_is_still_a_request() {
        let request: JsonRpcRequest =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":null,"method":"ping"}"#).unwrap();
        assert!(!request.is_notification());
        assert_eq!(request.id, Some(Value::Null));
    }

    #[test]
    fn test_response_serialization_omits_absent_fields() {
        let ok = JsonRpcResponse::success(json!(1), json!({}));
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({"jsonrpc": "2.0", "id": 1, "result": {}})
        );

        let err = JsonRpcResponse::error(json!("abc"), RpcError::method_not_found("foo/bar"));
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({
                "jsonrpc": "2.0",
                "id": "abc",
                "error": {"code": -32601, "message": "Method not found: foo/bar"}
            })
        );
    }

    #[test]
    fn test_tool_entry_uses_camel_case_schema() {
        let descriptor = ToolDescriptor::new("get_feed", "Get a specific feed by ID").with_argument(
            ArgumentSpec::integer("feed_id", "The ID of the feed to retrieve", true),
        );

        let value = serde_json::to_value(McpTool::from(&descriptor)).unwrap();
        assert_eq!(value["name"], "get_feed");
        assert_eq!(value["inputSchema"]["properties"]["feed_id"]["type"], "number");
        assert_eq!(value["inputSchema"]["required"], json!(["feed_id"]));
    }

    #[test]
    fn test_call_result_marks_failures() {
        let failure = CallToolResult::from(InvocationResult::failure("feed_id is required"));
        assert_eq!(
            serde_json::to_value(&failure).unwrap(),
            json!({
                "content": [{"type": "text", "text": "feed_id is required"}],
                "isError": true
            })
        );

        let success = CallToolResult::from(InvocationResult::success("Healthcheck passed"));
        assert!(!success.is_error);
    }

    #[test]
    fn test_cancelled_params() {
        let params: CancelledParams =
            serde_json::from_value(json!({"requestId": 4, "reason": "user aborted"})).unwrap();
        assert_eq!(params.request_id, json!(4));
        assert_eq!(params.reason.as_deref(), Some("user aborted"));
    }
}
