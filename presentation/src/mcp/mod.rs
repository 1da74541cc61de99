//! MCP stdio transport
//!
//! Exposes the tool registry to a tool-calling client over line-delimited
//! JSON-RPC 2.0 on stdin/stdout.

pub mod protocol;
pub mod server;

pub use protocol::{CallToolResult, McpTool, ServerInfo, ToolCallParams};
pub use server::{McpServer, McpServerError};
