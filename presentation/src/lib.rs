//! Presentation layer for miniflux-mcp
//!
//! This crate contains the CLI definition and the MCP stdio server that
//! exposes the tool registry to a tool-calling client.

pub mod cli;
pub mod mcp;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use mcp::{McpServer, McpServerError, ServerInfo};
