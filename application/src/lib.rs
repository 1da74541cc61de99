//! Application layer for miniflux-mcp
//!
//! This crate contains the feed reader port, the tool registry and catalog,
//! and the dispatch use case. It depends only on the domain layer.

pub mod ports;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod tools;
pub mod use_cases;

// Re-export commonly used types
pub use ports::feed_reader::{ClientError, ClientResult, FeedReaderClient};
pub use tools::{
    HandlerBinding, HandlerFuture, RegistryError, ToolHandler, ToolRegistry, build_registry,
};
pub use use_cases::dispatch_tool::DispatchToolUseCase;
