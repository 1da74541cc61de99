//! Domain layer for miniflux-mcp
//!
//! This crate contains the pure parts of the adapter: tool descriptors,
//! argument schemas and their validation, invocation outcomes, and the
//! feed-reader entities. It has no dependencies on I/O, transports or the
//! HTTP client.
//!
//! # Core Concepts
//!
//! - **Tool**: a named, schema-described remote operation exposed to an agent
//! - **Invocation**: one request to run a tool with a raw argument bag
//! - **Validation**: the single generic step that turns a raw bag into
//!   [`TypedArguments`] before any network I/O happens

pub mod feed;
pub mod tool;

// Re-export commonly used types
pub use feed::{
    ApiKey, Category, Enclosure, Entry, EntryFilter, EntryResultSet, EntryStatus, Feed,
    FeedCounters, FeedCreated, FeedCreationRequest, FeedIcon, Remote, Subscription, User,
    UserCreationRequest, VersionInfo,
};
pub use tool::{
    ArgumentSpec, ArgumentType, DefaultToolValidator, InvocationResult, Schema, ToolCall,
    ToolDescriptor, ToolFailure, ToolOutput, ToolValidator, TypedArguments, ValidationError,
    undeclared_arguments, validate_arguments,
};
