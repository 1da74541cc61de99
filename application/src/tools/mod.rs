//! Tool registry and catalog
//!
//! - [`registry`]: name-unique, ordered collection of handler bindings
//! - [`catalog`]: the static table of every exposed tool
//! - `handlers`: one async function per tool

pub mod catalog;
mod handlers;
pub mod registry;

pub use catalog::build_registry;
pub use registry::{HandlerBinding, HandlerFuture, RegistryError, ToolHandler, ToolRegistry};
