//! Tool registry
//!
//! An ordered, name-unique collection of tool descriptors paired with their
//! handlers. Built once at startup and read-only afterwards.

use futures::future::BoxFuture;
use indexmap::IndexMap;
use miniflux_mcp_domain::{ToolDescriptor, ToolFailure, ToolOutput, TypedArguments};
use thiserror::Error;

use crate::ports::feed_reader::FeedReaderClient;

/// Future returned by a tool handler
pub type HandlerFuture<'a> = BoxFuture<'a, Result<ToolOutput, ToolFailure>>;

/// A tool handler: one typed remote call plus result shaping
///
/// Handlers only ever see arguments that already passed schema validation.
pub type ToolHandler = for<'a> fn(&'a dyn FeedReaderClient, TypedArguments) -> HandlerFuture<'a>;

/// Errors raised while assembling the registry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("tool already registered: {0}")]
    DuplicateTool(String),
}

/// A descriptor bound to the handler that implements it
#[derive(Clone)]
pub struct HandlerBinding {
    pub descriptor: ToolDescriptor,
    pub handler: ToolHandler,
}

impl HandlerBinding {
    pub fn new(descriptor: ToolDescriptor, handler: ToolHandler) -> Self {
        Self { descriptor, handler }
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }
}

impl std::fmt::Debug for HandlerBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerBinding")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

/// Name-unique, insertion-ordered set of tools
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: IndexMap<String, HandlerBinding>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tool. A name may only be registered once.
    pub fn register(&mut self, binding: HandlerBinding) -> Result<(), RegistryError> {
        if self.tools.contains_key(binding.name()) {
            return Err(RegistryError::DuplicateTool(binding.name().to_string()));
        }
        self.tools.insert(binding.name().to_string(), binding);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&HandlerBinding> {
        self.tools.get(name)
    }

    /// Descriptors in registration order
    pub fn list(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.tools.values().map(|binding| &binding.descriptor)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop<'a>(_client: &'a dyn FeedReaderClient, _args: TypedArguments) -> HandlerFuture<'a> {
        Box::pin(async { Ok(ToolOutput::text("ok")) })
    }

    fn binding(name: &str) -> HandlerBinding {
        HandlerBinding::new(ToolDescriptor::new(name, "test tool"), noop)
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = ToolRegistry::new();
        assert!(registry.is_empty());

        registry.register(binding("get_feeds")).unwrap();

        assert_eq!(registry.len(), 1);
        assert!(registry.lookup("get_feeds").is_some());
        assert!(registry.lookup("get_feed").is_none());
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = ToolRegistry::new();
        registry.register(binding("get_feed")).unwrap();

        let err = registry.register(binding("get_feed")).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateTool("get_feed".to_string()));
        assert_eq!(err.to_string(), "tool already registered: get_feed");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_list_keeps_insertion_order() {
        let mut registry = ToolRegistry::new();
        for name in ["zeta", "alpha", "mid"] {
            registry.register(binding(name)).unwrap();
        }

        let listed: Vec<_> = registry.list().map(|d| d.name.as_str()).collect();
        assert_eq!(listed, vec!["zeta", "alpha", "mid"]);
        assert_eq!(registry.names().collect::<Vec<_>>(), listed);
    }
}
