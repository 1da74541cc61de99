//! Dispatch Tool use case.
//!
//! Turns one `(tool name, raw argument bag)` invocation into an
//! [`InvocationResult`]:
//!
//! 1. Resolve the tool in the [`ToolRegistry`]
//! 2. Validate and coerce the bag against the tool's schema
//! 3. Invoke the bound handler with the typed arguments
//! 4. Render the handler's output, or its failure, as text
//!
//! Every failure, including a panicking handler, ends up as a
//! [`InvocationResult::Failure`]; nothing is propagated to the transport.

use crate::ports::feed_reader::FeedReaderClient;
use crate::tools::registry::ToolRegistry;
use futures::FutureExt;
use miniflux_mcp_domain::{
    DefaultToolValidator, InvocationResult, ToolCall, ToolValidator, undeclared_arguments,
};
use serde_json::Value;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, warn};

/// Use case for dispatching tool invocations.
///
/// Holds no per-invocation state; clones share the same registry and client.
pub struct DispatchToolUseCase {
    registry: Arc<ToolRegistry>,
    client: Arc<dyn FeedReaderClient>,
    validator: Arc<dyn ToolValidator>,
}

impl Clone for DispatchToolUseCase {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            client: self.client.clone(),
            validator: self.validator.clone(),
        }
    }
}

impl DispatchToolUseCase {
    pub fn new(registry: Arc<ToolRegistry>, client: Arc<dyn FeedReaderClient>) -> Self {
        Self {
            registry,
            client,
            validator: Arc::new(DefaultToolValidator),
        }
    }

    /// The registry this dispatcher resolves tools in.
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Dispatch a [`ToolCall`].
    pub async fn execute(&self, call: &ToolCall) -> InvocationResult {
        self.dispatch(&call.tool_name, &call.arguments).await
    }

    /// Dispatch one invocation by name.
    pub async fn dispatch(&self, name: &str, arguments: &Value) -> InvocationResult {
        debug!("Dispatching tool: {}", name);

        let Some(binding) = self.registry.lookup(name) else {
            warn!("Unknown tool requested: {}", name);
            return InvocationResult::failure(format!("unknown tool: {}", name));
        };

        let typed = match self.validator.validate(arguments, &binding.descriptor) {
            Ok(typed) => typed,
            Err(e) => {
                warn!("Tool {} rejected arguments: {}", name, e);
                return InvocationResult::failure(e.to_string());
            }
        };

        let ignored = undeclared_arguments(&binding.descriptor.schema, arguments);
        if !ignored.is_empty() {
            debug!("Tool {} ignoring undeclared arguments: {:?}", name, ignored);
        }

        let outcome = AssertUnwindSafe((binding.handler)(self.client.as_ref(), typed))
            .catch_unwind()
            .await;

        let rendered = match outcome {
            Ok(result) => result.and_then(|output| output.render()),
            Err(_) => {
                warn!("Tool {} panicked", name);
                return InvocationResult::failure(format!("tool {} panicked", name));
            }
        };

        match rendered {
            Ok(text) => {
                debug!("Tool {} succeeded ({} bytes)", name, text.len());
                InvocationResult::success(text)
            }
            Err(e) => {
                warn!("Tool {} failed: {}", name, e);
                InvocationResult::failure(e.to_string())
            }
        }
    }
}
