//! Tool domain module
//!
//! This module defines the core abstractions of the **tool-dispatch core**:
//! how a named, loosely-typed invocation from an agent becomes a validated,
//! strongly-typed call.
//!
//! # Overview
//!
//! ```text
//! ┌────────────────┐   ┌──────────────┐   ┌────────────────┐   ┌──────────────────┐
//! │ ToolDescriptor │──▶│ ToolCall     │──▶│ TypedArguments │──▶│ InvocationResult │
//! │ (name, schema) │   │ (raw bag)    │   │ (validated)    │   │ Success/Failure  │
//! └────────────────┘   └──────────────┘   └────────────────┘   └──────────────────┘
//! ```
//!
//! - [`ToolDescriptor`]: static name / description / [`Schema`] triple
//! - [`ToolCall`]: an invocation with a raw JSON argument bag
//! - [`validate_arguments`]: the one generic validate-and-coerce routine
//! - [`TypedArguments`]: what handlers receive
//! - [`ToolOutput`] / [`ToolFailure`]: what handlers return
//! - [`InvocationResult`]: what the transport receives
//!
//! Everything here is pure; handlers and the registry live in the
//! application layer.

pub mod arguments;
pub mod entities;
pub mod schema;
pub mod traits;
pub mod validation;
pub mod value_objects;

pub use arguments::{ArgumentValue, MissingArgument, TypedArguments};
pub use entities::{ToolCall, ToolDescriptor};
pub use schema::{ArgumentSpec, ArgumentType, Schema};
pub use traits::{DefaultToolValidator, ToolValidator};
pub use validation::{ValidationError, narrow_to_i64, undeclared_arguments, validate_arguments};
pub use value_objects::{InvocationResult, ToolFailure, ToolOutput};
