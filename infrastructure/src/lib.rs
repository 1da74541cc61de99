//! Infrastructure layer for miniflux-mcp
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod miniflux;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, Credentials, FileConfig, MinifluxSettings,
};
pub use miniflux::{MinifluxClient, MinifluxClientError};
