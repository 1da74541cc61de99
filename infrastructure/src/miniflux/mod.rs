//! Miniflux REST API adapter
//!
//! Implements the application's `FeedReaderClient` port over HTTP.

mod client;
mod error;

pub use client::{MinifluxClient, USER_AGENT};
pub use error::MinifluxClientError;
