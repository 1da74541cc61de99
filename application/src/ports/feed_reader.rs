//! Feed reader client port
//!
//! Defines the interface for talking to the remote feed-reader service.
//! One typed method per supported remote operation; transport, auth and
//! timeouts are the adapter's business.

use async_trait::async_trait;
use miniflux_mcp_domain::{
    ApiKey, Category, Enclosure, Entry, EntryFilter, EntryResultSet, EntryStatus, Feed,
    FeedCounters, FeedCreated, FeedCreationRequest, FeedIcon, Remote, Subscription,
    User, UserCreationRequest, VersionInfo,
};
use thiserror::Error;

/// Errors that can occur when calling the remote service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("unauthorized (bad credentials)")]
    Unauthorized,

    #[error("access forbidden")]
    Forbidden,

    #[error("resource not found")]
    NotFound,

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("invalid response: {0}")]
    Decode(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Gateway to the remote feed-reader service
///
/// This port defines how the application layer reaches the service.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait FeedReaderClient: Send + Sync {
    // Feeds
    async fn feeds(&self) -> ClientResult<Remote<Vec<Feed>>>;
    async fn feed(&self, feed_id: i64) -> ClientResult<Remote<Feed>>;
    async fn create_feed(&self, request: &FeedCreationRequest) -> ClientResult<Remote<FeedCreated>>;
    async fn delete_feed(&self, feed_id: i64) -> ClientResult<()>;
    async fn refresh_feed(&self, feed_id: i64) -> ClientResult<()>;
    async fn refresh_all_feeds(&self) -> ClientResult<()>;
    async fn feed_entries(&self, feed_id: i64, filter: &EntryFilter) -> ClientResult<Remote<EntryResultSet>>;
    async fn feed_entry(&self, feed_id: i64, entry_id: i64) -> ClientResult<Remote<Entry>>;
    async fn feed_icon(&self, feed_id: i64) -> ClientResult<Remote<FeedIcon>>;
    async fn mark_feed_as_read(&self, feed_id: i64) -> ClientResult<()>;

    // Entries
    async fn entries(&self, filter: &EntryFilter) -> ClientResult<Remote<EntryResultSet>>;
    async fn entry(&self, entry_id: i64) -> ClientResult<Remote<Entry>>;
    async fn update_entries(&self, entry_ids: &[i64], status: EntryStatus) -> ClientResult<()>;
    async fn toggle_bookmark(&self, entry_id: i64) -> ClientResult<()>;
    async fn save_entry(&self, entry_id: i64) -> ClientResult<()>;
    /// Fetch the original article through the service's scraper.
    ///
    /// Returns the document body, not JSON.
    async fn fetch_original_content(&self, entry_id: i64) -> ClientResult<String>;
    async fn mark_all_as_read(&self, user_id: i64) -> ClientResult<()>;

    // Categories
    async fn categories(&self) -> ClientResult<Remote<Vec<Category>>>;
    async fn create_category(&self, title: &str) -> ClientResult<Remote<Category>>;
    async fn update_category(&self, category_id: i64, title: &str) -> ClientResult<Remote<Category>>;
    async fn delete_category(&self, category_id: i64) -> ClientResult<()>;
    async fn category_feeds(&self, category_id: i64) -> ClientResult<Remote<Vec<Feed>>>;
    async fn category_entries(
        &self,
        category_id: i64,
        filter: &EntryFilter,
    ) -> ClientResult<Remote<EntryResultSet>>;
    async fn category_entry(&self, category_id: i64, entry_id: i64) -> ClientResult<Remote<Entry>>;
    async fn mark_category_as_read(&self, category_id: i64) -> ClientResult<()>;
    async fn refresh_category(&self, category_id: i64) -> ClientResult<()>;

    // Users
    async fn users(&self) -> ClientResult<Remote<Vec<User>>>;
    async fn me(&self) -> ClientResult<Remote<User>>;
    async fn user_by_id(&self, user_id: i64) -> ClientResult<Remote<User>>;
    async fn user_by_username(&self, username: &str) -> ClientResult<Remote<User>>;
    async fn create_user(&self, request: &UserCreationRequest) -> ClientResult<Remote<User>>;
    async fn delete_user(&self, user_id: i64) -> ClientResult<()>;

    // System
    async fn version(&self) -> ClientResult<Remote<VersionInfo>>;
    async fn healthcheck(&self) -> ClientResult<()>;
    async fn fetch_counters(&self) -> ClientResult<Remote<FeedCounters>>;
    async fn discover(&self, url: &str) -> ClientResult<Remote<Vec<Subscription>>>;
    /// OPML document of all subscriptions
    async fn export(&self) -> ClientResult<String>;
    async fn flush_history(&self) -> ClientResult<()>;

    // API keys
    async fn api_keys(&self) -> ClientResult<Remote<Vec<ApiKey>>>;
    async fn create_api_key(&self, description: &str) -> ClientResult<Remote<ApiKey>>;
    async fn delete_api_key(&self, api_key_id: i64) -> ClientResult<()>;

    // Media
    async fn icon(&self, icon_id: i64) -> ClientResult<Remote<FeedIcon>>;
    async fn enclosure(&self, enclosure_id: i64) -> ClientResult<Remote<Enclosure>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_display() {
        assert_eq!(ClientError::NotFound.to_string(), "resource not found");
        assert_eq!(
            ClientError::Server {
                status: 502,
                message: "upstream unavailable".to_string()
            }
            .to_string(),
            "server error (502): upstream unavailable"
        );
        assert_eq!(
            ClientError::BadRequest("invalid feed URL".to_string()).to_string(),
            "bad request: invalid feed URL"
        );
    }
}
