//! In-memory test double for the feed reader port
//!
//! [`RecordingClient`] answers every remote call with an empty (default)
//! payload, records the method name and its parameters, and can be primed
//! with canned feed payloads, a forced failure, or feed lookups that never
//! complete. Enabled with the `testing` feature.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use miniflux_mcp_domain::{
    ApiKey, Category, Enclosure, Entry, EntryFilter, EntryResultSet, EntryStatus, Feed,
    FeedCounters, FeedCreated, FeedCreationRequest, FeedIcon, Remote, Subscription,
    User, UserCreationRequest, VersionInfo,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::ports::feed_reader::{ClientError, ClientResult, FeedReaderClient};

/// One remote call observed by [`RecordingClient`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: &'static str,
    pub params: Value,
}

/// Feed reader client that records calls instead of performing them
#[derive(Debug, Default)]
pub struct RecordingClient {
    calls: Mutex<Vec<RecordedCall>>,
    feeds: Vec<Value>,
    failure: Option<ClientError>,
    hang_on_feed: bool,
}

impl RecordingClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve a raw feed payload from `feeds` and `feed(id)`, as the service would send it
    pub fn with_feed(mut self, payload: Value) -> Self {
        self.feeds.push(payload);
        self
    }

    /// Make `feed(id)` record the call and then never complete
    pub fn hanging_on_feed(mut self) -> Self {
        self.hang_on_feed = true;
        self
    }

    /// Make every call fail with `error` (calls are still recorded)
    pub fn failing_with(mut self, error: ClientError) -> Self {
        self.failure = Some(error);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn last_call(&self) -> Option<RecordedCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    fn record(&self, method: &'static str, params: Value) -> ClientResult<()> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedCall { method, params });
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn answer<T: Default + Serialize>(
        &self,
        method: &'static str,
        params: Value,
    ) -> ClientResult<Remote<T>> {
        self.record(method, params)?;
        remote(T::default())
    }
}

fn remote<T: Serialize>(value: T) -> ClientResult<Remote<T>> {
    Remote::new(value).map_err(|e| ClientError::Decode(e.to_string()))
}

fn decode<T: DeserializeOwned>(raw: Value) -> ClientResult<Remote<T>> {
    Remote::from_raw(raw).map_err(|e| ClientError::Decode(e.to_string()))
}

fn filter_params(filter: &EntryFilter) -> Value {
    json!({
        "status": filter.status.map(|s| s.as_str()),
        "feed_id": filter.feed_id,
        "limit": filter.limit,
        "offset": filter.offset,
    })
}

#[async_trait]
impl FeedReaderClient for RecordingClient {
    async fn feeds(&self) -> ClientResult<Remote<Vec<Feed>>> {
        self.record("feeds", Value::Null)?;
        decode(Value::Array(self.feeds.clone()))
    }

    async fn feed(&self, feed_id: i64) -> ClientResult<Remote<Feed>> {
        self.record("feed", json!({ "feed_id": feed_id }))?;
        if self.hang_on_feed {
            futures::future::pending::<()>().await;
        }
        let payload = self
            .feeds
            .iter()
            .find(|feed| feed["id"] == feed_id)
            .cloned()
            .ok_or(ClientError::NotFound)?;
        decode(payload)
    }

    async fn create_feed(&self, request: &FeedCreationRequest) -> ClientResult<Remote<FeedCreated>> {
        let params = serde_json::to_value(request).map_err(|e| ClientError::Decode(e.to_string()))?;
        self.record("create_feed", params)?;
        remote(FeedCreated { feed_id: 1 })
    }

    async fn delete_feed(&self, feed_id: i64) -> ClientResult<()> {
        self.record("delete_feed", json!({ "feed_id": feed_id }))
    }

    async fn refresh_feed(&self, feed_id: i64) -> ClientResult<()> {
        self.record("refresh_feed", json!({ "feed_id": feed_id }))
    }

    async fn refresh_all_feeds(&self) -> ClientResult<()> {
        self.record("refresh_all_feeds", Value::Null)
    }

    async fn feed_entries(&self, feed_id: i64, filter: &EntryFilter) -> ClientResult<Remote<EntryResultSet>> {
        let mut params = filter_params(filter);
        params["feed_id"] = json!(feed_id);
        self.answer("feed_entries", params)
    }

    async fn feed_entry(&self, feed_id: i64, entry_id: i64) -> ClientResult<Remote<Entry>> {
        self.answer("feed_entry", json!({ "feed_id": feed_id, "entry_id": entry_id }))
    }

    async fn feed_icon(&self, feed_id: i64) -> ClientResult<Remote<FeedIcon>> {
        self.answer("feed_icon", json!({ "feed_id": feed_id }))
    }

    async fn mark_feed_as_read(&self, feed_id: i64) -> ClientResult<()> {
        self.record("mark_feed_as_read", json!({ "feed_id": feed_id }))
    }

    async fn entries(&self, filter: &EntryFilter) -> ClientResult<Remote<EntryResultSet>> {
        self.answer("entries", filter_params(filter))
    }

    async fn entry(&self, entry_id: i64) -> ClientResult<Remote<Entry>> {
        self.answer("entry", json!({ "entry_id": entry_id }))
    }

    async fn update_entries(&self, entry_ids: &[i64], status: EntryStatus) -> ClientResult<()> {
        self.record(
            "update_entries",
            json!({ "entry_ids": entry_ids, "status": status.as_str() }),
        )
    }

    async fn toggle_bookmark(&self, entry_id: i64) -> ClientResult<()> {
        self.record("toggle_bookmark", json!({ "entry_id": entry_id }))
    }

    async fn save_entry(&self, entry_id: i64) -> ClientResult<()> {
        self.record("save_entry", json!({ "entry_id": entry_id }))
    }

    async fn fetch_original_content(&self, entry_id: i64) -> ClientResult<String> {
        self.record("fetch_original_content", json!({ "entry_id": entry_id }))?;
        Ok(format!("<p>original content of entry {}</p>", entry_id))
    }

    async fn mark_all_as_read(&self, user_id: i64) -> ClientResult<()> {
        self.record("mark_all_as_read", json!({ "user_id": user_id }))
    }

    async fn categories(&self) -> ClientResult<Remote<Vec<Category>>> {
        self.answer("categories", Value::Null)
    }

    async fn create_category(&self, title: &str) -> ClientResult<Remote<Category>> {
        self.record("create_category", json!({ "title": title }))?;
        remote(Category {
            id: 1,
            title: title.to_string(),
            ..Default::default()
        })
    }

    async fn update_category(&self, category_id: i64, title: &str) -> ClientResult<Remote<Category>> {
        self.record(
            "update_category",
            json!({ "category_id": category_id, "title": title }),
        )?;
        remote(Category {
            id: category_id,
            title: title.to_string(),
            ..Default::default()
        })
    }

    async fn delete_category(&self, category_id: i64) -> ClientResult<()> {
        self.record("delete_category", json!({ "category_id": category_id }))
    }

    async fn category_feeds(&self, category_id: i64) -> ClientResult<Remote<Vec<Feed>>> {
        self.answer("category_feeds", json!({ "category_id": category_id }))
    }

    async fn category_entries(
        &self,
        category_id: i64,
        filter: &EntryFilter,
    ) -> ClientResult<Remote<EntryResultSet>> {
        let mut params = filter_params(filter);
        params["category_id"] = json!(category_id);
        self.answer("category_entries", params)
    }

    async fn category_entry(&self, category_id: i64, entry_id: i64) -> ClientResult<Remote<Entry>> {
        self.answer(
            "category_entry",
            json!({ "category_id": category_id, "entry_id": entry_id }),
        )
    }

    async fn mark_category_as_read(&self, category_id: i64) -> ClientResult<()> {
        self.record("mark_category_as_read", json!({ "category_id": category_id }))
    }

    async fn refresh_category(&self, category_id: i64) -> ClientResult<()> {
        self.record("refresh_category", json!({ "category_id": category_id }))
    }

    async fn users(&self) -> ClientResult<Remote<Vec<User>>> {
        self.answer("users", Value::Null)
    }

    async fn me(&self) -> ClientResult<Remote<User>> {
        self.answer("me", Value::Null)
    }

    async fn user_by_id(&self, user_id: i64) -> ClientResult<Remote<User>> {
        self.answer("user_by_id", json!({ "user_id": user_id }))
    }

    async fn user_by_username(&self, username: &str) -> ClientResult<Remote<User>> {
        self.answer("user_by_username", json!({ "username": username }))
    }

    async fn create_user(&self, request: &UserCreationRequest) -> ClientResult<Remote<User>> {
        let params = serde_json::to_value(request).map_err(|e| ClientError::Decode(e.to_string()))?;
        self.record("create_user", params)?;
        remote(User {
            id: 1,
            username: request.username.clone(),
            is_admin: request.is_admin,
            ..Default::default()
        })
    }

    async fn delete_user(&self, user_id: i64) -> ClientResult<()> {
        self.record("delete_user", json!({ "user_id": user_id }))
    }

    async fn version(&self) -> ClientResult<Remote<VersionInfo>> {
        self.answer("version", Value::Null)
    }

    async fn healthcheck(&self) -> ClientResult<()> {
        self.record("healthcheck", Value::Null)
    }

    async fn fetch_counters(&self) -> ClientResult<Remote<FeedCounters>> {
        self.answer("fetch_counters", Value::Null)
    }

    async fn discover(&self, url: &str) -> ClientResult<Remote<Vec<Subscription>>> {
        self.answer("discover", json!({ "url": url }))
    }

    async fn export(&self) -> ClientResult<String> {
        self.record("export", Value::Null)?;
        Ok("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<opml version=\"2.0\"></opml>".to_string())
    }

    async fn flush_history(&self) -> ClientResult<()> {
        self.record("flush_history", Value::Null)
    }

    async fn api_keys(&self) -> ClientResult<Remote<Vec<ApiKey>>> {
        self.answer("api_keys", Value::Null)
    }

    async fn create_api_key(&self, description: &str) -> ClientResult<Remote<ApiKey>> {
        self.answer("create_api_key", json!({ "description": description }))
    }

    async fn delete_api_key(&self, api_key_id: i64) -> ClientResult<()> {
        self.record("delete_api_key", json!({ "api_key_id": api_key_id }))
    }

    async fn icon(&self, icon_id: i64) -> ClientResult<Remote<FeedIcon>> {
        self.answer("icon", json!({ "icon_id": icon_id }))
    }

    async fn enclosure(&self, enclosure_id: i64) -> ClientResult<Remote<Enclosure>> {
        self.answer("enclosure", json!({ "enclosure_id": enclosure_id }))
    }
}
