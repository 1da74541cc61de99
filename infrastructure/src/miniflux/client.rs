//! HTTP adapter for the feed reader port
//!
//! [`MinifluxClient`] implements [`FeedReaderClient`] against the Miniflux
//! REST API v1 with a shared `reqwest` connection pool. Authentication is
//! either an `X-Auth-Token` header or HTTP basic auth, fixed at construction.

use async_trait::async_trait;
use miniflux_mcp_application::{ClientError, ClientResult, FeedReaderClient};
use miniflux_mcp_domain::{
    ApiKey, Category, Enclosure, Entry, EntryFilter, EntryResultSet, EntryStatus, Feed,
    FeedCounters, FeedCreated, FeedCreationRequest, FeedIcon, Remote, Subscription,
    User, UserCreationRequest, VersionInfo,
};
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, trace};

use super::error::{MinifluxClientError, error_for_status, transport};
use crate::config::{Credentials, MinifluxSettings};

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("miniflux-mcp/", env!("CARGO_PKG_VERSION"));

const AUTH_HEADER: &str = "X-Auth-Token";

/// Body of `GET /v1/entries/{id}/fetch-content`
#[derive(Debug, Deserialize)]
struct FetchedContent {
    #[serde(default)]
    content: String,
}

/// Miniflux REST API client
#[derive(Debug, Clone)]
pub struct MinifluxClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Credentials,
}

impl MinifluxClient {
    pub fn new(settings: &MinifluxSettings) -> Result<Self, MinifluxClientError> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            base_url: settings.base_url.clone(),
            credentials: settings.credentials.clone(),
        })
    }

    /// Resolve path segments against the base URL, escaping each segment
    fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::Transport(format!("invalid base URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> ClientResult<RequestBuilder> {
        let url = self.endpoint(segments)?;
        debug!("Miniflux request: {} {}", method, url.path());

        let builder = self.http.request(method, url);
        Ok(match &self.credentials {
            Credentials::ApiKey(key) => builder.header(AUTH_HEADER, key),
            Credentials::Basic { username, password } => builder.basic_auth(username, Some(password)),
        })
    }

    async fn send(&self, builder: RequestBuilder) -> ClientResult<Response> {
        let response = builder.send().await.map_err(transport)?;
        let status = response.status();
        trace!("Miniflux response: {}", status);

        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(error_for_status(status, &body))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let bytes = response.bytes().await.map_err(transport)?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> ClientResult<T> {
        let response = self.send(self.request(Method::GET, segments)?).await?;
        Self::decode(response).await
    }

    async fn get_entries(
        &self,
        segments: &[&str],
        filter: &EntryFilter,
    ) -> ClientResult<Remote<EntryResultSet>> {
        let builder = self.request(Method::GET, segments)?.query(&filter.to_query());
        let response = self.send(builder).await?;
        Self::decode(response).await
    }

    async fn get_text(&self, segments: &[&str]) -> ClientResult<String> {
        let response = self.send(self.request(Method::GET, segments)?).await?;
        response.text().await.map_err(transport)
    }

    async fn send_json<B, T>(&self, method: Method, segments: &[&str], body: &B) -> ClientResult<T>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(self.request(method, segments)?.json(body)).await?;
        Self::decode(response).await
    }

    /// Send a request whose response body is irrelevant
    async fn send_empty(&self, method: Method, segments: &[&str]) -> ClientResult<()> {
        self.send(self.request(method, segments)?).await.map(|_| ())
    }
}

#[async_trait]
impl FeedReaderClient for MinifluxClient {
    async fn feeds(&self) -> ClientResult<Remote<Vec<Feed>>> {
        self.get_json(&["v1", "feeds"]).await
    }

    async fn feed(&self, feed_id: i64) -> ClientResult<Remote<Feed>> {
        self.get_json(&["v1", "feeds", &feed_id.to_string()]).await
    }

    async fn create_feed(&self, request: &FeedCreationRequest) -> ClientResult<Remote<FeedCreated>> {
        self.send_json(Method::POST, &["v1", "feeds"], request).await
    }

    async fn delete_feed(&self, feed_id: i64) -> ClientResult<()> {
        self.send_empty(Method::DELETE, &["v1", "feeds", &feed_id.to_string()])
            .await
    }

    async fn refresh_feed(&self, feed_id: i64) -> ClientResult<()> {
        self.send_empty(Method::PUT, &["v1", "feeds", &feed_id.to_string(), "refresh"])
            .await
    }

    async fn refresh_all_feeds(&self) -> ClientResult<()> {
        self.send_empty(Method::PUT, &["v1", "feeds", "refresh"]).await
    }

    async fn feed_entries(&self, feed_id: i64, filter: &EntryFilter) -> ClientResult<Remote<EntryResultSet>> {
        self.get_entries(&["v1", "feeds", &feed_id.to_string(), "entries"], filter)
            .await
    }

    async fn feed_entry(&self, feed_id: i64, entry_id: i64) -> ClientResult<Remote<Entry>> {
        self.get_json(&[
            "v1",
            "feeds",
            &feed_id.to_string(),
            "entries",
            &entry_id.to_string(),
        ])
        .await
    }

    async fn feed_icon(&self, feed_id: i64) -> ClientResult<Remote<FeedIcon>> {
        self.get_json(&["v1", "feeds", &feed_id.to_string(), "icon"]).await
    }

    async fn mark_feed_as_read(&self, feed_id: i64) -> ClientResult<()> {
        self.send_empty(
            Method::PUT,
            &["v1", "feeds", &feed_id.to_string(), "mark-all-as-read"],
        )
        .await
    }

    async fn entries(&self, filter: &EntryFilter) -> ClientResult<Remote<EntryResultSet>> {
        self.get_entries(&["v1", "entries"], filter).await
    }

    async fn entry(&self, entry_id: i64) -> ClientResult<Remote<Entry>> {
        self.get_json(&["v1", "entries", &entry_id.to_string()]).await
    }

    async fn update_entries(&self, entry_ids: &[i64], status: EntryStatus) -> ClientResult<()> {
        let body = json!({ "entry_ids": entry_ids, "status": status.as_str() });
        let builder = self.request(Method::PUT, &["v1", "entries"])?.json(&body);
        self.send(builder).await.map(|_| ())
    }

    async fn toggle_bookmark(&self, entry_id: i64) -> ClientResult<()> {
        self.send_empty(
            Method::PUT,
            &["v1", "entries", &entry_id.to_string(), "bookmark"],
        )
        .await
    }

    async fn save_entry(&self, entry_id: i64) -> ClientResult<()> {
        self.send_empty(Method::POST, &["v1", "entries", &entry_id.to_string(), "save"])
            .await
    }

    async fn fetch_original_content(&self, entry_id: i64) -> ClientResult<String> {
        let fetched: FetchedContent = self
            .get_json(&["v1", "entries", &entry_id.to_string(), "fetch-content"])
            .await?;
        Ok(fetched.content)
    }

    async fn mark_all_as_read(&self, user_id: i64) -> ClientResult<()> {
        self.send_empty(
            Method::PUT,
            &["v1", "users", &user_id.to_string(), "mark-all-as-read"],
        )
        .await
    }

    async fn categories(&self) -> ClientResult<Remote<Vec<Category>>> {
        self.get_json(&["v1", "categories"]).await
    }

    async fn create_category(&self, title: &str) -> ClientResult<Remote<Category>> {
        self.send_json(Method::POST, &["v1", "categories"], &json!({ "title": title }))
            .await
    }

    async fn update_category(&self, category_id: i64, title: &str) -> ClientResult<Remote<Category>> {
        self.send_json(
            Method::PUT,
            &["v1", "categories", &category_id.to_string()],
            &json!({ "title": title }),
        )
        .await
    }

    async fn delete_category(&self, category_id: i64) -> ClientResult<()> {
        self.send_empty(Method::DELETE, &["v1", "categories", &category_id.to_string()])
            .await
    }

    async fn category_feeds(&self, category_id: i64) -> ClientResult<Remote<Vec<Feed>>> {
        self.get_json(&["v1", "categories", &category_id.to_string(), "feeds"])
            .await
    }

    async fn category_entries(
        &self,
        category_id: i64,
        filter: &EntryFilter,
    ) -> ClientResult<Remote<EntryResultSet>> {
        self.get_entries(
            &["v1", "categories", &category_id.to_string(), "entries"],
            filter,
        )
        .await
    }

    async fn category_entry(&self, category_id: i64, entry_id: i64) -> ClientResult<Remote<Entry>> {
        self.get_json(&[
            "v1",
            "categories",
            &category_id.to_string(),
            "entries",
            &entry_id.to_string(),
        ])
        .await
    }

    async fn mark_category_as_read(&self, category_id: i64) -> ClientResult<()> {
        self.send_empty(
            Method::PUT,
            &["v1", "categories", &category_id.to_string(), "mark-all-as-read"],
        )
        .await
    }

    async fn refresh_category(&self, category_id: i64) -> ClientResult<()> {
        self.send_empty(
            Method::PUT,
            &["v1", "categories", &category_id.to_string(), "refresh"],
        )
        .await
    }

    async fn users(&self) -> ClientResult<Remote<Vec<User>>> {
        self.get_json(&["v1", "users"]).await
    }

    async fn me(&self) -> ClientResult<Remote<User>> {
        self.get_json(&["v1", "me"]).await
    }

    async fn user_by_id(&self, user_id: i64) -> ClientResult<Remote<User>> {
        self.get_json(&["v1", "users", &user_id.to_string()]).await
    }

    async fn user_by_username(&self, username: &str) -> ClientResult<Remote<User>> {
        self.get_json(&["v1", "users", username]).await
    }

    async fn create_user(&self, request: &UserCreationRequest) -> ClientResult<Remote<User>> {
        self.send_json(Method::POST, &["v1", "users"], request).await
    }

    async fn delete_user(&self, user_id: i64) -> ClientResult<()> {
        self.send_empty(Method::DELETE, &["v1", "users", &user_id.to_string()])
            .await
    }

    async fn version(&self) -> ClientResult<Remote<VersionInfo>> {
        self.get_json(&["v1", "version"]).await
    }

    async fn healthcheck(&self) -> ClientResult<()> {
        self.send_empty(Method::GET, &["healthcheck"]).await
    }

    async fn fetch_counters(&self) -> ClientResult<Remote<FeedCounters>> {
        self.get_json(&["v1", "feeds", "counters"]).await
    }

    async fn discover(&self, url: &str) -> ClientResult<Remote<Vec<Subscription>>> {
        self.send_json(Method::POST, &["v1", "discover"], &json!({ "url": url }))
            .await
    }

    async fn export(&self) -> ClientResult<String> {
        self.get_text(&["v1", "export"]).await
    }

    async fn flush_history(&self) -> ClientResult<()> {
        self.send_empty(Method::PUT, &["v1", "flush-history"]).await
    }

    async fn api_keys(&self) -> ClientResult<Remote<Vec<ApiKey>>> {
        self.get_json(&["v1", "api-keys"]).await
    }

    async fn create_api_key(&self, description: &str) -> ClientResult<Remote<ApiKey>> {
        self.send_json(
            Method::POST,
            &["v1", "api-keys"],
            &json!({ "description": description }),
        )
        .await
    }

    async fn delete_api_key(&self, api_key_id: i64) -> ClientResult<()> {
        self.send_empty(Method::DELETE, &["v1", "api-keys", &api_key_id.to_string()])
            .await
    }

    async fn icon(&self, icon_id: i64) -> ClientResult<Remote<FeedIcon>> {
        self.get_json(&["v1", "icons", &icon_id.to_string()]).await
    }

    async fn enclosure(&self, enclosure_id: i64) -> ClientResult<Remote<Enclosure>> {
        self.get_json(&["v1", "enclosures", &enclosure_id.to_string()])
            .await
    }
}
