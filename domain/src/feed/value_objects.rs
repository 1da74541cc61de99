//! Feed-reader value objects: entry statuses, listing filters and creation requests

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Read state of an entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    Read,
    #[default]
    Unread,
    Removed,
}

impl EntryStatus {
    pub const ALL: [EntryStatus; 3] = [EntryStatus::Read, EntryStatus::Unread, EntryStatus::Removed];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryStatus::Read => "read",
            EntryStatus::Unread => "unread",
            EntryStatus::Removed => "removed",
        }
    }

    /// Legal string values, in advertised order
    pub fn names() -> impl Iterator<Item = &'static str> {
        Self::ALL.iter().map(|s| s.as_str())
    }
}

impl std::fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read" => Ok(EntryStatus::Read),
            "unread" => Ok(EntryStatus::Unread),
            "removed" => Ok(EntryStatus::Removed),
            other => Err(format!("unknown entry status: {}", other)),
        }
    }
}

/// Optional filter for entry listings; `None` fields use the remote's default
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFilter {
    pub status: Option<EntryStatus>,
    pub feed_id: Option<i64>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl EntryFilter {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.feed_id.is_none() && self.limit.is_none() && self.offset.is_none()
    }

    /// Query-string pairs, in a fixed order
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(status) = self.status {
            query.push(("status", status.to_string()));
        }
        if let Some(feed_id) = self.feed_id {
            query.push(("feed_id", feed_id.to_string()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            query.push(("offset", offset.to_string()));
        }
        query
    }
}

/// Category a feed lands in when the caller does not pick one
pub const DEFAULT_CATEGORY_ID: i64 = 1;

/// Body of a feed subscription request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedCreationRequest {
    pub feed_url: String,
    pub category_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crawler: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl FeedCreationRequest {
    pub fn new(feed_url: impl Into<String>) -> Self {
        Self {
            feed_url: feed_url.into(),
            category_id: DEFAULT_CATEGORY_ID,
            crawler: None,
            user_agent: None,
            username: None,
            password: None,
        }
    }
}

/// Body of a user creation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCreationRequest {
    pub username: String,
    pub password: String,
    pub is_admin: bool,
}
