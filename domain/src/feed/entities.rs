//! Feed-reader entities as returned by the remote service
//!
//! Typed views of the JSON the service returns. Every struct tolerates
//! missing fields and ignores fields it does not model; the exact payload
//! travels alongside in [`Remote`](super::Remote).

use super::value_objects::EntryStatus;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A feed subscription
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Feed {
    pub id: i64,
    pub user_id: i64,
    pub feed_url: String,
    pub site_url: String,
    pub title: String,
    pub checked_at: String,
    pub etag_header: String,
    pub last_modified_header: String,
    pub parsing_error_message: String,
    pub parsing_error_count: i64,
    pub scraper_rules: String,
    pub rewrite_rules: String,
    pub crawler: bool,
    pub blocklist_rules: String,
    pub keeplist_rules: String,
    pub user_agent: String,
    pub cookie: String,
    pub username: String,
    pub password: String,
    pub disabled: bool,
    pub ignore_http_cache: bool,
    pub fetch_via_proxy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<FeedIconRef>,
}

/// Icon reference embedded in a feed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedIconRef {
    pub feed_id: i64,
    pub icon_id: i64,
}

/// A feed category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Category {
    pub id: i64,
    pub title: String,
    pub user_id: i64,
    pub hide_globally: bool,
}

/// Icon image, base64 encoded in `data`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedIcon {
    pub id: i64,
    pub data: String,
    pub mime_type: String,
}

/// Media attached to an entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Enclosure {
    pub id: i64,
    pub user_id: i64,
    pub entry_id: i64,
    pub url: String,
    pub mime_type: String,
    pub size: i64,
    pub media_progression: i64,
}

/// A single article
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Entry {
    pub id: i64,
    pub user_id: i64,
    pub feed_id: i64,
    pub status: EntryStatus,
    pub hash: String,
    pub title: String,
    pub url: String,
    pub comments_url: String,
    pub published_at: String,
    pub created_at: String,
    pub changed_at: String,
    pub content: String,
    pub author: String,
    pub share_code: String,
    pub starred: bool,
    pub reading_time: i64,
    /// `null` from the remote when the entry has none
    pub enclosures: Option<Vec<Enclosure>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feed: Option<Feed>,
    pub tags: Option<Vec<String>>,
}

/// A page of entries plus the total number matching the filter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryResultSet {
    pub total: i64,
    pub entries: Vec<Entry>,
}

/// An account on the remote service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub is_admin: bool,
    pub theme: String,
    pub language: String,
    pub timezone: String,
    pub entry_sorting_direction: String,
    pub entries_per_page: i64,
    pub last_login_at: Option<String>,
}

/// A feed found by discovery
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Subscription {
    pub url: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Read/unread entry counts keyed by feed id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedCounters {
    pub reads: BTreeMap<i64, i64>,
    pub unreads: BTreeMap<i64, i64>,
}

/// Build information of the remote service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VersionInfo {
    pub version: String,
    pub commit: String,
    pub build_date: String,
    pub go_version: String,
    pub compiler: String,
    pub arch: String,
    pub os: String,
}

/// An API key of the current user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiKey {
    pub id: i64,
    pub user_id: i64,
    pub token: String,
    pub description: String,
    pub last_used_at: Option<String>,
    pub created_at: String,
}

/// Identifier of a newly created feed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedCreated {
    pub feed_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_feed_tolerates_partial_payload() {
        let feed: Feed = serde_json::from_value(json!({"id": 3, "title": "Example"})).unwrap();
        assert_eq!(feed.id, 3);
        assert_eq!(feed.title, "Example");
        assert!(feed.category.is_none());
    }

    #[test]
    fn test_feed_ignores_unknown_fields() {
        let feed: Feed = serde_json::from_value(json!({
            "id": 3,
            "title": "Example",
            "hide_globally": true,
            "apprise_service_urls": ""
        }))
        .unwrap();

        assert_eq!(feed.id, 3);
        assert!(serde_json::to_value(&feed).unwrap().get("hide_globally").is_none());
    }

    #[test]
    fn test_entry_with_null_collections() {
        let entry: Entry = serde_json::from_value(json!({
            "id": 10,
            "feed_id": 3,
            "status": "unread",
            "title": "Hello",
            "enclosures": null,
            "tags": null
        }))
        .unwrap();

        assert_eq!(entry.status, EntryStatus::Unread);
        assert!(entry.enclosures.is_none());
        assert!(entry.tags.is_none());
    }

    #[test]
    fn test_counters_use_numeric_keys() {
        let counters: FeedCounters = serde_json::from_value(json!({
            "reads": {"2": 10, "1": 4},
            "unreads": {"1": 7}
        }))
        .unwrap();

        assert_eq!(counters.reads.get(&1), Some(&4));
        assert_eq!(counters.unreads.get(&1), Some(&7));
        let keys: Vec<_> = counters.reads.keys().copied().collect();
        assert_eq!(keys, vec![1, 2]);
    }

    #[test]
    fn test_subscription_type_field() {
        let sub: Subscription = serde_json::from_value(json!({
            "url": "https://example.org/feed.xml",
            "title": "Example",
            "type": "rss"
        }))
        .unwrap();
        assert_eq!(sub.kind, "rss");
        assert_eq!(serde_json::to_value(&sub).unwrap()["type"], "rss");
    }
}
