//! Feed-reader domain module
//!
//! Models of the objects the remote feed-reader service returns (feeds,
//! entries, categories, users, ...) and the request values the tools send.
//! These are plain serde types; nothing here performs I/O.

pub mod entities;
pub mod remote;
pub mod value_objects;

pub use entities::{
    ApiKey, Category, Enclosure, Entry, EntryResultSet, Feed, FeedCounters,
    FeedCreated, FeedIcon, FeedIconRef, Subscription, User, VersionInfo,
};
pub use remote::Remote;
pub use value_objects::{
    DEFAULT_CATEGORY_ID, EntryFilter, EntryStatus, FeedCreationRequest, UserCreationRequest,
};
