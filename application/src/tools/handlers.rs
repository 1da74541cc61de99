//! Tool handlers
//!
//! Each handler reads its already-validated arguments, performs exactly one
//! remote call, and shapes the outcome into a [`ToolOutput`] or a
//! [`ToolFailure`]. Rendering and error wrapping into the result envelope is
//! left to the dispatcher.

use std::future::Future;

use miniflux_mcp_domain::{
    EntryFilter, EntryStatus, FeedCreationRequest, ToolFailure, ToolOutput, TypedArguments,
    UserCreationRequest,
};
use serde::Serialize;

use super::registry::HandlerFuture;
use crate::ports::feed_reader::{ClientResult, FeedReaderClient};

/// Await a remote call and capture its payload for JSON rendering
async fn fetch<T, F>(noun: &'static str, action: &'static str, call: F) -> Result<ToolOutput, ToolFailure>
where
    T: Serialize,
    F: Future<Output = ClientResult<T>>,
{
    let payload = call.await.map_err(|e| ToolFailure::remote(action, e))?;
    ToolOutput::structured(noun, &payload)
}

/// Await a remote call with no payload and answer with a confirmation line
async fn confirm<F>(action: &'static str, call: F, message: String) -> Result<ToolOutput, ToolFailure>
where
    F: Future<Output = ClientResult<()>>,
{
    call.await.map_err(|e| ToolFailure::remote(action, e))?;
    Ok(ToolOutput::text(message))
}

fn status_filter(args: &TypedArguments) -> Result<Option<EntryStatus>, ToolFailure> {
    args.get_str("status")
        .map(|s| s.parse::<EntryStatus>().map_err(ToolFailure::Argument))
        .transpose()
}

// ==================== Feeds ====================

pub(crate) fn get_feeds<'a>(client: &'a dyn FeedReaderClient, _args: TypedArguments) -> HandlerFuture<'a> {
    Box::pin(fetch("feeds", "fetch feeds", client.feeds()))
}

pub(crate) fn get_feed<'a>(client: &'a dyn FeedReaderClient, args: TypedArguments) -> HandlerFuture<'a> {
    Box::pin(async move {
        let feed_id = args.require_i64("feed_id")?;
        fetch("feed", "fetch feed", client.feed(feed_id)).await
    })
}

pub(crate) fn create_feed<'a>(client: &'a dyn FeedReaderClient, args: TypedArguments) -> HandlerFuture<'a> {
    Box::pin(async move {
        let mut request = FeedCreationRequest::new(args.require_str("feed_url")?);
        if let Some(category_id) = args.get_i64("category_id") {
            request.category_id = category_id;
        }
        request.crawler = args.get_bool("crawler");
        request.user_agent = args.get_str("user_agent").map(str::to_string);
        request.username = args.get_str("username").map(str::to_string);
        request.password = args.get_str("password").map(str::to_string);

        fetch("created feed", "create feed", client.create_feed(&request)).await
    })
}

pub(crate) fn delete_feed<'a>(client: &'a dyn FeedReaderClient, args: TypedArguments) -> HandlerFuture<'a> {
    Box::pin(async move {
        let feed_id = args.require_i64("feed_id")?;
        confirm(
            "delete feed",
            client.delete_feed(feed_id),
            format!("Feed {} deleted successfully", feed_id),
        )
        .await
    })
}

pub(crate) fn refresh_feed<'a>(client: &'a dyn FeedReaderClient, args: TypedArguments) -> HandlerFuture<'a> {
    Box::pin(async move {
        let feed_id = args.require_i64("feed_id")?;
        confirm(
            "refresh feed",
            client.refresh_feed(feed_id),
            format!("Feed {} refreshed successfully", feed_id),
        )
        .await
    })
}

pub(crate) fn refresh_all_feeds<'a>(
    client: &'a dyn FeedReaderClient,
    _args: TypedArguments,
) -> HandlerFuture<'a> {
    Box::pin(confirm(
        "refresh all feeds",
        client.refresh_all_feeds(),
        "All feeds refreshed successfully".to_string(),
    ))
}

pub(crate) fn get_feed_entries<'a>(
    client: &'a dyn FeedReaderClient,
    args: TypedArguments,
) -> HandlerFuture<'a> {
    Box::pin(async move {
        let feed_id = args.require_i64("feed_id")?;
        let filter = EntryFilter {
            status: status_filter(&args)?,
            limit: args.get_i64("limit"),
            offset: args.get_i64("offset"),
            ..Default::default()
        };
        fetch("entries", "fetch feed entries", client.feed_entries(feed_id, &filter)).await
    })
}

pub(crate) fn get_feed_entry<'a>(client: &'a dyn FeedReaderClient, args: TypedArguments) -> HandlerFuture<'a> {
    Box::pin(async move {
        let feed_id = args.require_i64("feed_id")?;
        let entry_id = args.require_i64("entry_id")?;
        fetch("entry", "fetch feed entry", client.feed_entry(feed_id, entry_id)).await
    })
}

pub(crate) fn get_feed_icon<'a>(client: &'a dyn FeedReaderClient, args: TypedArguments) -> HandlerFuture<'a> {
    Box::pin(async move {
        let feed_id = args.require_i64("feed_id")?;
        fetch("icon", "fetch feed icon", client.feed_icon(feed_id)).await
    })
}

pub(crate) fn mark_feed_as_read<'a>(
    client: &'a dyn FeedReaderClient,
    args: TypedArguments,
) -> HandlerFuture<'a> {
    Box::pin(async move {
        let feed_id = args.require_i64("feed_id")?;
        confirm(
            "mark feed as read",
            client.mark_feed_as_read(feed_id),
            format!("Feed {} marked as read", feed_id),
        )
        .await
    })
}

// ==================== Entries ====================

pub(crate) fn get_entries<'a>(client: &'a dyn FeedReaderClient, args: TypedArguments) -> HandlerFuture<'a> {
    Box::pin(async move {
        let filter = EntryFilter {
            status: status_filter(&args)?,
            feed_id: args.get_i64("feed_id"),
            limit: args.get_i64("limit"),
            offset: args.get_i64("offset"),
        };
        fetch("entries", "fetch entries", client.entries(&filter)).await
    })
}

pub(crate) fn get_entry<'a>(client: &'a dyn FeedReaderClient, args: TypedArguments) -> HandlerFuture<'a> {
    Box::pin(async move {
        let entry_id = args.require_i64("entry_id")?;
        fetch("entry", "fetch entry", client.entry(entry_id)).await
    })
}

pub(crate) fn update_entry_status<'a>(
    client: &'a dyn FeedReaderClient,
    args: TypedArguments,
) -> HandlerFuture<'a> {
    Box::pin(async move {
        let entry_id = args.require_i64("entry_id")?;
        let status = args
            .require_str("status")?
            .parse::<EntryStatus>()
            .map_err(ToolFailure::Argument)?;
        confirm(
            "update entry status",
            client.update_entries(&[entry_id], status),
            format!("Entry {} status updated to: {}", entry_id, status),
        )
        .await
    })
}

pub(crate) fn toggle_bookmark<'a>(client: &'a dyn FeedReaderClient, args: TypedArguments) -> HandlerFuture<'a> {
    Box::pin(async move {
        let entry_id = args.require_i64("entry_id")?;
        confirm(
            "toggle bookmark",
            client.toggle_bookmark(entry_id),
            format!("Bookmark toggled for entry {}", entry_id),
        )
        .await
    })
}

pub(crate) fn save_entry<'a>(client: &'a dyn FeedReaderClient, args: TypedArguments) -> HandlerFuture<'a> {
    Box::pin(async move {
        let entry_id = args.require_i64("entry_id")?;
        confirm(
            "save entry",
            client.save_entry(entry_id),
            format!("Entry {} saved successfully", entry_id),
        )
        .await
    })
}

pub(crate) fn fetch_original_content<'a>(
    client: &'a dyn FeedReaderClient,
    args: TypedArguments,
) -> HandlerFuture<'a> {
    Box::pin(async move {
        let entry_id = args.require_i64("entry_id")?;
        client
            .fetch_original_content(entry_id)
            .await
            .map(ToolOutput::Text)
            .map_err(|e| ToolFailure::remote("fetch original content", e))
    })
}

pub(crate) fn mark_all_as_read<'a>(client: &'a dyn FeedReaderClient, args: TypedArguments) -> HandlerFuture<'a> {
    Box::pin(async move {
        let user_id = args.require_i64("user_id")?;
        confirm(
            "mark all as read",
            client.mark_all_as_read(user_id),
            format!("All entries marked as read for user {}", user_id),
        )
        .await
    })
}

// ==================== Categories ====================

pub(crate) fn get_categories<'a>(
    client: &'a dyn FeedReaderClient,
    _args: TypedArguments,
) -> HandlerFuture<'a> {
    Box::pin(fetch("categories", "fetch categories", client.categories()))
}

pub(crate) fn create_category<'a>(client: &'a dyn FeedReaderClient, args: TypedArguments) -> HandlerFuture<'a> {
    Box::pin(async move {
        let title = args.require_str("title")?;
        fetch("category", "create category", client.create_category(title)).await
    })
}

pub(crate) fn update_category<'a>(client: &'a dyn FeedReaderClient, args: TypedArguments) -> HandlerFuture<'a> {
    Box::pin(async move {
        let category_id = args.require_i64("category_id")?;
        let title = args.require_str("title")?;
        fetch("category", "update category", client.update_category(category_id, title)).await
    })
}

pub(crate) fn delete_category<'a>(client: &'a dyn FeedReaderClient, args: TypedArguments) -> HandlerFuture<'a> {
    Box::pin(async move {
        let category_id = args.require_i64("category_id")?;
        confirm(
            "delete category",
            client.delete_category(category_id),
            format!("Category {} deleted successfully", category_id),
        )
        .await
    })
}

pub(crate) fn get_category_feeds<'a>(
    client: &'a dyn FeedReaderClient,
    args: TypedArguments,
) -> HandlerFuture<'a> {
    Box::pin(async move {
        let category_id = args.require_i64("category_id")?;
        fetch("feeds", "fetch category feeds", client.category_feeds(category_id)).await
    })
}

pub(crate) fn get_category_entries<'a>(
    client: &'a dyn FeedReaderClient,
    args: TypedArguments,
) -> HandlerFuture<'a> {
    Box::pin(async move {
        let category_id = args.require_i64("category_id")?;
        let filter = EntryFilter {
            status: status_filter(&args)?,
            limit: args.get_i64("limit"),
            ..Default::default()
        };
        fetch(
            "entries",
            "fetch category entries",
            client.category_entries(category_id, &filter),
        )
        .await
    })
}

pub(crate) fn get_category_entry<'a>(
    client: &'a dyn FeedReaderClient,
    args: TypedArguments,
) -> HandlerFuture<'a> {
    Box::pin(async move {
        let category_id = args.require_i64("category_id")?;
        let entry_id = args.require_i64("entry_id")?;
        fetch(
            "entry",
            "fetch category entry",
            client.category_entry(category_id, entry_id),
        )
        .await
    })
}

pub(crate) fn mark_category_as_read<'a>(
    client: &'a dyn FeedReaderClient,
    args: TypedArguments,
) -> HandlerFuture<'a> {
    Box::pin(async move {
        let category_id = args.require_i64("category_id")?;
        confirm(
            "mark category as read",
            client.mark_category_as_read(category_id),
            format!("Category {} marked as read", category_id),
        )
        .await
    })
}

pub(crate) fn refresh_category<'a>(client: &'a dyn FeedReaderClient, args: TypedArguments) -> HandlerFuture<'a> {
    Box::pin(async move {
        let category_id = args.require_i64("category_id")?;
        confirm(
            "refresh category",
            client.refresh_category(category_id),
            format!("Category {} refreshed successfully", category_id),
        )
        .await
    })
}

// ==================== Users ====================

pub(crate) fn get_users<'a>(client: &'a dyn FeedReaderClient, _args: TypedArguments) -> HandlerFuture<'a> {
    Box::pin(fetch("users", "fetch users", client.users()))
}

pub(crate) fn get_me<'a>(client: &'a dyn FeedReaderClient, _args: TypedArguments) -> HandlerFuture<'a> {
    Box::pin(fetch("user", "fetch current user", client.me()))
}

pub(crate) fn get_user_by_id<'a>(client: &'a dyn FeedReaderClient, args: TypedArguments) -> HandlerFuture<'a> {
    Box::pin(async move {
        let user_id = args.require_i64("user_id")?;
        fetch("user", "fetch user", client.user_by_id(user_id)).await
    })
}

pub(crate) fn get_user_by_username<'a>(
    client: &'a dyn FeedReaderClient,
    args: TypedArguments,
) -> HandlerFuture<'a> {
    Box::pin(async move {
        let username = args.require_str("username")?;
        fetch("user", "fetch user", client.user_by_username(username)).await
    })
}

pub(crate) fn create_user<'a>(client: &'a dyn FeedReaderClient, args: TypedArguments) -> HandlerFuture<'a> {
    Box::pin(async move {
        let request = UserCreationRequest {
            username: args.require_str("username")?.to_string(),
            password: args.require_str("password")?.to_string(),
            is_admin: args.get_bool("is_admin").unwrap_or(false),
        };
        fetch("user", "create user", client.create_user(&request)).await
    })
}

pub(crate) fn delete_user<'a>(client: &'a dyn FeedReaderClient, args: TypedArguments) -> HandlerFuture<'a> {
    Box::pin(async move {
        let user_id = args.require_i64("user_id")?;
        confirm(
            "delete user",
            client.delete_user(user_id),
            format!("User {} deleted successfully", user_id),
        )
        .await
    })
}

// ==================== System ====================

pub(crate) fn get_version<'a>(client: &'a dyn FeedReaderClient, _args: TypedArguments) -> HandlerFuture<'a> {
    Box::pin(fetch("version", "fetch version", client.version()))
}

pub(crate) fn healthcheck<'a>(client: &'a dyn FeedReaderClient, _args: TypedArguments) -> HandlerFuture<'a> {
    Box::pin(async move {
        client
            .healthcheck()
            .await
            .map(|()| ToolOutput::text("Healthcheck passed"))
            .map_err(|e| ToolFailure::check("Healthcheck", e))
    })
}

pub(crate) fn fetch_counters<'a>(
    client: &'a dyn FeedReaderClient,
    _args: TypedArguments,
) -> HandlerFuture<'a> {
    Box::pin(fetch("counters", "fetch counters", client.fetch_counters()))
}

pub(crate) fn discover<'a>(client: &'a dyn FeedReaderClient, args: TypedArguments) -> HandlerFuture<'a> {
    Box::pin(async move {
        let url = args.require_str("url")?;
        fetch("subscriptions", "discover feeds", client.discover(url)).await
    })
}

pub(crate) fn export<'a>(client: &'a dyn FeedReaderClient, _args: TypedArguments) -> HandlerFuture<'a> {
    Box::pin(async move {
        client
            .export()
            .await
            .map(ToolOutput::Text)
            .map_err(|e| ToolFailure::remote("export", e))
    })
}

pub(crate) fn flush_history<'a>(client: &'a dyn FeedReaderClient, _args: TypedArguments) -> HandlerFuture<'a> {
    Box::pin(confirm(
        "flush history",
        client.flush_history(),
        "History flushed successfully".to_string(),
    ))
}

// ==================== API keys ====================

pub(crate) fn get_api_keys<'a>(client: &'a dyn FeedReaderClient, _args: TypedArguments) -> HandlerFuture<'a> {
    Box::pin(fetch("API keys", "fetch API keys", client.api_keys()))
}

pub(crate) fn create_api_key<'a>(client: &'a dyn FeedReaderClient, args: TypedArguments) -> HandlerFuture<'a> {
    Box::pin(async move {
        let description = args.require_str("description")?;
        fetch("API key", "create API key", client.create_api_key(description)).await
    })
}

pub(crate) fn delete_api_key<'a>(client: &'a dyn FeedReaderClient, args: TypedArguments) -> HandlerFuture<'a> {
    Box::pin(async move {
        let api_key_id = args.require_i64("api_key_id")?;
        confirm(
            "delete API key",
            client.delete_api_key(api_key_id),
            format!("API key {} deleted successfully", api_key_id),
        )
        .await
    })
}

// ==================== Media ====================

pub(crate) fn get_icon<'a>(client: &'a dyn FeedReaderClient, args: TypedArguments) -> HandlerFuture<'a> {
    Box::pin(async move {
        let icon_id = args.require_i64("icon_id")?;
        fetch("icon", "fetch icon", client.icon(icon_id)).await
    })
}

pub(crate) fn get_enclosure<'a>(client: &'a dyn FeedReaderClient, args: TypedArguments) -> HandlerFuture<'a> {
    Box::pin(async move {
        let enclosure_id = args.require_i64("enclosure_id")?;
        fetch("enclosure", "fetch enclosure", client.enclosure(enclosure_id)).await
    })
}
