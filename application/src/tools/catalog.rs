//! Tool catalog
//!
//! Every tool the adapter exposes, as one static table. A row carries the
//! tool's name, description, argument list and handler; [`build_registry`]
//! turns the table into a [`ToolRegistry`]. Advertisement and validation
//! both read the descriptors produced here, so they cannot drift apart.

use miniflux_mcp_domain::{ArgumentSpec, ArgumentType, ToolDescriptor};

use super::handlers;
use super::registry::{HandlerBinding, RegistryError, ToolHandler, ToolRegistry};

/// Legal values of every `status` argument
const STATUSES: &[&str] = &["read", "unread", "removed"];

/// One argument of a catalog row
struct ArgRow {
    name: &'static str,
    description: &'static str,
    kind: ArgumentType,
    required: bool,
    allowed: &'static [&'static str],
}

impl ArgRow {
    const fn new(name: &'static str, description: &'static str, kind: ArgumentType) -> Self {
        Self {
            name,
            description,
            kind,
            required: false,
            allowed: &[],
        }
    }

    const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    const fn one_of(mut self, allowed: &'static [&'static str]) -> Self {
        self.allowed = allowed;
        self
    }

    fn spec(&self) -> ArgumentSpec {
        let spec = ArgumentSpec::new(self.name, self.description, self.kind, self.required);
        if self.allowed.is_empty() {
            spec
        } else {
            spec.with_allowed(self.allowed.iter().copied())
        }
    }
}

const fn int(name: &'static str, description: &'static str) -> ArgRow {
    ArgRow::new(name, description, ArgumentType::Integer)
}

const fn string(name: &'static str, description: &'static str) -> ArgRow {
    ArgRow::new(name, description, ArgumentType::String)
}

const fn boolean(name: &'static str, description: &'static str) -> ArgRow {
    ArgRow::new(name, description, ArgumentType::Boolean)
}

const fn status(description: &'static str) -> ArgRow {
    string("status", description).one_of(STATUSES)
}

/// One tool of the catalog
struct ToolRow {
    name: &'static str,
    description: &'static str,
    arguments: &'static [ArgRow],
    handler: ToolHandler,
}

impl ToolRow {
    fn descriptor(&self) -> ToolDescriptor {
        self.arguments
            .iter()
            .fold(ToolDescriptor::new(self.name, self.description), |descriptor, arg| {
                descriptor.with_argument(arg.spec())
            })
    }

    fn binding(&self) -> HandlerBinding {
        HandlerBinding::new(self.descriptor(), self.handler)
    }
}

static CATALOG: &[ToolRow] = &[
    // Feeds
    ToolRow {
        name: "get_feeds",
        description: "Get all RSS/Atom feeds from Miniflux",
        arguments: &[],
        handler: handlers::get_feeds,
    },
    ToolRow {
        name: "get_feed",
        description: "Get a specific feed by ID",
        arguments: &[int("feed_id", "The ID of the feed to retrieve").required()],
        handler: handlers::get_feed,
    },
    ToolRow {
        name: "create_feed",
        description: "Add a new RSS/Atom feed to Miniflux",
        arguments: &[
            string("feed_url", "The URL of the RSS/Atom feed to add").required(),
            int("category_id", "The category ID to assign the feed to (default: 1)"),
            boolean("crawler", "Enable web scraper for full content"),
            string("user_agent", "Custom user agent for feed fetching"),
            string("username", "Username for HTTP basic authentication"),
            string("password", "Password for HTTP basic authentication"),
        ],
        handler: handlers::create_feed,
    },
    ToolRow {
        name: "delete_feed",
        description: "Delete a specific feed",
        arguments: &[int("feed_id", "The ID of the feed to delete").required()],
        handler: handlers::delete_feed,
    },
    ToolRow {
        name: "refresh_feed",
        description: "Manually refresh a specific feed",
        arguments: &[int("feed_id", "The ID of the feed to refresh").required()],
        handler: handlers::refresh_feed,
    },
    ToolRow {
        name: "refresh_all_feeds",
        description: "Refresh all feeds",
        arguments: &[],
        handler: handlers::refresh_all_feeds,
    },
    ToolRow {
        name: "get_feed_entries",
        description: "Get entries from a specific feed",
        arguments: &[
            int("feed_id", "The ID of the feed").required(),
            status("Filter by entry status (read, unread, removed)"),
            int("limit", "Limit the number of entries returned"),
            int("offset", "Offset for pagination"),
        ],
        handler: handlers::get_feed_entries,
    },
    ToolRow {
        name: "get_feed_entry",
        description: "Get a specific entry from a feed",
        arguments: &[
            int("feed_id", "The ID of the feed").required(),
            int("entry_id", "The ID of the entry").required(),
        ],
        handler: handlers::get_feed_entry,
    },
    ToolRow {
        name: "get_feed_icon",
        description: "Get the icon of a specific feed",
        arguments: &[int("feed_id", "The ID of the feed").required()],
        handler: handlers::get_feed_icon,
    },
    ToolRow {
        name: "mark_feed_as_read",
        description: "Mark all entries in a feed as read",
        arguments: &[int("feed_id", "The ID of the feed").required()],
        handler: handlers::mark_feed_as_read,
    },
    // Entries
    ToolRow {
        name: "get_entries",
        description: "Get entries (articles) from Miniflux with optional filtering",
        arguments: &[
            status("Filter by entry status (read, unread, removed)"),
            int("feed_id", "Filter by specific feed ID"),
            int("limit", "Limit the number of entries returned"),
            int("offset", "Offset for pagination"),
        ],
        handler: handlers::get_entries,
    },
    ToolRow {
        name: "get_entry",
        description: "Get a specific entry by ID",
        arguments: &[int("entry_id", "The ID of the entry to retrieve").required()],
        handler: handlers::get_entry,
    },
    ToolRow {
        name: "update_entry_status",
        description: "Update the status of an entry (mark as read/unread/removed)",
        arguments: &[
            int("entry_id", "The ID of the entry to update").required(),
            status("New status for the entry (read, unread, removed)").required(),
        ],
        handler: handlers::update_entry_status,
    },
    ToolRow {
        name: "toggle_bookmark",
        description: "Toggle bookmark status of an entry",
        arguments: &[int("entry_id", "The ID of the entry").required()],
        handler: handlers::toggle_bookmark,
    },
    ToolRow {
        name: "save_entry",
        description: "Save an entry",
        arguments: &[int("entry_id", "The ID of the entry").required()],
        handler: handlers::save_entry,
    },
    ToolRow {
        name: "fetch_original_content",
        description: "Fetch the original content of an entry",
        arguments: &[int("entry_id", "The ID of the entry").required()],
        handler: handlers::fetch_original_content,
    },
    ToolRow {
        name: "mark_all_as_read",
        description: "Mark all entries as read for a user",
        arguments: &[int("user_id", "The ID of the user").required()],
        handler: handlers::mark_all_as_read,
    },
    // Categories
    ToolRow {
        name: "get_categories",
        description: "Get all feed categories from Miniflux",
        arguments: &[],
        handler: handlers::get_categories,
    },
    ToolRow {
        name: "create_category",
        description: "Create a new category",
        arguments: &[string("title", "The title of the category").required()],
        handler: handlers::create_category,
    },
    ToolRow {
        name: "update_category",
        description: "Update a category title",
        arguments: &[
            int("category_id", "The ID of the category").required(),
            string("title", "The new title of the category").required(),
        ],
        handler: handlers::update_category,
    },
    ToolRow {
        name: "delete_category",
        description: "Delete a category",
        arguments: &[int("category_id", "The ID of the category").required()],
        handler: handlers::delete_category,
    },
    ToolRow {
        name: "get_category_feeds",
        description: "Get all feeds in a specific category",
        arguments: &[int("category_id", "The ID of the category").required()],
        handler: handlers::get_category_feeds,
    },
    ToolRow {
        name: "get_category_entries",
        description: "Get all entries in a specific category",
        arguments: &[
            int("category_id", "The ID of the category").required(),
            status("Filter by entry status (read, unread, removed)"),
            int("limit", "Limit the number of entries returned"),
        ],
        handler: handlers::get_category_entries,
    },
    ToolRow {
        name: "get_category_entry",
        description: "Get a specific entry from a category",
        arguments: &[
            int("category_id", "The ID of the category").required(),
            int("entry_id", "The ID of the entry").required(),
        ],
        handler: handlers::get_category_entry,
    },
    ToolRow {
        name: "mark_category_as_read",
        description: "Mark all entries in a category as read",
        arguments: &[int("category_id", "The ID of the category").required()],
        handler: handlers::mark_category_as_read,
    },
    ToolRow {
        name: "refresh_category",
        description: "Refresh all feeds in a category",
        arguments: &[int("category_id", "The ID of the category").required()],
        handler: handlers::refresh_category,
    },
    // Users
    ToolRow {
        name: "get_users",
        description: "Get all users",
        arguments: &[],
        handler: handlers::get_users,
    },
    ToolRow {
        name: "get_me",
        description: "Get current user information",
        arguments: &[],
        handler: handlers::get_me,
    },
    ToolRow {
        name: "get_user_by_id",
        description: "Get a specific user by ID",
        arguments: &[int("user_id", "The ID of the user").required()],
        handler: handlers::get_user_by_id,
    },
    ToolRow {
        name: "get_user_by_username",
        description: "Get a specific user by username",
        arguments: &[string("username", "The username of the user").required()],
        handler: handlers::get_user_by_username,
    },
    ToolRow {
        name: "create_user",
        description: "Create a new user",
        arguments: &[
            string("username", "The username for the new user").required(),
            string("password", "The password for the new user").required(),
            boolean("is_admin", "Whether the user should be an admin"),
        ],
        handler: handlers::create_user,
    },
    ToolRow {
        name: "delete_user",
        description: "Delete a user",
        arguments: &[int("user_id", "The ID of the user").required()],
        handler: handlers::delete_user,
    },
    // System
    ToolRow {
        name: "get_version",
        description: "Get Miniflux version information",
        arguments: &[],
        handler: handlers::get_version,
    },
    ToolRow {
        name: "healthcheck",
        description: "Perform a health check",
        arguments: &[],
        handler: handlers::healthcheck,
    },
    ToolRow {
        name: "fetch_counters",
        description: "Fetch feed counters",
        arguments: &[],
        handler: handlers::fetch_counters,
    },
    ToolRow {
        name: "discover",
        description: "Discover feeds from a URL",
        arguments: &[string("url", "The URL to discover feeds from").required()],
        handler: handlers::discover,
    },
    ToolRow {
        name: "export",
        description: "Export feeds as OPML",
        arguments: &[],
        handler: handlers::export,
    },
    ToolRow {
        name: "flush_history",
        description: "Flush the read history",
        arguments: &[],
        handler: handlers::flush_history,
    },
    // API keys
    ToolRow {
        name: "get_api_keys",
        description: "Get all API keys",
        arguments: &[],
        handler: handlers::get_api_keys,
    },
    ToolRow {
        name: "create_api_key",
        description: "Create a new API key",
        arguments: &[string("description", "Description for the API key").required()],
        handler: handlers::create_api_key,
    },
    ToolRow {
        name: "delete_api_key",
        description: "Delete an API key",
        arguments: &[int("api_key_id", "The ID of the API key").required()],
        handler: handlers::delete_api_key,
    },
    // Media
    ToolRow {
        name: "get_icon",
        description: "Get an icon by ID",
        arguments: &[int("icon_id", "The ID of the icon").required()],
        handler: handlers::get_icon,
    },
    ToolRow {
        name: "get_enclosure",
        description: "Get an enclosure by ID",
        arguments: &[int("enclosure_id", "The ID of the enclosure").required()],
        handler: handlers::get_enclosure,
    },
];

/// Build the registry of every catalog tool, in catalog order
pub fn build_registry() -> Result<ToolRegistry, RegistryError> {
    let mut registry = ToolRegistry::new();
    for row in CATALOG {
        registry.register(row.binding())?;
    }
    Ok(registry)
}
