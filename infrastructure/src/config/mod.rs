//! Configuration loading for miniflux-mcp
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `MINIFLUX_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./miniflux-mcp.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/miniflux-mcp/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, Credentials, DEFAULT_TIMEOUT_SECONDS, FileConfig, MinifluxSettings,
};
pub use loader::{ConfigLoader, ENV_PREFIX, PROJECT_CONFIG_FILE};
