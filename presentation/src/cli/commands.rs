//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for miniflux-mcp
#[derive(Parser, Debug)]
#[command(name = "miniflux-mcp")]
#[command(author, version, about = "MCP server exposing a Miniflux feed reader as tools")]
#[command(long_about = r#"
miniflux-mcp speaks the Model Context Protocol over stdin/stdout and exposes
the Miniflux REST API as 43 tools (feeds, entries, categories, users, ...).
Logs are written to stderr.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./miniflux-mcp.toml Project-level config
3. ~/.config/miniflux-mcp/config.toml   Global config

Environment variables override every file:
  MINIFLUX_URL              Base URL of the Miniflux instance
  MINIFLUX_API_KEY          API key (preferred over basic auth)
  MINIFLUX_USERNAME         Username for basic auth
  MINIFLUX_PASSWORD         Password for basic auth
  MINIFLUX_TIMEOUT_SECONDS  Per-request timeout (default 30)

Example:
  MINIFLUX_URL=https://reader.example.com MINIFLUX_API_KEY=... miniflux-mcp
  miniflux-mcp --config ./reader.toml -vv
"#)]
pub struct Cli {
    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["miniflux-mcp"]).unwrap();
        assert_eq!(cli.verbose, 0);
        assert!(cli.config.is_none());
        assert!(!cli.no_config);
        assert!(!cli.show_config);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "miniflux-mcp",
            "-vv",
            "--config",
            "/tmp/reader.toml",
            "--no-config",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/reader.toml")));
        assert!(cli.no_config);
    }

    #[test]
    fn test_rejects_positional_arguments() {
        assert!(Cli::try_parse_from(["miniflux-mcp", "what is new?"]).is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
