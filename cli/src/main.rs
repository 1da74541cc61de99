//! CLI entrypoint for miniflux-mcp
//!
//! This is the main binary that wires together all layers using
//! dependency injection and serves MCP on stdin/stdout.

use anyhow::{Context, Result};
use clap::Parser;
use miniflux_mcp_application::{DispatchToolUseCase, build_registry};
use miniflux_mcp_infrastructure::{ConfigLoader, MinifluxClient};
use miniflux_mcp_presentation::{Cli, McpServer, ServerInfo};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v when set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    });

    // stdout carries the protocol
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    info!("Starting miniflux-mcp {}", env!("CARGO_PKG_VERSION"));

    // === Configuration ===
    let config = ConfigLoader::load(cli.config.as_ref(), cli.no_config)
        .context("failed to load configuration")?;
    let settings = config.validate().context("invalid configuration")?;
    info!("Using Miniflux at {}", settings.base_url);

    // === Dependency Injection ===
    let client = Arc::new(MinifluxClient::new(&settings).context("failed to create Miniflux client")?);
    let registry = Arc::new(build_registry().context("failed to build tool registry")?);
    let dispatcher = DispatchToolUseCase::new(registry, client);

    let server = McpServer::new(
        dispatcher,
        ServerInfo::new("miniflux-mcp", env!("CARGO_PKG_VERSION")),
    );
    server.serve_stdio().await?;

    Ok(())
}
