//! # chanhub-daemon
//!
//! The chanhub hosting process.
//!
//! This daemon is responsible for:
//! - Loading the TOML configuration (bind address, log level, API key)
//! - Holding the YouTube aggregation client for the process lifetime
//! - Exposing the two facade operations over a local JSON-RPC HTTP API
//!
//! ## Configuration
//!
//! The daemon reads configuration from `$XDG_CONFIG_HOME/chanhub/config.toml`
//! and refuses to start until `youtube.api_key` is set.
//!
//! ## Running
//!
//! ```bash
//! # Start the daemon
//! cargo run --bin chanhub-daemon
//! ```

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use chanhub_daemon::api::handlers::ApiImpl;
use chanhub_daemon::api::start_server;
use chanhub_daemon::config::Config;
use chanhub_youtube::YouTubeClient;

fn log_level(name: &str) -> Level {
    match name {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load_default().context("Failed to load configuration")?;

    FmtSubscriber::builder()
        .with_max_level(log_level(&config.daemon.log_level))
        .with_target(true)
        .init();

    info!("Starting chanhub-daemon v{}", env!("CARGO_PKG_VERSION"));

    let client = match &config.youtube.api_base {
        Some(base) => YouTubeClient::with_api_base(&config.youtube.api_key, base),
        None => YouTubeClient::new(&config.youtube.api_key),
    };

    let api = ApiImpl::new(Arc::new(client));
    let (server_handle, addr) = start_server(&config.daemon.bind_address, api).await?;

    info!("Daemon startup complete");
    info!("Listening on: {}", addr);
    info!("Press Ctrl+C to stop");

    tokio::signal::ctrl_c().await?;

    info!("Shutting down...");
    server_handle.stop()?;

    info!("Daemon stopped");
    Ok(())
}
