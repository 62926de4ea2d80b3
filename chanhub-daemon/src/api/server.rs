//! JSON-RPC server implementation for chanhub-daemon.
//!
//! This module provides the server that listens on a local TCP address and
//! handles incoming JSON-RPC requests from clients. jsonrpsee drops handler
//! futures when a request is aborted, which also cancels the in-flight
//! upstream call inside the facade.

use anyhow::{Context, Result};
use jsonrpsee::server::{Server, ServerHandle};
use tracing::info;

use super::handlers::{ApiImpl, ChanhubApiServer};
use chanhub_core::VideoDirectory;

/// Start the JSON-RPC API server on the given bind address.
///
/// Returns a tuple of (ServerHandle, SocketAddr) - the handle keeps the
/// server running and can be used to gracefully shut it down, and the
/// address shows where it's listening (useful when binding to port 0).
pub async fn start_server<D: VideoDirectory + 'static>(
    bind_address: &str,
    api: ApiImpl<D>,
) -> Result<(ServerHandle, std::net::SocketAddr)> {
    info!("Starting JSON-RPC server on {}", bind_address);

    let server = Server::builder()
        .build(bind_address)
        .await
        .context("Failed to build JSON-RPC server")?;

    let addr = server
        .local_addr()
        .context("Failed to get server address")?;
    info!("JSON-RPC server listening on {}", addr);

    let handle = server.start(api.into_rpc());

    Ok((handle, addr))
}
