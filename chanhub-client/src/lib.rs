//! JSON-RPC client for communicating with chanhub-daemon.
//!
//! A thin proxy over the daemon's two methods, used by frontends that do
//! not want to talk to YouTube directly.

use jsonrpsee::core::client::ClientT;
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use jsonrpsee::rpc_params;
use thiserror::Error;

use chanhub_core::{ChannelSummary, VideoPage};

/// Client for interacting with chanhub-daemon's JSON-RPC API.
#[derive(Debug)]
pub struct ChanhubClient {
    client: HttpClient,
}

/// Errors that can occur when interacting with the chanhub-daemon.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Failed to connect to daemon: {0}")]
    ConnectionError(String),

    #[error("RPC call failed: {0}")]
    RpcError(String),
}

impl ChanhubClient {
    /// Create a new client connected to the daemon at the specified URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The daemon's JSON-RPC endpoint (e.g., "http://127.0.0.1:4030")
    pub async fn new(url: &str) -> Result<Self, ClientError> {
        let client = HttpClientBuilder::default()
            .build(url)
            .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

        Ok(Self { client })
    }

    /// Fetch normalized metadata for a channel.
    pub async fn channel(&self, channel_id: &str) -> Result<ChannelSummary, ClientError> {
        self.client
            .request("channel.get", rpc_params![channel_id])
            .await
            .map_err(|e| ClientError::RpcError(e.to_string()))
    }

    /// Fetch one page of a channel's videos.
    ///
    /// `page_token` is an opaque cursor from a previous page; `page_size`
    /// falls back to the daemon's default when omitted.
    pub async fn channel_videos(
        &self,
        channel_id: &str,
        page_token: Option<&str>,
        page_size: Option<u32>,
    ) -> Result<VideoPage, ClientError> {
        self.client
            .request("channel.videos", rpc_params![channel_id, page_token, page_size])
            .await
            .map_err(|e| ClientError::RpcError(e.to_string()))
    }

    /// Check if the daemon is reachable and responding.
    ///
    /// Probes with a blank channel id, which the daemon rejects before any
    /// upstream call, so the probe never spends API quota. An RPC-level
    /// error still proves the daemon answered; only transport failures
    /// count as unhealthy.
    pub async fn health_check(&self) -> bool {
        match self
            .client
            .request::<VideoPage, _>("channel.videos", rpc_params![""])
            .await
        {
            Ok(_) => true,
            Err(jsonrpsee::core::client::Error::Call(_)) => true,
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn new_rejects_a_malformed_url() {
        let err = ChanhubClient::new("not a url").await.unwrap_err();
        assert!(matches!(err, ClientError::ConnectionError(_)));
    }

    #[tokio::test]
    async fn unreachable_daemon_fails_health_check() {
        let client = ChanhubClient::new("http://127.0.0.1:1").await.unwrap();
        assert!(!client.health_check().await);
    }

    #[test]
    fn client_error_display_includes_the_cause() {
        let err = ClientError::RpcError("boom".to_string());
        assert_eq!(err.to_string(), "RPC call failed: boom");
    }
}
