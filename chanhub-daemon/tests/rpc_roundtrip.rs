//! Integration tests for chanhub-daemon.
//!
//! These start a real JSON-RPC server on an ephemeral port, backed by a
//! stub directory, and exercise both methods over actual HTTP to verify
//! serialization and error-code mapping end to end.

use anyhow::Result;
use async_trait::async_trait;
use jsonrpsee::core::client::{ClientT, Error as ClientError};
use jsonrpsee::http_client::HttpClientBuilder;
use jsonrpsee::rpc_params;
use jsonrpsee::server::ServerHandle;
use std::sync::Arc;
use std::time::Duration;

use chanhub_core::{min_timestamp, ChannelSummary, Error, VideoDirectory, VideoPage, VideoSummary};
use chanhub_daemon::api::handlers::{ApiImpl, INVALID_ARGUMENT_CODE, NOT_FOUND_CODE, UPSTREAM_CODE};
use chanhub_daemon::api::start_server;

struct StubDirectory;

#[async_trait]
impl VideoDirectory for StubDirectory {
    async fn channel(&self, channel_id: &str) -> chanhub_core::Result<ChannelSummary> {
        if channel_id.trim().is_empty() {
            return Err(Error::InvalidArgument("channel id cannot be blank".into()));
        }
        if channel_id == "UC_missing" {
            return Err(Error::NotFound(channel_id.to_string()));
        }
        Ok(ChannelSummary {
            title: "Stub Channel".to_string(),
            description: "A channel that exists only in tests".to_string(),
            subscriber_count: 1200,
            view_count: 34000,
            video_count: 2,
            thumbnail_url: "https://example.invalid/thumb.jpg".to_string(),
            published_at: min_timestamp(),
        })
    }

    async fn channel_videos(
        &self,
        channel_id: &str,
        page_token: Option<&str>,
        page_size: u32,
    ) -> chanhub_core::Result<VideoPage> {
        if channel_id.trim().is_empty() {
            return Err(Error::InvalidArgument("channel id cannot be blank".into()));
        }
        if channel_id == "UC_flaky" {
            return Err(Error::upstream_status("API returned status 503"));
        }
        let count = page_size.min(2);
        let videos = (0..count)
            .map(|i| VideoSummary {
                id: format!("vid-{i}"),
                title: format!("Video {i}"),
                description: String::new(),
                published_at: min_timestamp(),
                thumbnail_url: String::new(),
                view_count: u64::from(i) * 10,
                like_count: 0,
                comment_count: 0,
                duration: Duration::from_secs(253),
                tags: vec![],
            })
            .collect();
        Ok(VideoPage {
            videos,
            next_page_token: Some("tok-next".to_string()),
            prev_page_token: page_token.map(str::to_string),
            total_results: 42,
        })
    }
}

async fn start_test_server() -> Result<(String, ServerHandle)> {
    let api = ApiImpl::new(Arc::new(StubDirectory));
    let (handle, addr) = start_server("127.0.0.1:0", api).await?;
    Ok((format!("http://{addr}"), handle))
}

fn call_error(err: ClientError) -> jsonrpsee::types::ErrorObjectOwned {
    match err {
        ClientError::Call(obj) => obj,
        other => panic!("expected a call error, got {other:?}"),
    }
}

#[tokio::test]
async fn channel_get_round_trips_the_summary() -> Result<()> {
    let (url, handle) = start_test_server().await?;
    let client = HttpClientBuilder::default().build(&url)?;

    let summary: ChannelSummary = client
        .request("channel.get", rpc_params!["UC_valid"])
        .await?;

    assert_eq!(summary.title, "Stub Channel");
    assert_eq!(summary.subscriber_count, 1200);
    assert_eq!(summary.published_at, min_timestamp());

    handle.stop()?;
    Ok(())
}

#[tokio::test]
async fn channel_videos_round_trips_the_page() -> Result<()> {
    let (url, handle) = start_test_server().await?;
    let client = HttpClientBuilder::default().build(&url)?;

    let page: VideoPage = client
        .request("channel.videos", rpc_params!["UC_valid", "tok-prev", 2])
        .await?;

    assert_eq!(page.videos.len(), 2);
    assert_eq!(page.videos[0].id, "vid-0");
    assert_eq!(page.videos[0].duration, Duration::from_secs(253));
    assert_eq!(page.next_page_token.as_deref(), Some("tok-next"));
    assert_eq!(page.prev_page_token.as_deref(), Some("tok-prev"));
    assert_eq!(page.total_results, 42);

    handle.stop()?;
    Ok(())
}

#[tokio::test]
async fn channel_videos_accepts_omitted_optionals() -> Result<()> {
    let (url, handle) = start_test_server().await?;
    let client = HttpClientBuilder::default().build(&url)?;

    let page: VideoPage = client
        .request("channel.videos", rpc_params!["UC_valid"])
        .await?;

    assert_eq!(page.videos.len(), 2);
    assert_eq!(page.prev_page_token, None);

    handle.stop()?;
    Ok(())
}

#[tokio::test]
async fn unknown_channel_returns_the_not_found_code() -> Result<()> {
    let (url, handle) = start_test_server().await?;
    let client = HttpClientBuilder::default().build(&url)?;

    let err = client
        .request::<ChannelSummary, _>("channel.get", rpc_params!["UC_missing"])
        .await
        .unwrap_err();
    let err = call_error(err);
    assert_eq!(err.code(), NOT_FOUND_CODE);
    assert!(err.message().contains("UC_missing"));

    handle.stop()?;
    Ok(())
}

#[tokio::test]
async fn blank_channel_id_returns_invalid_params() -> Result<()> {
    let (url, handle) = start_test_server().await?;
    let client = HttpClientBuilder::default().build(&url)?;

    let err = client
        .request::<ChannelSummary, _>("channel.get", rpc_params!["   "])
        .await
        .unwrap_err();
    assert_eq!(call_error(err).code(), INVALID_ARGUMENT_CODE);

    handle.stop()?;
    Ok(())
}

#[tokio::test]
async fn health_check_succeeds_without_reaching_the_directory() -> Result<()> {
    let (url, handle) = start_test_server().await?;

    // The probe sends a blank channel id, which the directory rejects
    // before doing any real work; the RPC-level rejection still counts
    // as healthy.
    let client = chanhub_client::ChanhubClient::new(&url).await?;
    assert!(client.health_check().await);

    handle.stop()?;
    Ok(())
}

#[tokio::test]
async fn upstream_failure_returns_the_generic_server_code() -> Result<()> {
    let (url, handle) = start_test_server().await?;
    let client = HttpClientBuilder::default().build(&url)?;

    let err = client
        .request::<VideoPage, _>("channel.videos", rpc_params!["UC_flaky"])
        .await
        .unwrap_err();
    let err = call_error(err);
    assert_eq!(err.code(), UPSTREAM_CODE);
    assert!(err.message().contains("503"));

    handle.stop()?;
    Ok(())
}
