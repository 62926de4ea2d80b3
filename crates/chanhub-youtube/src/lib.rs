//! # chanhub-youtube
//!
//! Aggregation client for the YouTube Data API v3.
//!
//! This crate turns the platform's paginated, statistics-bearing responses
//! into the normalized records from `chanhub-core`:
//!
//! - **Channel lookup**: one `/channels` call mapped to a [`ChannelSummary`]
//! - **Video pages**: a `/search` call scoped to the channel (newest first)
//!   followed by exactly one batched `/videos` call for the returned ids,
//!   merged into a [`VideoPage`]
//!
//! Authentication is a static, pre-provisioned API key sent as a query
//! parameter. No caching, retries, or rate limiting happens here; a single
//! upstream failure surfaces immediately as [`Error::Upstream`].
//!
//! ## API Reference
//!
//! - [YouTube Data API v3](https://developers.google.com/youtube/v3)

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use chanhub_core::{
    min_timestamp, ChannelSummary, Error, Result, VideoDirectory, VideoPage, VideoSummary,
};

mod duration;

pub use duration::parse_duration;

/// Largest page size the upstream search endpoint accepts, and the value an
/// out-of-range request falls back to.
pub const MAX_PAGE_SIZE: u32 = 50;

// ============================================================================
// YouTube API Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct ApiPage<T> {
    #[serde(default = "Vec::default")]
    items: Vec<T>,
    #[serde(rename = "nextPageToken")]
    next_page_token: Option<String>,
    #[serde(rename = "prevPageToken")]
    prev_page_token: Option<String>,
    #[serde(rename = "pageInfo")]
    page_info: Option<PageInfo>,
}

#[derive(Debug, Deserialize)]
struct PageInfo {
    #[serde(rename = "totalResults")]
    total_results: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
}

#[derive(Debug, Deserialize)]
struct SearchItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct YouTubeVideo {
    id: String,
    snippet: VideoSnippet,
    #[serde(rename = "contentDetails")]
    content_details: Option<ContentDetails>,
    statistics: Option<Statistics>,
}

#[derive(Debug, Deserialize)]
struct VideoSnippet {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
    thumbnails: Option<Thumbnails>,
    tags: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct ContentDetails {
    duration: Option<String>,
}

// Statistics arrive as decimal strings on the wire.
#[derive(Debug, Deserialize)]
struct Statistics {
    #[serde(rename = "viewCount")]
    view_count: Option<String>,
    #[serde(rename = "likeCount")]
    like_count: Option<String>,
    #[serde(rename = "commentCount")]
    comment_count: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Thumbnails {
    default: Option<Thumbnail>,
    medium: Option<Thumbnail>,
    high: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

#[derive(Debug, Deserialize)]
struct YouTubeChannel {
    snippet: ChannelSnippet,
    statistics: Option<ChannelStatistics>,
}

#[derive(Debug, Deserialize)]
struct ChannelSnippet {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
    thumbnails: Option<Thumbnails>,
}

#[derive(Debug, Deserialize)]
struct ChannelStatistics {
    #[serde(rename = "subscriberCount")]
    subscriber_count: Option<String>,
    #[serde(rename = "viewCount")]
    view_count: Option<String>,
    #[serde(rename = "videoCount")]
    video_count: Option<String>,
}

// ============================================================================
// Client
// ============================================================================

/// Client for the YouTube Data API v3, keyed by a static API credential.
///
/// Each public operation is a request-scoped pipeline over one or two
/// upstream calls; the client holds no per-request state, so one instance
/// serves concurrent requests without coordination.
pub struct YouTubeClient {
    http: Client,
    api_key: String,
    api_base: String,
}

impl YouTubeClient {
    pub const DEFAULT_API_BASE: &'static str = "https://www.googleapis.com/youtube/v3";

    /// Create a client against the production API endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_api_base(api_key, Self::DEFAULT_API_BASE)
    }

    /// Create a client against an alternate endpoint (tests, proxies).
    pub fn with_api_base(api_key: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_key: api_key.into(),
            api_base: api_base.into(),
        }
    }

    /// Make a keyed GET request and deserialize the JSON response.
    ///
    /// Every transport failure, non-2xx status, and decode failure is
    /// flattened into [`Error::Upstream`] here; callers never see raw
    /// reqwest errors.
    async fn api_get<T: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}{}", self.api_base, endpoint);
        let response = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|e| Error::upstream(format!("request to {endpoint} failed"), e))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(Error::upstream_status(format!(
                "API returned status {status}: {error_text}"
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| Error::upstream(format!("failed to parse {endpoint} response"), e))
    }

    /// Fetch metadata for a single channel.
    ///
    /// Fails with [`Error::NotFound`] when the response item collection is
    /// empty.
    pub async fn channel(&self, channel_id: &str) -> Result<ChannelSummary> {
        debug!(channel_id, "fetching channel metadata");
        let response: ApiPage<YouTubeChannel> = self
            .api_get(
                "/channels",
                &[
                    ("part", "snippet,statistics,contentDetails"),
                    ("id", channel_id),
                ],
            )
            .await?;

        let channel = response
            .items
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound(channel_id.to_string()))?;

        let statistics = channel.statistics;
        Ok(ChannelSummary {
            title: channel.snippet.title,
            description: channel.snippet.description,
            subscriber_count: parse_count(statistics.as_ref().and_then(|s| s.subscriber_count.as_deref())),
            view_count: parse_count(statistics.as_ref().and_then(|s| s.view_count.as_deref())),
            video_count: parse_count(statistics.as_ref().and_then(|s| s.video_count.as_deref())),
            thumbnail_url: thumbnail_url(&channel.snippet.thumbnails),
            published_at: parse_timestamp(channel.snippet.published_at.as_deref()),
        })
    }

    /// Fetch one page of a channel's videos, newest first.
    ///
    /// Issues a channel-scoped search ordered by publish date, then one
    /// batched `/videos` call for the full id set - N search hits cost two
    /// upstream calls, never N+1. The merged output follows the order of the
    /// `/videos` response, which upstream does not promise matches search
    /// ranking; it is passed through without re-sorting.
    pub async fn channel_videos(
        &self,
        channel_id: &str,
        page_token: Option<&str>,
        page_size: u32,
    ) -> Result<VideoPage> {
        if channel_id.trim().is_empty() {
            return Err(Error::InvalidArgument("channel id cannot be blank".into()));
        }
        // Out-of-range sizes fall back to the maximum instead of erroring.
        let page_size = if (1..=MAX_PAGE_SIZE).contains(&page_size) {
            page_size
        } else {
            MAX_PAGE_SIZE
        };

        debug!(channel_id, page_size, "searching channel videos");
        let max_results = page_size.to_string();
        let mut params = vec![
            ("part", "snippet"),
            ("channelId", channel_id),
            ("order", "date"),
            ("type", "video"),
            ("maxResults", max_results.as_str()),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }
        let search: ApiPage<SearchItem> = self.api_get("/search", &params).await?;

        let video_ids: Vec<String> = search
            .items
            .iter()
            .filter_map(|item| item.id.video_id.clone())
            .collect();

        let videos = self.fetch_video_details(&video_ids).await?;

        Ok(VideoPage {
            videos,
            next_page_token: search.next_page_token,
            prev_page_token: search.prev_page_token,
            total_results: search
                .page_info
                .and_then(|p| p.total_results)
                .unwrap_or(0),
        })
    }

    /// Fetch full details for the given ids in one batched call.
    ///
    /// An empty id set makes no call at all.
    async fn fetch_video_details(&self, video_ids: &[String]) -> Result<Vec<VideoSummary>> {
        if video_ids.is_empty() {
            return Ok(vec![]);
        }

        let ids = video_ids.join(",");
        debug!(count = video_ids.len(), "fetching video details");
        let response: ApiPage<YouTubeVideo> = self
            .api_get(
                "/videos",
                &[
                    ("part", "snippet,statistics,contentDetails"),
                    ("id", ids.as_str()),
                ],
            )
            .await?;

        Ok(response.items.into_iter().map(video_summary).collect())
    }
}

#[async_trait]
impl VideoDirectory for YouTubeClient {
    async fn channel(&self, channel_id: &str) -> Result<ChannelSummary> {
        YouTubeClient::channel(self, channel_id).await
    }

    async fn channel_videos(
        &self,
        channel_id: &str,
        page_token: Option<&str>,
        page_size: u32,
    ) -> Result<VideoPage> {
        YouTubeClient::channel_videos(self, channel_id, page_token, page_size).await
    }
}

// ============================================================================
// Mapping Helpers
// ============================================================================

/// Build a normalized summary from one `/videos` item, substituting defaults
/// for every missing field at this boundary.
fn video_summary(video: YouTubeVideo) -> VideoSummary {
    let statistics = video.statistics;
    let duration = video
        .content_details
        .and_then(|cd| cd.duration)
        .map(|d| parse_duration(&d))
        .unwrap_or_default();

    VideoSummary {
        id: video.id,
        title: video.snippet.title,
        description: video.snippet.description,
        published_at: parse_timestamp(video.snippet.published_at.as_deref()),
        thumbnail_url: thumbnail_url(&video.snippet.thumbnails),
        view_count: parse_count(statistics.as_ref().and_then(|s| s.view_count.as_deref())),
        like_count: parse_count(statistics.as_ref().and_then(|s| s.like_count.as_deref())),
        comment_count: parse_count(statistics.as_ref().and_then(|s| s.comment_count.as_deref())),
        duration,
        tags: video.snippet.tags.unwrap_or_default(),
    }
}

/// Decimal-string count with "missing or unparseable => 0".
fn parse_count(raw: Option<&str>) -> u64 {
    raw.and_then(|s| s.parse().ok()).unwrap_or(0)
}

/// RFC 3339 timestamp with "missing or malformed => minimum sentinel".
fn parse_timestamp(raw: Option<&str>) -> DateTime<Utc> {
    raw.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(min_timestamp)
}

/// Highest-resolution thumbnail variant available, empty string when none.
fn thumbnail_url(thumbnails: &Option<Thumbnails>) -> String {
    thumbnails
        .as_ref()
        .and_then(|t| {
            t.high
                .as_ref()
                .or(t.medium.as_ref())
                .or(t.default.as_ref())
                .map(|thumb| thumb.url.clone())
        })
        .unwrap_or_default()
}
