//! # chanhub-core
//!
//! Shared types for the chanhub service:
//!
//! - [`ChannelSummary`], [`VideoSummary`], [`VideoPage`] - normalized records
//!   built from upstream video-platform responses
//! - [`Error`] - the error taxonomy shared by the aggregation client, the
//!   daemon, and the proxy client
//! - [`VideoDirectory`] - the facade trait the hosting layer consumes
//!
//! All records are constructed fresh per request and handed to the caller by
//! value; nothing here is cached or mutated after construction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Error, Debug)]
pub enum Error {
    /// Malformed caller input. Raised before any upstream call is made.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The identifier did not resolve to a channel upstream.
    #[error("channel not found: {0}")]
    NotFound(String),

    /// Any transport or upstream-API failure, flattened into one kind.
    /// The original failure is kept as the source for diagnostics.
    #[error("upstream error: {message}")]
    Upstream {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Error {
    /// Wrap an upstream transport/API failure, preserving it as the cause.
    pub fn upstream(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Error::Upstream {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// An upstream failure with no underlying error object, e.g. a non-2xx
    /// status where the response body is the only diagnostic.
    pub fn upstream_status(message: impl Into<String>) -> Self {
        Error::Upstream {
            message: message.into(),
            source: None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

// ============================================================================
// Normalized Records
// ============================================================================

/// The timestamp substituted when upstream omits a publish date.
pub fn min_timestamp() -> DateTime<Utc> {
    DateTime::<Utc>::MIN_UTC
}

/// Normalized channel metadata.
///
/// Counts default to 0 and the publish timestamp defaults to
/// [`min_timestamp`] when upstream omits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelSummary {
    pub title: String,
    pub description: String,
    pub subscriber_count: u64,
    pub view_count: u64,
    pub video_count: u64,
    pub thumbnail_url: String,
    pub published_at: DateTime<Utc>,
}

/// Normalized single-video metadata.
///
/// Counts default to 0, the thumbnail to an empty string, and tags to an
/// empty list when upstream omits them; a malformed duration becomes zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoSummary {
    pub id: String,
    pub title: String,
    pub description: String,
    pub published_at: DateTime<Utc>,
    pub thumbnail_url: String,
    pub view_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
    pub duration: Duration,
    pub tags: Vec<String>,
}

/// One page of a channel's videos.
///
/// Page tokens are opaque upstream cursors passed through verbatim; they are
/// never interpreted or validated locally. `total_results` is the
/// upstream-reported total and may be approximate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoPage {
    pub videos: Vec<VideoSummary>,
    pub next_page_token: Option<String>,
    pub prev_page_token: Option<String>,
    pub total_results: u64,
}

// ============================================================================
// Directory Facade
// ============================================================================

/// The contract between the aggregation client and the hosting layer.
///
/// Exactly two operations; the hosting layer depends on nothing else.
/// Both are plain request-scoped calls: no shared mutable state, no
/// retries, and cancellation is dropping the returned future.
#[async_trait]
pub trait VideoDirectory: Send + Sync {
    /// Fetch metadata for a single channel.
    ///
    /// Fails with [`Error::NotFound`] when the identifier does not resolve.
    async fn channel(&self, channel_id: &str) -> Result<ChannelSummary>;

    /// Fetch one page of a channel's videos, newest first.
    ///
    /// Fails with [`Error::InvalidArgument`] for a blank channel id before
    /// any network call. An out-of-range `page_size` is reset to the
    /// upstream maximum of 50 rather than rejected.
    async fn channel_videos(
        &self,
        channel_id: &str,
        page_token: Option<&str>,
        page_size: u32,
    ) -> Result<VideoPage>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_keeps_identifier() {
        let err = Error::NotFound("UC123".to_string());
        assert_eq!(err.to_string(), "channel not found: UC123");
    }

    #[test]
    fn upstream_error_preserves_cause() {
        let cause = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = Error::upstream("search call failed", cause);
        assert_eq!(err.to_string(), "upstream error: search call failed");
        let source = std::error::Error::source(&err).expect("cause should be preserved");
        assert!(source.to_string().contains("refused"));
    }

    #[test]
    fn upstream_status_has_no_cause() {
        let err = Error::upstream_status("API returned status 403");
        assert!(std::error::Error::source(&err).is_none());
    }

    #[test]
    fn video_page_default_is_empty() {
        let page = VideoPage::default();
        assert!(page.videos.is_empty());
        assert!(page.next_page_token.is_none());
        assert!(page.prev_page_token.is_none());
        assert_eq!(page.total_results, 0);
    }

    #[test]
    fn records_serialize_with_stable_field_names() {
        let summary = ChannelSummary {
            title: "Test".into(),
            description: String::new(),
            subscriber_count: 10,
            view_count: 0,
            video_count: 3,
            thumbnail_url: String::new(),
            published_at: min_timestamp(),
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["subscriber_count"], 10);
        assert_eq!(json["video_count"], 3);
    }
}
