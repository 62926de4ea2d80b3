//! JSON-RPC API handlers for chanhub-daemon.
//!
//! This module defines the RPC interface and maps the facade's error
//! taxonomy onto JSON-RPC error codes. The mapping is a hosting-layer
//! concern: the aggregation client itself never sees these codes.

use jsonrpsee::core::RpcResult;
use jsonrpsee::proc_macros::rpc;
use jsonrpsee::types::ErrorObjectOwned;
use std::sync::Arc;

use chanhub_core::{ChannelSummary, Error, VideoDirectory, VideoPage};
use chanhub_youtube::MAX_PAGE_SIZE;

/// Invalid caller input (blank channel id). Standard invalid-params code.
pub const INVALID_ARGUMENT_CODE: i32 = -32602;
/// Any transport or upstream-API failure.
pub const UPSTREAM_CODE: i32 = -32000;
/// The channel id did not resolve upstream.
pub const NOT_FOUND_CODE: i32 = -32001;

/// The JSON-RPC API surface of the daemon.
///
/// Two methods, mirroring the two facade operations verbatim.
#[rpc(server)]
pub trait ChanhubApi {
    /// Fetch normalized metadata for a channel.
    #[method(name = "channel.get")]
    async fn channel(&self, channel_id: String) -> RpcResult<ChannelSummary>;

    /// Fetch one page of a channel's videos.
    ///
    /// `page_token` is an opaque upstream cursor; `page_size` defaults to 50
    /// when omitted.
    #[method(name = "channel.videos")]
    async fn channel_videos(
        &self,
        channel_id: String,
        page_token: Option<String>,
        page_size: Option<u32>,
    ) -> RpcResult<VideoPage>;
}

/// Implementation of the chanhub API, delegating to the directory facade.
pub struct ApiImpl<D> {
    directory: Arc<D>,
}

impl<D: VideoDirectory + 'static> ApiImpl<D> {
    pub fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }
}

fn to_rpc_error(err: Error) -> ErrorObjectOwned {
    let code = match err {
        Error::InvalidArgument(_) => INVALID_ARGUMENT_CODE,
        Error::NotFound(_) => NOT_FOUND_CODE,
        Error::Upstream { .. } => UPSTREAM_CODE,
    };
    ErrorObjectOwned::owned(code, err.to_string(), None::<()>)
}

#[jsonrpsee::core::async_trait]
impl<D: VideoDirectory + 'static> ChanhubApiServer for ApiImpl<D> {
    async fn channel(&self, channel_id: String) -> RpcResult<ChannelSummary> {
        self.directory
            .channel(&channel_id)
            .await
            .map_err(to_rpc_error)
    }

    async fn channel_videos(
        &self,
        channel_id: String,
        page_token: Option<String>,
        page_size: Option<u32>,
    ) -> RpcResult<VideoPage> {
        self.directory
            .channel_videos(
                &channel_id,
                page_token.as_deref(),
                page_size.unwrap_or(MAX_PAGE_SIZE),
            )
            .await
            .map_err(to_rpc_error)
    }
}
