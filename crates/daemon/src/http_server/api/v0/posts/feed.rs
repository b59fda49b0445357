use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use reqwest::{Client, RequestBuilder, Url};

use common::protocol::retrieve;
use common::types::Post;

use crate::http_server::api::client::ApiRequest;
use crate::ServiceState;

/// The aggregated feed: fan out to every registered peer and merge
///
/// Unreachable or misbehaving peers contribute nothing; only a registry read
/// failure is an error.
pub async fn handler(State(state): State<ServiceState>) -> Result<impl IntoResponse, FeedError> {
    let posts = retrieve(state.client(), state.database(), state.peer_timeout())
        .await
        .map_err(|e| FeedError::Provider(e.to_string()))?;

    Ok((http::StatusCode::OK, Json(posts)).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("Provider error: {0}")]
    Provider(String),
}

impl IntoResponse for FeedError {
    fn into_response(self) -> Response {
        tracing::error!("FEED ERROR: {:?}", self);
        (
            http::StatusCode::INTERNAL_SERVER_ERROR,
            "unknown server error",
        )
            .into_response()
    }
}

#[derive(Debug, Clone, Default, clap::Args)]
pub struct FeedRequest;

// Client implementation - builds request for this operation
impl ApiRequest for FeedRequest {
    type Response = Vec<Post>;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/api/v0/posts/feed").unwrap();
        client.get(full_url)
    }
}
