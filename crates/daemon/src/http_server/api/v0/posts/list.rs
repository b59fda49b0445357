use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use reqwest::{Client, RequestBuilder, Url};

use common::prelude::PostStore;
use common::protocol::POSTS_PATH;
use common::types::Post;

use crate::http_server::api::client::ApiRequest;
use crate::ServiceState;

/// Local posts, verbatim
///
/// This is the endpoint other peers hit during a retrieve fan-out, so the
/// body is a bare JSON array of posts with no envelope.
pub async fn handler(State(state): State<ServiceState>) -> Result<impl IntoResponse, ListError> {
    let posts = state
        .database()
        .list_local_posts()
        .await
        .map_err(|e| ListError::Provider(e.to_string()))?;

    Ok((http::StatusCode::OK, Json(posts)).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum ListError {
    #[error("Provider error: {0}")]
    Provider(String),
}

impl IntoResponse for ListError {
    fn into_response(self) -> Response {
        tracing::error!("LIST POSTS ERROR: {:?}", self);
        (
            http::StatusCode::INTERNAL_SERVER_ERROR,
            "unknown server error",
        )
            .into_response()
    }
}

#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListRequest;

// Client implementation - builds request for this operation
impl ApiRequest for ListRequest {
    type Response = Vec<Post>;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join(POSTS_PATH).unwrap();
        client.get(full_url)
    }
}
