use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use reqwest::{Client, RequestBuilder, Url};

use common::prelude::PeerRegistry;
use common::types::PeerRecord;

use crate::http_server::api::client::ApiRequest;
use crate::ServiceState;

/// Registered peers in registration order
pub async fn handler(State(state): State<ServiceState>) -> Result<impl IntoResponse, ListError> {
    let peers = state
        .database()
        .list_peers()
        .await
        .map_err(|e| ListError::Provider(e.to_string()))?;

    Ok((http::StatusCode::OK, Json(peers)).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum ListError {
    #[error("Provider error: {0}")]
    Provider(String),
}

impl IntoResponse for ListError {
    fn into_response(self) -> Response {
        tracing::error!("LIST PEERS ERROR: {:?}", self);
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
    type Response = Vec<PeerRecord>;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/api/v0/peers").unwrap();
        client.get(full_url)
    }
}
