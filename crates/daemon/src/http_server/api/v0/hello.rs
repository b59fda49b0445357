use axum::extract::{Json, State};
use axum::response::{IntoResponse, Response};
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use common::crypto::PublicKey;
use common::protocol::verify_peer;

use crate::http_server::api::client::ApiRequest;
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
pub struct HelloRequest {
    /// Base address of the peer to challenge
    #[arg(long)]
    pub addr: Url,

    /// Claimed public key X coordinate (hex-encoded)
    #[arg(long)]
    pub x: String,

    /// Claimed public key Y coordinate (hex-encoded)
    #[arg(long)]
    pub y: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelloResponse {
    pub addr: Url,
    pub verified: bool,
}

/// Drive the handshake against a peer that claims the key `(x, y)`
///
/// A malformed key encoding is the caller's mistake and reports 400. A peer
/// that is unreachable, misbehaves, or fails verification is a protocol
/// outcome and reports `verified: false`.
pub async fn handler(
    State(state): State<ServiceState>,
    Json(req): Json<HelloRequest>,
) -> Result<impl IntoResponse, HelloError> {
    let claimed = PublicKey::from_coordinates(&req.x, &req.y)
        .map_err(|e| HelloError::InvalidPublicKey(e.to_string()))?;

    let verified = verify_peer(state.client(), &req.addr, &claimed).await;
    tracing::info!(addr = %req.addr, verified, "handshake complete");

    Ok((
        http::StatusCode::OK,
        Json(HelloResponse {
            addr: req.addr,
            verified,
        }),
    )
        .into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum HelloError {
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),
}

impl IntoResponse for HelloError {
    fn into_response(self) -> Response {
        match self {
            HelloError::InvalidPublicKey(msg) => (
                http::StatusCode::BAD_REQUEST,
                format!("Invalid public key: {}", msg),
            )
                .into_response(),
        }
    }
}

// Client implementation - builds request for this operation
impl ApiRequest for HelloRequest {
    type Response = HelloResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/api/v0/hello").unwrap();
        client.post(full_url).json(&self)
    }
}
