use axum::extract::{Json, State};
use axum::response::{IntoResponse, Response};
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use common::crypto::PublicKey;
use common::prelude::PeerRegistry;
use common::store::ProviderError;
use common::types::PeerRecord;

use crate::http_server::api::client::ApiRequest;
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
pub struct AddRequest {
    /// Display name for the peer
    #[arg(long)]
    pub name: String,

    /// Peer public key X coordinate (hex-encoded)
    #[arg(long)]
    pub x: String,

    /// Peer public key Y coordinate (hex-encoded)
    #[arg(long)]
    pub y: String,

    /// Base address of the peer
    #[arg(long)]
    pub address: Url,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddResponse {
    pub peer: PeerRecord,
}

/// Register a peer for retrieve fan-outs
///
/// The claimed key must at least be a valid curve point; whether the peer
/// actually controls it is the hello handshake's job.
pub async fn handler(
    State(state): State<ServiceState>,
    Json(req): Json<AddRequest>,
) -> Result<impl IntoResponse, AddError> {
    PublicKey::from_coordinates(&req.x, &req.y)
        .map_err(|e| AddError::InvalidPublicKey(e.to_string()))?;

    let peer = PeerRecord {
        id: Uuid::new_v4(),
        name: req.name,
        public_key_x: req.x,
        public_key_y: req.y,
        address: req.address,
    };

    state.database().add_peer(peer.clone()).await?;
    tracing::info!(id = %peer.id, address = %peer.address, "peer registered");

    Ok((http::StatusCode::CREATED, Json(AddResponse { peer })).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum AddError {
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}

impl IntoResponse for AddError {
    fn into_response(self) -> Response {
        match self {
            AddError::InvalidPublicKey(msg) => (
                http::StatusCode::BAD_REQUEST,
                format!("Invalid public key: {}", msg),
            )
                .into_response(),
            AddError::Provider(ProviderError::Duplicate(id)) => (
                http::StatusCode::CONFLICT,
                format!("Peer already registered: {}", id),
            )
                .into_response(),
            AddError::Provider(e) => {
                tracing::error!("ADD PEER ERROR: {:?}", e);
                (
                    http::StatusCode::INTERNAL_SERVER_ERROR,
                    "unknown server error",
                )
                    .into_response()
            }
        }
    }
}

// Client implementation - builds request for this operation
impl ApiRequest for AddRequest {
    type Response = AddResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/api/v0/peers").unwrap();
        client.post(full_url).json(&self)
    }
}
