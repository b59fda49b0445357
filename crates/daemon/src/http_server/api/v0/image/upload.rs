use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use base64::Engine;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use crate::http_server::api::client::ApiRequest;
use crate::images::ImageStoreError;
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Hex content hash of the stored image
    pub hash: String,
    /// Path the image can be fetched from on this node
    pub url: String,
}

/// Store a base64-encoded image by content hash
pub async fn handler(
    State(state): State<ServiceState>,
    body: String,
) -> Result<impl IntoResponse, UploadError> {
    let data = base64::engine::general_purpose::STANDARD
        .decode(body.trim())
        .map_err(|e| UploadError::InvalidBase64(e.to_string()))?;

    let hash = state.images().put(&data).await?;
    let url = format!("/api/v0/image?hash={}", hash);

    Ok((http::StatusCode::CREATED, Json(UploadResponse { hash, url })).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Invalid base64 body: {0}")]
    InvalidBase64(String),
    #[error("Image store error: {0}")]
    Store(#[from] ImageStoreError),
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        match self {
            UploadError::InvalidBase64(msg) => (
                http::StatusCode::BAD_REQUEST,
                format!("Invalid base64 body: {}", msg),
            )
                .into_response(),
            UploadError::Store(e) => {
                tracing::error!("UPLOAD IMAGE ERROR: {:?}", e);
                (
                    http::StatusCode::INTERNAL_SERVER_ERROR,
                    "unknown server error",
                )
                    .into_response()
            }
        }
    }
}

/// Client form of the image upload, used by the CLI
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Raw image bytes; encoded to base64 on the wire
    pub data: Vec<u8>,
}

impl ApiRequest for UploadRequest {
    type Response = UploadResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/api/v0/image").unwrap();
        let encoded = base64::engine::general_purpose::STANDARD.encode(&self.data);
        client
            .post(full_url)
            .header("Content-Type", "text/plain")
            .body(encoded)
    }
}
