use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::images::ImageStoreError;
use crate::ServiceState;

#[derive(Debug, Clone, Deserialize)]
pub struct FetchParams {
    pub hash: String,
}

/// Image bytes by content hash
pub async fn handler(
    State(state): State<ServiceState>,
    Query(params): Query<FetchParams>,
) -> Result<impl IntoResponse, FetchError> {
    let data = state
        .images()
        .get(&params.hash)
        .await?
        .ok_or_else(|| FetchError::NotFound(params.hash.clone()))?;

    Ok((
        http::StatusCode::OK,
        [(axum::http::header::CONTENT_TYPE, "image/png")],
        data,
    )
        .into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("No image with hash: {0}")]
    NotFound(String),
    #[error("Image store error: {0}")]
    Store(#[from] ImageStoreError),
}

impl IntoResponse for FetchError {
    fn into_response(self) -> Response {
        match self {
            FetchError::NotFound(hash) => (
                http::StatusCode::NOT_FOUND,
                format!("No image with hash: {}", hash),
            )
                .into_response(),
            FetchError::Store(ImageStoreError::InvalidHash) => {
                (http::StatusCode::BAD_REQUEST, "Invalid content hash").into_response()
            }
            FetchError::Store(e) => {
                tracing::error!("FETCH IMAGE ERROR: {:?}", e);
                (
                    http::StatusCode::INTERNAL_SERVER_ERROR,
                    "unknown server error",
                )
                    .into_response()
            }
        }
    }
}
