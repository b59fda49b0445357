use axum::extract::{Json, State};
use axum::response::{IntoResponse, Response};
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use crate::http_server::api::client::ApiRequest;
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
pub struct SetRequest {
    /// Display name for this node
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetResponse {
    pub name: String,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Json(req): Json<SetRequest>,
) -> Result<impl IntoResponse, SetError> {
    state
        .database()
        .set_name(&req.name)
        .await
        .map_err(|e| SetError::Database(e.to_string()))?;
    tracing::info!(name = %req.name, "local name updated");

    Ok((http::StatusCode::OK, Json(SetResponse { name: req.name })).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum SetError {
    #[error("Database error: {0}")]
    Database(String),
}

impl IntoResponse for SetError {
    fn into_response(self) -> Response {
        tracing::error!("SET NAME ERROR: {:?}", self);
        (
            http::StatusCode::INTERNAL_SERVER_ERROR,
            "unknown server error",
        )
            .into_response()
    }
}

// Client implementation - builds request for this operation
impl ApiRequest for SetRequest {
    type Response = SetResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/api/v0/name").unwrap();
        client.post(full_url).json(&self)
    }
}
