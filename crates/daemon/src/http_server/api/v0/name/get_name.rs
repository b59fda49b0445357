use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use crate::http_server::api::client::ApiRequest;
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetResponse {
    pub name: String,
}

pub async fn handler(State(state): State<ServiceState>) -> Result<impl IntoResponse, GetError> {
    let name = state
        .database()
        .get_name()
        .await
        .map_err(|e| GetError::Database(e.to_string()))?;

    Ok((http::StatusCode::OK, Json(GetResponse { name })).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum GetError {
    #[error("Database error: {0}")]
    Database(String),
}

impl IntoResponse for GetError {
    fn into_response(self) -> Response {
        tracing::error!("GET NAME ERROR: {:?}", self);
        (
            http::StatusCode::INTERNAL_SERVER_ERROR,
            "unknown server error",
        )
            .into_response()
    }
}

#[derive(Debug, Clone, Default, clap::Args)]
pub struct GetRequest;

// Client implementation - builds request for this operation
impl ApiRequest for GetRequest {
    type Response = GetResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/api/v0/name").unwrap();
        client.get(full_url)
    }
}
