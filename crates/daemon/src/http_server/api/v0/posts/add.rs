use axum::extract::{Json, State};
use axum::response::{IntoResponse, Response};
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use common::prelude::PostStore;
use common::store::ProviderError;
use common::types::Post;

use crate::http_server::api::client::ApiRequest;
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
pub struct AddRequest {
    /// Title of the post
    #[arg(long)]
    pub title: String,

    /// Body text of the post
    #[arg(long)]
    pub body: String,

    /// Content hash of an uploaded image (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long)]
    pub img_hash: Option<String>,

    /// Original file name of the image (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long)]
    pub img_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddResponse {
    pub post: Post,
}

/// Author a local post; the id is assigned here, never by the client
pub async fn handler(
    State(state): State<ServiceState>,
    Json(req): Json<AddRequest>,
) -> Result<impl IntoResponse, AddError> {
    if req.title.is_empty() {
        return Err(AddError::InvalidTitle("Title cannot be empty".into()));
    }

    let post = Post {
        id: Uuid::new_v4(),
        title: req.title,
        body: req.body,
        img_hash: req.img_hash.unwrap_or_default(),
        img_name: req.img_name.unwrap_or_default(),
    };

    state.database().append_post(post.clone()).await?;
    tracing::info!(id = %post.id, "post created");

    Ok((http::StatusCode::CREATED, Json(AddResponse { post })).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum AddError {
    #[error("Invalid title: {0}")]
    InvalidTitle(String),
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}

impl IntoResponse for AddError {
    fn into_response(self) -> Response {
        match self {
            AddError::InvalidTitle(msg) => {
                (http::StatusCode::BAD_REQUEST, format!("Invalid title: {}", msg)).into_response()
            }
            AddError::Provider(e) => {
                tracing::error!("ADD POST ERROR: {:?}", e);
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
        let full_url = base_url.join("/api/v0/posts").unwrap();
        client.post(full_url).json(&self)
    }
}
