use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use reqwest::{Client, RequestBuilder, Url};

use common::protocol::{WireSignature, CHALLENGE_PATH};

use crate::http_server::api::client::ApiRequest;
use crate::ServiceState;

/// Handshake responder: sign whatever challenge text the caller sent
///
/// The responder does not care what the plaintext is; proving control of the
/// key is the caller's protocol, not ours.
pub async fn handler(State(state): State<ServiceState>, challenge: String) -> impl IntoResponse {
    tracing::debug!(len = challenge.len(), "signing challenge");
    let signature = state.secret().sign(challenge.as_bytes());
    Json(WireSignature::from(&signature))
}

/// Client form of the challenge POST, used by the CLI and tests
#[derive(Debug, Clone, clap::Args)]
pub struct ChallengeRequest {
    /// Challenge plaintext to have the remote node sign
    pub challenge: String,
}

impl ApiRequest for ChallengeRequest {
    type Response = WireSignature;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join(CHALLENGE_PATH).unwrap();
        client
            .post(full_url)
            .header("Content-Type", "text/plain")
            .body(self.challenge)
    }
}
