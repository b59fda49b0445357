use std::time::Duration;

use reqwest::Client;
use tokio::time::timeout;
use url::Url;

use super::messages::WireSignature;
use super::{CHALLENGE, CHALLENGE_PATH};
use crate::crypto::PublicKey;

/// Transport timeout for the single challenge/response exchange
pub const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(10);

/// Reasons a handshake can fail
///
/// Diagnostic only: the protocol contract is boolean, and [`verify_peer`]
/// collapses all of these to `false`. Callers that want the reason (tests,
/// logs) can use [`challenge_peer`] directly.
#[derive(Debug, thiserror::Error)]
pub enum HandshakeError {
    #[error("peer address does not accept a challenge path: {0}")]
    BadAddress(#[from] url::ParseError),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("peer returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed signature response: {0}")]
    MalformedResponse(String),
    #[error("signature verification failed")]
    VerificationFailed,
    #[error("handshake timed out")]
    Timeout,
}

/// Challenge the peer at `address` to prove control of `claimed`
///
/// Drives the full handshake: compose the fixed challenge, POST it to the
/// peer's challenge endpoint, await the `(r, s)` response within
/// [`HANDSHAKE_TIMEOUT`], and verify the signature over SHA-256 of the
/// challenge against the claimed key.
///
/// The boolean result is the whole protocol contract: `true` iff the remote
/// end signed our challenge with the private key matching `claimed`. There
/// are no partial-success states and no retries; malformed responses,
/// transport errors, timeouts, and verification failures all report `false`.
pub async fn verify_peer(client: &Client, address: &Url, claimed: &PublicKey) -> bool {
    match challenge_peer(client, address, claimed).await {
        Ok(()) => {
            tracing::info!(%address, "handshake verified");
            true
        }
        Err(e) => {
            tracing::warn!(%address, "handshake failed: {}", e);
            false
        }
    }
}

/// The handshake with its failure reason exposed
pub async fn challenge_peer(
    client: &Client,
    address: &Url,
    claimed: &PublicKey,
) -> Result<(), HandshakeError> {
    let challenge_url = address.join(CHALLENGE_PATH)?;

    tracing::debug!(%challenge_url, "sending challenge");
    let exchange = async {
        let response = client
            .post(challenge_url)
            .body(CHALLENGE)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(HandshakeError::Status(status));
        }

        response
            .json::<WireSignature>()
            .await
            .map_err(|e| HandshakeError::MalformedResponse(e.to_string()))
    };

    let wire = timeout(HANDSHAKE_TIMEOUT, exchange)
        .await
        .map_err(|_| HandshakeError::Timeout)??;

    let signature = wire
        .to_signature()
        .map_err(|e| HandshakeError::MalformedResponse(e.to_string()))?;

    claimed
        .verify(CHALLENGE.as_bytes(), &signature)
        .map_err(|_| HandshakeError::VerificationFailed)
}
