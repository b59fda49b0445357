use std::collections::HashSet;
use std::time::Duration;

use futures::future::join_all;
use reqwest::Client;
use tokio::time::timeout;

use super::POSTS_PATH;
use crate::store::{PeerRegistry, ProviderError};
use crate::types::{PeerRecord, Post};

/// Per-peer timeout during a retrieve fan-out
pub const DEFAULT_PEER_TIMEOUT: Duration = Duration::from_secs(5);

/// Aggregate posts from every registered peer
///
/// Takes a snapshot of the registry's peer list, then contacts every peer
/// concurrently (one future per peer, each bounded by `per_peer_timeout`), so
/// total latency is bounded by the slowest responding peer rather than the
/// sum. A peer that times out, returns a non-success status, or returns a
/// body that does not parse as a sequence of posts contributes zero posts;
/// one bad peer never aborts the aggregation.
///
/// The merged sequence is deduplicated by post id, keeping the first post
/// encountered in registry order (no content merge or conflict detection).
/// There is no caching: every call re-contacts every peer.
///
/// # Errors
///
/// Only a registry read failure is an error; peer failures are absorbed.
pub async fn retrieve<R>(
    client: &Client,
    registry: &R,
    per_peer_timeout: Duration,
) -> Result<Vec<Post>, ProviderError>
where
    R: PeerRegistry + ?Sized,
{
    let peers = registry.list_peers().await?;
    tracing::debug!(peer_count = peers.len(), "starting retrieve fan-out");

    let fetches = peers
        .iter()
        .map(|peer| fetch_peer_posts(client, peer, per_peer_timeout));
    let results = join_all(fetches).await;

    let mut seen = HashSet::new();
    let mut merged = Vec::new();
    for posts in results {
        for post in posts {
            if seen.insert(post.id) {
                merged.push(post);
            }
        }
    }

    tracing::debug!(post_count = merged.len(), "retrieve complete");
    Ok(merged)
}

/// Fetch one peer's posts, absorbing every failure into an empty result
async fn fetch_peer_posts(client: &Client, peer: &PeerRecord, deadline: Duration) -> Vec<Post> {
    match timeout(deadline, try_fetch(client, peer)).await {
        Ok(Ok(posts)) => {
            tracing::debug!(peer = %peer.id, count = posts.len(), "peer returned posts");
            posts
        }
        Ok(Err(e)) => {
            tracing::warn!(peer = %peer.id, address = %peer.address, "peer fetch failed: {}", e);
            Vec::new()
        }
        Err(_) => {
            tracing::warn!(peer = %peer.id, address = %peer.address, "peer timed out");
            Vec::new()
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum FetchError {
    #[error("peer address does not accept a posts path: {0}")]
    BadAddress(#[from] url::ParseError),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("peer returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed posts body: {0}")]
    MalformedBody(String),
}

async fn try_fetch(client: &Client, peer: &PeerRecord) -> Result<Vec<Post>, FetchError> {
    let posts_url = peer.address.join(POSTS_PATH)?;

    let response = client.get(posts_url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status));
    }

    response
        .json::<Vec<Post>>()
        .await
        .map_err(|e| FetchError::MalformedBody(e.to_string()))
}
