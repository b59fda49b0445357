use async_trait::async_trait;
use uuid::Uuid;

use crate::types::{PeerRecord, Post};

mod memory;

pub use memory::{MemoryPeerRegistry, MemoryPostStore};

/// Errors surfaced by storage providers
///
/// Providers are external collaborators; the protocol only distinguishes
/// "the record conflicts" from "the backend failed".
#[derive(thiserror::Error, Debug)]
pub enum ProviderError {
    /// A record with the same id already exists
    #[error("record already exists: {0}")]
    Duplicate(Uuid),
    /// Backend-specific failure
    #[error("provider error: {0}")]
    Provider(#[from] anyhow::Error),
}

/// Registry of known peers
///
/// Implementations guarantee `id` uniqueness and nothing else -- in
/// particular they never deduplicate by address. Handles are passed
/// explicitly wherever the protocol needs one, so tests can substitute
/// doubles without a live database.
#[async_trait]
pub trait PeerRegistry: Send + Sync {
    /// All known peers; order is the registry's insertion order
    async fn list_peers(&self) -> Result<Vec<PeerRecord>, ProviderError>;

    /// Add a peer record, failing on a duplicate id
    async fn add_peer(&self, record: PeerRecord) -> Result<(), ProviderError>;
}

/// Store of locally authored posts
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Locally authored posts, oldest first
    ///
    /// When serving another peer's retrieve, this is forwarded verbatim.
    async fn list_local_posts(&self) -> Result<Vec<Post>, ProviderError>;

    /// Append a locally authored post
    async fn append_post(&self, post: Post) -> Result<(), ProviderError>;
}
