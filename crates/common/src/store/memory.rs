use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use super::{PeerRegistry, PostStore, ProviderError};
use crate::types::{PeerRecord, Post};

/// In-memory peer registry
///
/// Used by tests and by nodes running without a database. Insertion order is
/// preserved so aggregation over the registry is deterministic.
#[derive(Debug, Clone, Default)]
pub struct MemoryPeerRegistry {
    inner: Arc<RwLock<Vec<PeerRecord>>>,
}

impl MemoryPeerRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PeerRegistry for MemoryPeerRegistry {
    async fn list_peers(&self) -> Result<Vec<PeerRecord>, ProviderError> {
        let inner = self
            .inner
            .read()
            .map_err(|e| anyhow::anyhow!("failed to acquire read lock: {}", e))?;
        Ok(inner.clone())
    }

    async fn add_peer(&self, record: PeerRecord) -> Result<(), ProviderError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|e| anyhow::anyhow!("failed to acquire write lock: {}", e))?;
        if inner.iter().any(|p| p.id == record.id) {
            return Err(ProviderError::Duplicate(record.id));
        }
        inner.push(record);
        Ok(())
    }
}

/// In-memory post store
#[derive(Debug, Clone, Default)]
pub struct MemoryPostStore {
    inner: Arc<RwLock<Vec<Post>>>,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn list_local_posts(&self) -> Result<Vec<Post>, ProviderError> {
        let inner = self
            .inner
            .read()
            .map_err(|e| anyhow::anyhow!("failed to acquire read lock: {}", e))?;
        Ok(inner.clone())
    }

    async fn append_post(&self, post: Post) -> Result<(), ProviderError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|e| anyhow::anyhow!("failed to acquire write lock: {}", e))?;
        inner.push(post);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use url::Url;
    use uuid::Uuid;

    fn record(id: Uuid) -> PeerRecord {
        PeerRecord {
            id,
            name: "peer".to_string(),
            public_key_x: "00".to_string(),
            public_key_y: "00".to_string(),
            address: Url::parse("http://localhost:1").unwrap(),
        }
    }

    #[tokio::test]
    async fn test_registry_rejects_duplicate_id() {
        let registry = MemoryPeerRegistry::new();
        let id = Uuid::new_v4();

        registry.add_peer(record(id)).await.unwrap();
        let err = registry.add_peer(record(id)).await.unwrap_err();
        assert!(matches!(err, ProviderError::Duplicate(dup) if dup == id));

        // a different id with the same address is accepted
        registry.add_peer(record(Uuid::new_v4())).await.unwrap();
        assert_eq!(registry.list_peers().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_post_store_preserves_order() {
        let store = MemoryPostStore::new();
        let first = Post::new("first", "a");
        let second = Post::new("second", "b");

        store.append_post(first.clone()).await.unwrap();
        store.append_post(second.clone()).await.unwrap();

        let posts = store.list_local_posts().await.unwrap();
        assert_eq!(posts, vec![first, second]);
    }
}
