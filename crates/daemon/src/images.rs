use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

/// Content-addressed image storage
///
/// Images are stored as files under a single root directory, keyed by the
/// lowercase hex SHA-256 of their contents. Keys are validated before they
/// touch the filesystem, so a lookup can never escape the root.
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum ImageStoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid content hash")]
    InvalidHash,
}

impl ImageStore {
    /// Open (and create if needed) an image store rooted at `root`
    pub fn new(root: impl AsRef<Path>) -> Result<Self, ImageStoreError> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Store image bytes, returning their hex content hash
    ///
    /// Storing the same bytes twice is a no-op that returns the same hash.
    pub async fn put(&self, data: &[u8]) -> Result<String, ImageStoreError> {
        let hash = hex::encode(Sha256::digest(data));
        let path = self.path_for(&hash)?;
        tokio::fs::write(&path, data).await?;
        tracing::debug!(%hash, "stored image");
        Ok(hash)
    }

    /// Fetch image bytes by content hash
    pub async fn get(&self, hash: &str) -> Result<Option<Vec<u8>>, ImageStoreError> {
        let path = self.path_for(hash)?;
        match tokio::fs::read(&path).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Validate a hash key and resolve it to a file path under the root
    fn path_for(&self, hash: &str) -> Result<PathBuf, ImageStoreError> {
        let valid = hash.len() == 64 && hash.chars().all(|c| c.is_ascii_hexdigit());
        if !valid {
            return Err(ImageStoreError::InvalidHash);
        }
        Ok(self.root.join(format!("{}.png", hash.to_lowercase())))
    }
}
