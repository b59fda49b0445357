use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

/// A single post authored somewhere in the network
///
/// `id` is assigned by the authoring node at creation and preserved verbatim
/// as the post replicates; it is the sole deduplication key during
/// aggregation. Two posts with equal `id` are the same post, regardless of
/// any content difference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    /// Hex content hash of an attached image, empty when there is none
    #[serde(default)]
    pub img_hash: String,
    #[serde(default)]
    pub img_name: String,
}

impl Post {
    /// Author a new post with a fresh id
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            body: body.into(),
            img_hash: String::new(),
            img_name: String::new(),
        }
    }

    pub fn with_image(mut self, img_hash: impl Into<String>, img_name: impl Into<String>) -> Self {
        self.img_hash = img_hash.into();
        self.img_name = img_name.into();
        self
    }
}

/// Registry entry for a known peer
///
/// `id` is unique within the registry (registry-enforced). Records are never
/// mutated in place; replacement is delete + re-add. The public key is
/// carried as explicit hex coordinate fields at the storage boundary, so no
/// runtime type recovery is needed to reconstruct the curve point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerRecord {
    pub id: Uuid,
    pub name: String,
    /// Big-endian hex X coordinate of the peer's public key
    pub public_key_x: String,
    /// Big-endian hex Y coordinate of the peer's public key
    pub public_key_y: String,
    /// Base address the peer's protocol endpoints are served under
    pub address: Url,
}

impl PeerRecord {
    /// The peer's claimed public key as a curve point
    ///
    /// Fails closed if the stored coordinates do not describe a point on the
    /// curve.
    pub fn public_key(&self) -> Result<crate::crypto::PublicKey, crate::crypto::KeyError> {
        crate::crypto::PublicKey::from_coordinates(&self.public_key_x, &self.public_key_y)
    }
}
