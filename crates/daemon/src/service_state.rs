use std::time::Duration;

use common::prelude::{PublicKey, SecretKey};

use crate::database::{Database, DatabaseSetupError};
use crate::images::{ImageStore, ImageStoreError};
use crate::service_config::Config as ServiceConfig;

/// Shared state for the running service
///
/// Holds the node identity, the storage handles, and the outbound HTTP
/// client used for peer contact. Cloning is cheap; every handler gets a
/// clone through axum's `State` extractor.
#[derive(Clone)]
pub struct State {
    secret: SecretKey,
    database: Database,
    images: ImageStore,
    client: reqwest::Client,
    peer_timeout: Duration,
}

impl std::fmt::Debug for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("State")
            .field("database", &self.database)
            .field("images", &self.images)
            .field("secret", &"<SecretKey>")
            .finish()
    }
}

impl State {
    pub async fn from_config(config: &ServiceConfig) -> Result<Self, StateSetupError> {
        let database = Database::connect(config.sqlite_path.as_deref()).await?;
        let images = ImageStore::new(&config.images_dir)?;
        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            secret: config.node_secret.clone(),
            database,
            images,
            client,
            peer_timeout: config.peer_timeout,
        })
    }

    /// The node's signing identity
    pub fn secret(&self) -> &SecretKey {
        &self.secret
    }

    /// The node's public curve point
    pub fn public_key(&self) -> PublicKey {
        self.secret.public()
    }

    /// Storage handle; doubles as the peer registry and the post store
    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn images(&self) -> &ImageStore {
        &self.images
    }

    /// Outbound client shared by the handshake and the aggregator
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    pub fn peer_timeout(&self) -> Duration {
        self.peer_timeout
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateSetupError {
    #[error("database setup failed: {0}")]
    Database(#[from] DatabaseSetupError),
    #[error("image store setup failed: {0}")]
    Images(#[from] ImageStoreError),
    #[error("http client setup failed: {0}")]
    HttpClient(#[from] reqwest::Error),
}
