use std::{fs, path::PathBuf};

use common::prelude::SecretKey;
use serde::{Deserialize, Serialize};

pub const APP_NAME: &str = "nestnet";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const DB_FILE_NAME: &str = "db.sqlite";
pub const KEY_FILE_NAME: &str = "key.pem";
pub const IMAGES_DIR_NAME: &str = "images";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Port for the node's HTTP server (protocol + admin API)
    #[serde(default = "default_api_port")]
    pub api_port: u16,
    /// Per-peer timeout during retrieve fan-out, in milliseconds
    #[serde(default = "default_peer_timeout_ms")]
    pub peer_timeout_ms: u64,
}

fn default_api_port() -> u16 {
    8080
}

fn default_peer_timeout_ms() -> u64 {
    5000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_port: default_api_port(),
            peer_timeout_ms: default_peer_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    /// Path to the nestnet directory (~/.nestnet)
    pub nestnet_dir: PathBuf,
    /// Path to the SQLite database
    pub db_path: PathBuf,
    /// Path to the node key PEM file
    pub key_path: PathBuf,
    /// Path to the content-addressed image directory
    pub images_path: PathBuf,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Loaded configuration
    pub config: AppConfig,
}

impl AppState {
    /// Get the nestnet directory path (custom or default ~/.nestnet)
    pub fn nestnet_dir(custom_path: Option<PathBuf>) -> Result<PathBuf, StateError> {
        if let Some(path) = custom_path {
            return Ok(path);
        }

        let home = dirs::home_dir().ok_or(StateError::NoHomeDirectory)?;
        Ok(home.join(format!(".{}", APP_NAME)))
    }

    /// Check if the nestnet directory exists
    pub fn exists(custom_path: Option<PathBuf>) -> Result<bool, StateError> {
        let nestnet_dir = Self::nestnet_dir(custom_path)?;
        Ok(nestnet_dir.exists())
    }

    /// Initialize a new nestnet state directory
    ///
    /// Provisions the node identity: generates the keypair, writes it to the
    /// key file, and writes a default config. The identity is immutable
    /// after this point.
    pub fn init(
        custom_path: Option<PathBuf>,
        config: Option<AppConfig>,
    ) -> Result<Self, StateError> {
        let nestnet_dir = Self::nestnet_dir(custom_path)?;

        if nestnet_dir.exists() {
            return Err(StateError::AlreadyInitialized);
        }

        fs::create_dir_all(&nestnet_dir)?;

        let images_path = nestnet_dir.join(IMAGES_DIR_NAME);
        fs::create_dir_all(&images_path)?;

        // Generate and save key
        let key = SecretKey::generate();
        let key_path = nestnet_dir.join(KEY_FILE_NAME);
        fs::write(&key_path, key.to_pem())?;

        // Create config (use provided or default)
        let config = config.unwrap_or_default();
        let config_path = nestnet_dir.join(CONFIG_FILE_NAME);
        let config_toml = toml::to_string_pretty(&config)?;
        fs::write(&config_path, config_toml)?;

        // Create empty database (just touch the file, it will be initialized by the service)
        let db_path = nestnet_dir.join(DB_FILE_NAME);
        fs::write(&db_path, "")?;

        Ok(Self {
            nestnet_dir,
            db_path,
            key_path,
            images_path,
            config_path,
            config,
        })
    }

    /// Load existing state from the nestnet directory
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self, StateError> {
        let nestnet_dir = Self::nestnet_dir(custom_path)?;

        if !nestnet_dir.exists() {
            return Err(StateError::NotInitialized);
        }

        let db_path = nestnet_dir.join(DB_FILE_NAME);
        let key_path = nestnet_dir.join(KEY_FILE_NAME);
        let images_path = nestnet_dir.join(IMAGES_DIR_NAME);
        let config_path = nestnet_dir.join(CONFIG_FILE_NAME);

        if !db_path.exists() {
            return Err(StateError::MissingFile(DB_FILE_NAME.to_string()));
        }
        if !key_path.exists() {
            return Err(StateError::MissingFile(KEY_FILE_NAME.to_string()));
        }
        if !images_path.exists() {
            return Err(StateError::MissingFile(format!("{}/", IMAGES_DIR_NAME)));
        }
        if !config_path.exists() {
            return Err(StateError::MissingFile(CONFIG_FILE_NAME.to_string()));
        }

        let config_toml = fs::read_to_string(&config_path)?;
        let config: AppConfig = toml::from_str(&config_toml)?;

        Ok(Self {
            nestnet_dir,
            db_path,
            key_path,
            images_path,
            config_path,
            config,
        })
    }

    /// Load state, initializing the directory first if it does not exist
    pub fn load_or_init(custom_path: Option<PathBuf>) -> Result<Self, StateError> {
        if Self::exists(custom_path.clone())? {
            Self::load(custom_path)
        } else {
            Self::init(custom_path, None)
        }
    }

    /// Load the node secret key from the key file
    pub fn load_key(&self) -> Result<SecretKey, StateError> {
        let pem = fs::read_to_string(&self.key_path)?;
        Ok(SecretKey::from_pem(&pem)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("could not determine home directory")]
    NoHomeDirectory,
    #[error("nestnet directory already initialized")]
    AlreadyInitialized,
    #[error("nestnet directory not initialized, run `nestnet init` first")]
    NotInitialized,
    #[error("missing required file: {0}")]
    MissingFile(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("could not encode config: {0}")]
    ConfigEncode(#[from] toml::ser::Error),
    #[error("invalid key file: {0}")]
    Key(#[from] common::crypto::KeyError),
}
