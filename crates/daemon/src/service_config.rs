use std::path::PathBuf;
use std::time::Duration;

use common::prelude::SecretKey;

#[derive(Debug)]
pub struct Config {
    // identity
    /// the node's secret key, loaded from the key file at startup
    pub node_secret: SecretKey,

    // http server configuration
    /// Port for the HTTP server (protocol endpoints + admin API).
    pub api_port: u16,

    // data store configuration
    /// a path to a sqlite database, if not set then an
    ///  in-memory database will be used
    pub sqlite_path: Option<PathBuf>,
    /// root directory for content-addressed image storage
    pub images_dir: PathBuf,

    // protocol
    /// per-peer timeout during retrieve fan-out
    pub peer_timeout: Duration,

    // logging
    pub log_level: tracing::Level,
    /// Directory for log files (optional, logs to stdout only if not set)
    pub log_dir: Option<PathBuf>,
}
