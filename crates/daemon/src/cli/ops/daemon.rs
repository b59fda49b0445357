use std::time::Duration;

use clap::Args;

use nestnet_daemon::state::AppState;
use nestnet_daemon::{spawn_service, ServiceConfig};

#[derive(Args, Debug, Clone)]
pub struct Daemon {
    /// Override API server port (default from config)
    #[arg(long)]
    pub api_port: Option<u16>,

    /// Directory for log files (logs to stdout only if not set)
    #[arg(long)]
    pub log_dir: Option<std::path::PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum DaemonError {
    #[error("state error: {0}")]
    StateError(#[from] nestnet_daemon::state::StateError),

    #[error("service error: {0}")]
    Service(#[from] nestnet_daemon::ProcessError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Daemon {
    type Error = DaemonError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        // Load state from config path (or default ~/.nestnet)
        let state = AppState::load(ctx.config_path.clone())?;

        // Load the secret key
        let secret_key = state.load_key()?;

        // Use port from flag or config
        let api_port = self.api_port.unwrap_or(state.config.api_port);

        let config = ServiceConfig {
            node_secret: secret_key,
            api_port,
            sqlite_path: Some(state.db_path),
            images_dir: state.images_path,
            peer_timeout: Duration::from_millis(state.config.peer_timeout_ms),
            log_level: tracing::Level::DEBUG,
            log_dir: self.log_dir.clone(),
        };

        spawn_service(&config).await?;
        Ok("daemon ended".to_string())
    }
}
