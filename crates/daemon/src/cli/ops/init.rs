use clap::Args;

use nestnet_daemon::state::{AppConfig, AppState};

#[derive(Args, Debug, Clone)]
pub struct Init {
    /// API server port
    #[arg(long, default_value = "8080")]
    pub api_port: u16,

    /// Per-peer timeout during retrieve fan-out, in milliseconds
    #[arg(long, default_value = "5000")]
    pub peer_timeout_ms: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("init failed: {0}")]
    StateFailed(#[from] nestnet_daemon::state::StateError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Init {
    type Error = InitError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let config = AppConfig {
            api_port: self.api_port,
            peer_timeout_ms: self.peer_timeout_ms,
        };

        let state = AppState::init(ctx.config_path.clone(), Some(config))?;

        let output = format!(
            "Initialized nestnet directory at: {}\n\
             - Database: {}\n\
             - Key: {}\n\
             - Images: {}\n\
             - Config: {}\n\
             - API port: {}",
            state.nestnet_dir.display(),
            state.db_path.display(),
            state.key_path.display(),
            state.images_path.display(),
            state.config_path.display(),
            state.config.api_port
        );

        Ok(output)
    }
}
