pub use clap::Parser;

use std::path::PathBuf;
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "nestnet")]
#[command(about = "A federated posting network node")]
pub struct Args {
    /// Remote node API to talk to (defaults to the local daemon)
    #[arg(long, global = true)]
    pub remote: Option<Url>,

    /// Path to the nestnet config directory (defaults to ~/.nestnet)
    #[arg(long, global = true)]
    pub config_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: crate::Command,
}
