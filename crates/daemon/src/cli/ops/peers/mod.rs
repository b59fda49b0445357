use clap::{Args, Subcommand};

pub mod add;
pub mod ls;

use crate::cli::op::Op;
use nestnet_daemon::http_server::api::v0::peers::AddRequest;

crate::command_enum! {
    (Ls, ls::Ls),
    (Add, AddRequest),
}

// Rename the generated Command to PeersCommand for clarity
pub type PeersCommand = Command;

#[derive(Args, Debug, Clone)]
pub struct Peers {
    #[command(subcommand)]
    pub command: PeersCommand,
}

#[async_trait::async_trait]
impl Op for Peers {
    type Error = OpError;
    type Output = OpOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        self.command.execute(ctx).await
    }
}
