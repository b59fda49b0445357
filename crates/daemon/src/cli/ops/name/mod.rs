use clap::{Args, Subcommand};

pub mod get;
pub mod set;

use crate::cli::op::Op;
use nestnet_daemon::http_server::api::v0::name::SetRequest;

crate::command_enum! {
    (Get, get::Get),
    (Set, SetRequest),
}

// Rename the generated Command to NameCommand for clarity
pub type NameCommand = Command;

#[derive(Args, Debug, Clone)]
pub struct Name {
    #[command(subcommand)]
    pub command: NameCommand,
}

#[async_trait::async_trait]
impl Op for Name {
    type Error = OpError;
    type Output = OpOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        self.command.execute(ctx).await
    }
}
