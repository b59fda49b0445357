use clap::{Args, Subcommand};

pub mod add;
pub mod ls;

use crate::cli::op::Op;
use nestnet_daemon::http_server::api::v0::posts::AddRequest;

crate::command_enum! {
    (Ls, ls::Ls),
    (Add, AddRequest),
}

// Rename the generated Command to PostsCommand for clarity
pub type PostsCommand = Command;

#[derive(Args, Debug, Clone)]
pub struct Posts {
    #[command(subcommand)]
    pub command: PostsCommand,
}

#[async_trait::async_trait]
impl Op for Posts {
    type Error = OpError;
    type Output = OpOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        self.command.execute(ctx).await
    }
}
