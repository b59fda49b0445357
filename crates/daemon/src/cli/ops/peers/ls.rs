use clap::Args;

use nestnet_daemon::http_server::api::client::ApiError;
use nestnet_daemon::http_server::api::v0::peers::ListRequest;

#[derive(Args, Debug, Clone)]
pub struct Ls;

#[derive(Debug, thiserror::Error)]
pub enum PeersLsError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Ls {
    type Error = PeersLsError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let mut client = ctx.client.clone();
        let peers = client.call(ListRequest).await?;

        if peers.is_empty() {
            Ok("No peers registered".to_string())
        } else {
            let output = peers
                .iter()
                .map(|peer| format!("{}  {}  {}", peer.id, peer.name, peer.address))
                .collect::<Vec<_>>()
                .join("\n");
            Ok(output)
        }
    }
}
