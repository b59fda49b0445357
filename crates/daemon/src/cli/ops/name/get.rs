use clap::Args;

use nestnet_daemon::http_server::api::client::ApiError;
use nestnet_daemon::http_server::api::v0::name::GetRequest;

#[derive(Args, Debug, Clone)]
pub struct Get;

#[derive(Debug, thiserror::Error)]
pub enum NameGetError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Get {
    type Error = NameGetError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let mut client = ctx.client.clone();
        let response = client.call(GetRequest).await?;

        if response.name.is_empty() {
            Ok("(no name set)".to_string())
        } else {
            Ok(response.name)
        }
    }
}
