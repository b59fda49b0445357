use nestnet_daemon::http_server::api::client::ApiError;

pub use nestnet_daemon::http_server::api::v0::hello::HelloRequest;

#[derive(Debug, thiserror::Error)]
pub enum HelloOpError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for HelloRequest {
    type Error = HelloOpError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let mut client = ctx.client.clone();
        let response = client.call(self.clone()).await?;

        if response.verified {
            Ok(format!("{}: verified", response.addr))
        } else {
            Ok(format!("{}: NOT verified", response.addr))
        }
    }
}
