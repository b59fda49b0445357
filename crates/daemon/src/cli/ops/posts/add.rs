use nestnet_daemon::http_server::api::client::ApiError;
use nestnet_daemon::http_server::api::v0::posts::AddRequest;

#[derive(Debug, thiserror::Error)]
pub enum PostsAddError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for AddRequest {
    type Error = PostsAddError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let mut client = ctx.client.clone();
        let response = client.call(self.clone()).await?;

        Ok(format!(
            "Created post {} ({})",
            response.post.id, response.post.title
        ))
    }
}
