use clap::Args;

use nestnet_daemon::http_server::api::client::ApiError;
use nestnet_daemon::http_server::api::v0::posts::FeedRequest;

#[derive(Args, Debug, Clone)]
pub struct Feed;

#[derive(Debug, thiserror::Error)]
pub enum FeedOpError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Feed {
    type Error = FeedOpError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let mut client = ctx.client.clone();
        let posts = client.call(FeedRequest).await?;

        if posts.is_empty() {
            Ok("No posts found".to_string())
        } else {
            let output = posts
                .iter()
                .map(|post| format!("{}  {}\n  {}", post.id, post.title, post.body))
                .collect::<Vec<_>>()
                .join("\n");
            Ok(output)
        }
    }
}
