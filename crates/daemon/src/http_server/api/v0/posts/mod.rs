use axum::routing::get;
use axum::Router;

use crate::ServiceState;

pub mod add;
pub mod feed;
pub mod list;

// Re-export for convenience
pub use add::AddRequest;
pub use feed::FeedRequest;
pub use list::ListRequest;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/", get(list::handler).post(add::handler))
        .route("/feed", get(feed::handler))
        .with_state(state)
}
