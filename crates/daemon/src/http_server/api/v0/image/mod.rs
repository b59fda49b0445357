use axum::routing::get;
use axum::Router;

use crate::ServiceState;

pub mod fetch;
pub mod upload;

// Re-export for convenience
pub use upload::UploadRequest;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/", get(fetch::handler).post(upload::handler))
        .with_state(state)
}
