use axum::routing::get;
use axum::Router;

use crate::ServiceState;

pub mod get_name;
pub mod set_name;

// Re-export for convenience
pub use get_name::GetRequest;
pub use set_name::SetRequest;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/", get(get_name::handler).post(set_name::handler))
        .with_state(state)
}
