use axum::routing::post;
use axum::Router;

pub mod challenge;
pub mod hello;
pub mod image;
pub mod name;
pub mod peers;
pub mod posts;

use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/challenge", post(challenge::handler))
        .route("/hello", post(hello::handler))
        .nest("/posts", posts::router(state.clone()))
        .nest("/peers", peers::router(state.clone()))
        .nest("/name", name::router(state.clone()))
        .nest("/image", image::router(state.clone()))
        .with_state(state)
}
