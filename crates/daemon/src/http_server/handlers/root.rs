use axum::response::IntoResponse;

/// Plain-text greeting, handy for checking a node is up from a browser
pub async fn root_handler() -> impl IntoResponse {
    "Hello, world!\n"
}
