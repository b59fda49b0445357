use axum::http::{header, HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;

/// Fallback for routes outside the protocol and admin surface
///
/// API consumers (Accept: application/json) get a structured body naming the
/// missing path; everything else gets plain text.
pub async fn not_found_handler(uri: Uri, headers: HeaderMap) -> Response {
    let wants_json = headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("application/json"));

    if wants_json {
        let body = serde_json::json!({ "msg": "not found", "path": uri.path() });
        (StatusCode::NOT_FOUND, Json(body)).into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "text/plain")],
            format!("no such route: {}\n", uri.path()),
        )
            .into_response()
    }
}
