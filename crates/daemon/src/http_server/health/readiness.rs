use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tokio::time::timeout;

use crate::ServiceState;

const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(10);

pub async fn handler(State(state): State<ServiceState>) -> Response {
    match timeout(HEALTH_CHECK_TIMEOUT, state.database().ping()).await {
        Ok(Ok(())) => {
            let msg = serde_json::json!({"status": "ok"});
            (StatusCode::OK, Json(msg)).into_response()
        }
        Ok(Err(e)) => {
            tracing::warn!("readiness check failed: {}", e);
            let msg = serde_json::json!({
                "status": "failure",
                "message": "database isn't available"
            });
            (StatusCode::SERVICE_UNAVAILABLE, Json(msg)).into_response()
        }
        Err(_) => {
            let msg = serde_json::json!({
                "status": "failure",
                "message": "health check timed out"
            });
            (StatusCode::SERVICE_UNAVAILABLE, Json(msg)).into_response()
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use common::prelude::SecretKey;
    use tempfile::TempDir;

    use crate::service_config::Config as ServiceConfig;

    #[tokio::test]
    async fn test_handler_reports_ok() {
        let temp = TempDir::new().unwrap();
        let config = ServiceConfig {
            node_secret: SecretKey::generate(),
            api_port: 0,
            sqlite_path: None,
            images_dir: temp.path().join("images"),
            peer_timeout: Duration::from_secs(1),
            log_level: tracing::Level::DEBUG,
            log_dir: None,
        };
        let state = ServiceState::from_config(&config).await.unwrap();

        let response = handler(State(state)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
