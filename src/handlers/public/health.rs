// handlers/public/health.rs - GET /api/health

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use serde_json::json;

use crate::middleware::ApiResponse;
use crate::services::ProductService;
use crate::state::AppState;

/// Probe the store with a cheap count. 503 when it cannot be reached;
/// the underlying error is only included outside production.
pub async fn health_get(State(state): State<AppState>) -> Response {
    match ProductService::new(state.pool.clone()).count().await {
        Ok(count) => ApiResponse::success(json!({
            "status": "online",
            "database": "connected",
            "count": count,
            "timestamp": Utc::now(),
        }))
        .into_response(),
        Err(err) => {
            tracing::error!("Health check failed: {}", err);
            let mut body = json!({
                "status": "error",
                "database": "disconnected",
                "timestamp": Utc::now(),
            });
            if !state.config.is_production() {
                body["error"] = json!(err.to_string());
            }
            ApiResponse::with_status(body, StatusCode::SERVICE_UNAVAILABLE).into_response()
        }
    }
}
