use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use serde_json::json;

use crate::auth::clear_cookie;
use crate::middleware::ApiResponse;
use crate::state::AppState;

/// POST /api/auth/logout - expire the session cookie
pub async fn logout_post(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::SET_COOKIE, clear_cookie(&state.config.security))],
        ApiResponse::success(json!({ "message": "Logged out" })),
    )
}
