use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::hash_password;
use crate::database::models::{UserChanges, UserProfile};
use crate::error::ApiError;
use crate::handlers::utils::{looks_like_email, parse_id, FieldValidator};
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::UserService;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub nickname: Option<String>,
    pub receive_email: Option<bool>,
}

/// GET /api/users/:userId - public profile
pub async fn user_get(State(state): State<AppState>, Path(user_id): Path<String>) -> ApiResult<UserProfile> {
    let id = parse_id(&user_id, "user")?;
    let user = UserService::new(state.pool.clone()).find(id).await?;
    Ok(ApiResponse::success(UserProfile::from(user)))
}

/// PATCH /api/users/:userId - a new password is rehashed before storing
pub async fn user_patch(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    body: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> ApiResult<UserProfile> {
    let id = parse_id(&user_id, "user")?;
    let Json(body) = body?;
    let min_length = state.config.security.password_min_length;

    let mut v = FieldValidator::new();
    let email = v.optional("email", body.email).map(|e| e.to_lowercase());
    if let Some(ref email) = email {
        v.check(looks_like_email(email), "email", "Invalid email address");
    }
    if let Some(ref password) = body.password {
        v.check(
            password.chars().count() >= min_length,
            "password",
            format!("Password must be at least {} characters", min_length),
        );
    }
    let first_name = v.optional("firstName", body.first_name);
    let last_name = v.optional("lastName", body.last_name);
    let nickname = v.optional("nickname", body.nickname);
    v.finish()?;

    let password_hash = match body.password {
        Some(password) => Some(hash_password(password).await?),
        None => None,
    };
    let changes = UserChanges {
        email,
        password_hash,
        first_name,
        last_name,
        nickname,
        receive_email: body.receive_email,
    };
    if changes.is_empty() {
        return Err(ApiError::bad_request("No updatable fields provided"));
    }

    let updated = UserService::new(state.pool.clone()).update(id, &changes).await?;
    Ok(ApiResponse::success(UserProfile::from(updated)))
}

/// DELETE /api/users/:userId
pub async fn user_delete(State(state): State<AppState>, Path(user_id): Path<String>) -> ApiResult<Value> {
    let id = parse_id(&user_id, "user")?;
    UserService::new(state.pool.clone()).delete(id).await?;
    tracing::info!("Deleted user {}", id);
    Ok(ApiResponse::success(json!({ "message": "User deleted successfully" })))
}
