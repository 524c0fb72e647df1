use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::auth::{generate_jwt, session_cookie, verify_password, AuthError, Claims};
use crate::error::ApiError;
use crate::handlers::utils::FieldValidator;
use crate::middleware::ApiResponse;
use crate::services::UserService;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/**
 * POST /api/auth/login - verify credentials and start a cookie session
 *
 * Expected Output:
 * ```json
 * { "user": { "id": "uuid", "email": "panda@example.com" } }
 * ```
 * with `Set-Cookie: auth_token=<jwt>; HttpOnly; SameSite=Lax; Path=/; Max-Age=604800`.
 *
 * Unknown email and wrong password give the same 401.
 */
pub async fn login_post(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body?;
    let security = &state.config.security;

    let mut v = FieldValidator::new();
    let email = v.required("email", body.email);
    let password = body.password.filter(|p| !p.is_empty());
    v.check(password.is_some(), "password", "This field is required");
    v.finish()?;
    let password = password.unwrap_or_default();

    // Fail before touching the store when tokens cannot be signed
    if security.jwt_secret.is_empty() {
        return Err(AuthError::MissingSecret.into());
    }

    let user = match UserService::new(state.pool.clone()).find_by_email(&email).await? {
        Some(user) => user,
        None => {
            tracing::warn!("Login rejected: unknown account");
            return Err(AuthError::InvalidCredentials.into());
        }
    };
    if !verify_password(password, user.password_hash.clone()).await? {
        tracing::warn!("Login rejected: bad password for user {}", user.id);
        return Err(AuthError::InvalidCredentials.into());
    }

    let token = generate_jwt(&Claims::new(user.id, &user.email, security.session_hours()), security)?;
    tracing::info!("User {} logged in", user.id);

    Ok((
        [(header::SET_COOKIE, session_cookie(&token, security))],
        ApiResponse::success(json!({ "user": { "id": user.id, "email": user.email } })),
    ))
}
