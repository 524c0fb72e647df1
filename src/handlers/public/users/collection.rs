use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::auth::hash_password;
use crate::database::models::{NewUser, UserProfile};
use crate::handlers::utils::{looks_like_email, FieldValidator};
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::UserService;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub nickname: Option<String>,
    pub receive_email: Option<bool>,
}

/**
 * POST /api/users - create an account
 *
 * Expected Input:
 * ```json
 * { "email": "panda@example.com", "password": "bamboo123", "firstName": "Pan", "lastName": "Da" }
 * ```
 *
 * 201 with the public profile; 409 when the email is taken.
 */
pub async fn users_post(
    State(state): State<AppState>,
    body: Result<Json<SignupRequest>, JsonRejection>,
) -> ApiResult<UserProfile> {
    let Json(body) = body?;
    let min_length = state.config.security.password_min_length;

    let mut v = FieldValidator::new();
    let email = v.required("email", body.email).to_lowercase();
    if !email.is_empty() {
        v.check(looks_like_email(&email), "email", "Invalid email address");
    }
    let password = body.password.unwrap_or_default();
    if password.is_empty() {
        v.reject("password", "This field is required");
    } else {
        v.check(
            password.chars().count() >= min_length,
            "password",
            format!("Password must be at least {} characters", min_length),
        );
    }
    let first_name = v.required("firstName", body.first_name);
    let last_name = v.required("lastName", body.last_name);
    let nickname = v.optional("nickname", body.nickname);
    v.finish()?;

    let user = NewUser {
        email,
        password_hash: hash_password(password).await?,
        first_name,
        last_name,
        nickname,
        receive_email: body.receive_email.unwrap_or(false),
    };

    let created = UserService::new(state.pool.clone()).create(&user).await?;
    tracing::info!("Registered user {}", created.id);
    Ok(ApiResponse::created(UserProfile::from(created)))
}
