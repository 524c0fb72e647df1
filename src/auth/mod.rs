pub mod cookie;
pub mod password;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::{SecurityConfig, JWT_EXPIRY_HOURS};

pub use cookie::{clear_cookie, session_cookie, token_from_cookie_header, AUTH_COOKIE};
pub use password::{hash_password, verify_password};

const ISSUER: &str = "panda-api";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("JWT secret not configured")]
    MissingSecret,

    #[error("Missing authentication token")]
    MissingToken,

    #[error("Invalid JWT token: {0}")]
    InvalidToken(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password hashing error: {0}")]
    Hashing(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
}

impl Claims {
    /// `expiry_hours` is clamped into [`JWT_EXPIRY_HOURS`]
    pub fn new(user_id: Uuid, email: impl Into<String>, expiry_hours: u64) -> Self {
        let now = Utc::now();
        let hours = expiry_hours.clamp(*JWT_EXPIRY_HOURS.start(), *JWT_EXPIRY_HOURS.end());
        let lifetime = i64::try_from(hours)
            .ok()
            .and_then(Duration::try_hours)
            .unwrap_or_else(|| Duration::hours(1));
        let exp = (now + lifetime).timestamp();

        Self {
            sub: user_id,
            email: email.into(),
            exp,
            iat: now.timestamp(),
            iss: ISSUER.to_string(),
        }
    }
}

pub fn generate_jwt(claims: &Claims, security: &SecurityConfig) -> Result<String, AuthError> {
    if security.jwt_secret.is_empty() {
        return Err(AuthError::MissingSecret);
    }

    let encoding_key = EncodingKey::from_secret(security.jwt_secret.as_bytes());
    encode(&Header::default(), claims, &encoding_key).map_err(|e| AuthError::InvalidToken(e.to_string()))
}

pub fn validate_jwt(token: &str, security: &SecurityConfig) -> Result<Claims, AuthError> {
    if security.jwt_secret.is_empty() {
        return Err(AuthError::MissingSecret);
    }

    let decoding_key = DecodingKey::from_secret(security.jwt_secret.as_bytes());
    let mut validation = Validation::default();
    validation.set_issuer(&[ISSUER]);

    let token_data =
        decode::<Claims>(token, &decoding_key, &validation).map_err(|e| AuthError::InvalidToken(e.to_string()))?;
    Ok(token_data.claims)
}
