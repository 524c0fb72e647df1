use axum::extract::rejection::JsonRejection;
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};
use std::collections::BTreeMap;

use crate::auth::AuthError;
use crate::database::DatabaseError;
use crate::query::QueryError;

/// Field name → problem, rendered as `fieldErrors`
pub type FieldErrors = BTreeMap<String, String>;

const GENERIC_FAILURE: &str = "An error occurred while processing your request";

/// Failure returned by a handler. Rendered as `{ message, code }` with the
/// matching status; validation failures add `fieldErrors`.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    ValidationError {
        message: String,
        field_errors: Option<FieldErrors>,
    },
    InvalidJson(String),
    Unauthorized(String),
    NotFound(String),
    Conflict(String),
    InternalServerError(String),
    ServiceUnavailable(String),
}

impl ApiError {
    fn classify(&self) -> (StatusCode, &'static str) {
        use ApiError::*;
        match self {
            BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ValidationError { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            InvalidJson(_) => (StatusCode::BAD_REQUEST, "INVALID_JSON"),
            Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            InternalServerError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_SERVER_ERROR"),
            ServiceUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE"),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        self.classify().0
    }

    pub fn error_code(&self) -> &'static str {
        self.classify().1
    }

    /// Client-safe error message
    pub fn message(&self) -> &str {
        use ApiError::*;
        match self {
            ValidationError { message, .. } => message,
            BadRequest(msg) | InvalidJson(msg) | Unauthorized(msg) | NotFound(msg) | Conflict(msg)
            | InternalServerError(msg) | ServiceUnavailable(msg) => msg,
        }
    }

    pub fn to_json(&self) -> Value {
        let mut body = json!({ "message": self.message(), "code": self.error_code() });
        if let ApiError::ValidationError { field_errors: Some(fields), .. } = self {
            body["fieldErrors"] = json!(fields);
        }
        body
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn validation_error(message: impl Into<String>, field_errors: Option<FieldErrors>) -> Self {
        ApiError::ValidationError { message: message.into(), field_errors }
    }

    pub fn invalid_json(message: impl Into<String>) -> Self {
        ApiError::InvalidJson(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        if err.is_unavailable() {
            tracing::error!("Database unavailable: {}", err);
            return ApiError::service_unavailable("Database temporarily unavailable");
        }
        match err {
            DatabaseError::NotFound(msg) => ApiError::not_found(msg),
            DatabaseError::Conflict(msg) => ApiError::conflict(msg),
            misconfigured @ (DatabaseError::ConfigMissing(_) | DatabaseError::InvalidDatabaseUrl) => {
                tracing::error!("Database misconfigured: {}", misconfigured);
                ApiError::service_unavailable("Database temporarily unavailable")
            }
            // Don't expose internal SQL errors to clients
            other => {
                tracing::error!("Database error: {}", other);
                ApiError::internal_server_error(GENERIC_FAILURE)
            }
        }
    }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::Store(db) => db.into(),
            violation => {
                tracing::error!("List store contract violation: {}", violation);
                ApiError::internal_server_error(GENERIC_FAILURE)
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingSecret => {
                tracing::error!("JWT_SECRET is not configured");
                ApiError::internal_server_error("Server misconfigured: JWT_SECRET is missing")
            }
            AuthError::MissingToken => ApiError::unauthorized("Authentication required"),
            AuthError::InvalidToken(reason) => {
                tracing::warn!("Rejected token: {}", reason);
                ApiError::unauthorized("Invalid or expired token")
            }
            AuthError::InvalidCredentials => ApiError::unauthorized("Invalid email or password"),
            AuthError::Hashing(reason) => {
                tracing::error!("Password hashing failed: {}", reason);
                ApiError::internal_server_error(GENERIC_FAILURE)
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected JSON body: {}", rejection.body_text());
        ApiError::invalid_json("Request body must be valid JSON")
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
