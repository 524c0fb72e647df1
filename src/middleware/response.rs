use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

use crate::error::ApiError;

/// A JSON payload paired with the status it is sent with.
///
/// The payload is written bare; list endpoints send `PaginatedResult`
/// (`{ items, pagination }`) and records are sent as-is.
#[derive(Debug)]
pub struct ApiResponse<T> {
    status: StatusCode,
    body: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(body: T) -> Self {
        Self::with_status(body, StatusCode::OK)
    }

    pub fn created(body: T) -> Self {
        Self::with_status(body, StatusCode::CREATED)
    }

    pub fn with_status(body: T, status: StatusCode) -> Self {
        Self { status, body }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn created_sets_201() {
        let response = ApiResponse::created(json!({ "id": 1 }));
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.into_response().status(), StatusCode::CREATED);
    }

    #[test]
    fn success_defaults_to_200() {
        assert_eq!(ApiResponse::success(json!([])).status(), StatusCode::OK);
    }
}
