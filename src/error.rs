use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, warn};

use crate::models::ErrorResponse;
use crate::store::StoreError;

pub const INVALID_JSON: &str = "JSON parse error";
pub const INTERNAL_ERROR: &str = "Internal error please try again";
pub const INVALID_DATE: &str = "Could not parse date, format should be YYYY-MM-DD";
pub const CLASS_DOES_NOT_EXIST: &str = "Requested class does not exist";

#[derive(Debug)]
pub enum ApiError {
    MalformedInput(String),
    InvalidDate(String),
    NotFound,
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedInput(_) | ApiError::InvalidDate(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ApiError::MalformedInput(_) => INVALID_JSON,
            ApiError::InvalidDate(_) => INVALID_DATE,
            ApiError::NotFound => CLASS_DOES_NOT_EXIST,
            ApiError::Internal(_) => INTERNAL_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::MalformedInput(detail) => warn!("Rejected request body: {detail}"),
            ApiError::InvalidDate(raw) => warn!("Rejected date {raw:?}"),
            ApiError::NotFound => {}
            ApiError::Internal(detail) => error!("Internal error: {detail}"),
        }

        let body = ErrorResponse {
            error: self.message().to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(value: serde_json::Error) -> Self {
        ApiError::MalformedInput(value.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::ClassNotFound { .. } | StoreError::UnknownClassId(_) => ApiError::NotFound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(error: ApiError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_error_body_and_status() {
        let (status, body) = body_of(ApiError::MalformedInput("eof".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({"error": INVALID_JSON}));

        let (status, body) = body_of(ApiError::InvalidDate("2006-13-12".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], INVALID_DATE);

        let (status, body) = body_of(ApiError::NotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], CLASS_DOES_NOT_EXIST);

        let (status, body) = body_of(ApiError::Internal("boom".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], INTERNAL_ERROR);
    }

    #[test]
    fn test_from_store_error() {
        let err: ApiError = StoreError::UnknownClassId("42".into()).into();
        assert!(matches!(err, ApiError::NotFound));
    }
}
