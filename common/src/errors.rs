//! Application error types.
//!
//! Database failures are split by the stage that produced them so callers
//! decide per case how to report them.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::response::ErrorBody;

/// Result alias used throughout the service.
pub type AppResult<T> = Result<T, AppError>;

/// Errors produced while serving a request.
#[derive(Debug, Error)]
pub enum AppError {
    /// Opening the connection failed.
    #[error("{0}")]
    DatabaseConnection(String),

    /// Executing or reading a query failed.
    #[error("{0}")]
    DatabaseQuery(String),

    /// The connector produced no connection and reported no error.
    #[error("Database unavailable")]
    DatabaseUnavailable,
}

impl AppError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::DatabaseUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::DatabaseConnection(_) | AppError::DatabaseQuery(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::warn!(status = %status, error = %self, "request failed");
        (status, Json(ErrorBody::new(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_unavailable_is_503() {
        let (status, body) = body_json(AppError::DatabaseUnavailable).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body, serde_json::json!({ "error": "Database unavailable" }));
    }

    #[tokio::test]
    async fn test_driver_message_is_passed_through() {
        let (status, body) =
            body_json(AppError::DatabaseQuery("relation \"x\" does not exist".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({ "error": "relation \"x\" does not exist" }));
    }

    #[tokio::test]
    async fn test_connection_failure_is_500() {
        let (status, _) = body_json(AppError::DatabaseConnection("refused".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
