//! Error types for the HTTP API.
//!
//! Every failure leaves a handler as an [`ApiError`], which renders as
//! `{"error": "<message>", "code": "<CODE>"}` with a matching status.
//!
//! ```text
//! DbError ─────────┐
//! CoreError ───────┼──► ApiError ──► (StatusCode, Json)
//! JsonRejection ───┘
//! ```

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use insight_core::CoreError;
use insight_db::DbError;

/// Machine-readable error codes sent to clients.
pub mod codes {
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const CATEGORY_NOT_FOUND: &str = "CATEGORY_NOT_FOUND";
    pub const CATEGORY_EMPTY: &str = "CATEGORY_EMPTY";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const INVALID_BODY: &str = "INVALID_BODY";
    pub const DUPLICATE: &str = "DUPLICATE";
    pub const INVALID_REFERENCE: &str = "INVALID_REFERENCE";
    pub const INSERT_FAILED: &str = "INSERT_FAILED";
    pub const DATABASE_ERROR: &str = "DATABASE_ERROR";
    pub const UNAVAILABLE: &str = "UNAVAILABLE";
}

/// API error: status code, error code, human message.
#[derive(Debug, thiserror::Error)]
#[error("{status} {code}: {message}")]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    code: &'a str,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        ApiError {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::new(StatusCode::NOT_FOUND, codes::NOT_FOUND, message)
    }

    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        ApiError::new(StatusCode::BAD_REQUEST, code, message)
    }

    /// 500 with a generic message; the detail only goes to the log.
    pub fn internal(detail: impl std::fmt::Display) -> Self {
        error!(error = %detail, "Internal error while handling request");
        ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            codes::DATABASE_ERROR,
            "Internal server error",
        )
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        ApiError::new(StatusCode::SERVICE_UNAVAILABLE, codes::UNAVAILABLE, message)
    }

    /// Maps a failed insert on a create endpoint. Any storage failure there
    /// is reported as a bad request; only constraint messages reach the client.
    pub fn insert_failed(err: DbError) -> Self {
        if err.is_constraint_violation() {
            return ApiError::from(err);
        }

        error!(error = %err, "Insert failed");
        ApiError::bad_request(codes::INSERT_FAILED, "Record not inserted")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: &self.message,
            code: self.code,
        });
        (self.status, body).into_response()
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::UniqueViolation { .. } => {
                ApiError::bad_request(codes::DUPLICATE, err.to_string())
            }
            DbError::ForeignKeyViolation { .. } => {
                ApiError::bad_request(codes::INVALID_REFERENCE, err.to_string())
            }
            DbError::CheckViolation { .. } | DbError::Invalid(_) => {
                ApiError::bad_request(codes::VALIDATION_ERROR, err.to_string())
            }
            other => ApiError::internal(other),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        match err {
            CoreError::CategoryNotFound(_) => {
                ApiError::new(StatusCode::NOT_FOUND, codes::CATEGORY_NOT_FOUND, message)
            }
            CoreError::CategoryEmpty(_) => {
                ApiError::new(StatusCode::NOT_FOUND, codes::CATEGORY_EMPTY, message)
            }
            CoreError::ProductNotFound(_) | CoreError::SaleNotFound(_) => {
                ApiError::not_found(message)
            }
            CoreError::UnknownCategory(_) => {
                ApiError::bad_request(codes::INVALID_REFERENCE, message)
            }
            CoreError::Validation(_) => ApiError::bad_request(codes::VALIDATION_ERROR, message),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(codes::INVALID_BODY, rejection.body_text())
    }
}

/// A path id that doesn't parse can't name any record.
impl From<PathRejection> for ApiError {
    fn from(_: PathRejection) -> Self {
        ApiError::not_found("Record not found")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insight_core::ValidationError;

    #[test]
    fn test_db_error_mapping() {
        let err = ApiError::from(DbError::duplicate("categories.name", "Software"));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, codes::DUPLICATE);

        let err = ApiError::from(DbError::ForeignKeyViolation {
            message: "FOREIGN KEY constraint failed".to_string(),
        });
        assert_eq!(err.code, codes::INVALID_REFERENCE);

        let err = ApiError::from(DbError::PoolExhausted);
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Internal server error");
    }

    #[test]
    fn test_core_error_mapping() {
        let err = ApiError::from(CoreError::CategoryEmpty(4));
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.code, codes::CATEGORY_EMPTY);
        assert_eq!(err.message, "No product found in category 4");

        let err = ApiError::from(CoreError::CategoryNotFound(4));
        assert_eq!(err.code, codes::CATEGORY_NOT_FOUND);

        let err = ApiError::from(CoreError::UnknownCategory(99));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let err = ApiError::from(CoreError::from(ValidationError::Required {
            field: "Name".to_string(),
        }));
        assert_eq!(err.code, codes::VALIDATION_ERROR);
    }

    #[test]
    fn test_insert_failure_is_bad_request() {
        let err = ApiError::insert_failed(DbError::QueryFailed("database is locked".to_string()));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, codes::INSERT_FAILED);
        assert_eq!(err.message, "Record not inserted");

        let err = ApiError::insert_failed(DbError::duplicate("categories.name", "Web"));
        assert_eq!(err.code, codes::DUPLICATE);
    }

    #[tokio::test]
    async fn test_response_body_shape() {
        let response = ApiError::not_found("Product not found: 7").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Product not found: 7");
        assert_eq!(body["code"], "NOT_FOUND");
    }
}
