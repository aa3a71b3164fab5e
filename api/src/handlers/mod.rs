pub mod health;
pub mod jobs;

// Common response types
use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::errors::{DatabaseError, RepositoryError, ValidationError};
use serde::Serialize;

/// Standard API error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub trace_id: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            trace_id: uuid::Uuid::new_v4().to_string(),
        }
    }

    pub fn unauthorized() -> Self {
        Self::new("unauthorized", "Unauthorized")
    }

    pub fn status(&self) -> StatusCode {
        match self.error.as_str() {
            "unauthorized" => StatusCode::UNAUTHORIZED,
            "forbidden" => StatusCode::FORBIDDEN,
            "not_found" => StatusCode::NOT_FOUND,
            "validation_error" => StatusCode::BAD_REQUEST,
            "conflict" => StatusCode::CONFLICT,
            "service_unavailable" => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

impl From<ValidationError> for ErrorResponse {
    fn from(err: ValidationError) -> Self {
        ErrorResponse::new("validation_error", err.to_string())
    }
}

impl From<RepositoryError> for ErrorResponse {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Validation(e) => e.into(),
            RepositoryError::NotFound(message) => ErrorResponse::new("not_found", message),
            RepositoryError::Database(DatabaseError::DuplicateKey(message)) => {
                ErrorResponse::new("conflict", message)
            }
            RepositoryError::Database(DatabaseError::ForeignKeyViolation(message)) => {
                ErrorResponse::new("validation_error", message)
            }
            RepositoryError::Database(e) => {
                tracing::error!(error = %e, "Database operation failed");
                ErrorResponse::new("database_error", e.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ErrorResponse {
    fn from(rejection: JsonRejection) -> Self {
        ErrorResponse::new("validation_error", rejection.body_text())
    }
}

impl From<QueryRejection> for ErrorResponse {
    fn from(rejection: QueryRejection) -> Self {
        ErrorResponse::new("validation_error", rejection.body_text())
    }
}

impl From<PathRejection> for ErrorResponse {
    fn from(rejection: PathRejection) -> Self {
        ErrorResponse::new("validation_error", rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_map_to_status() {
        assert_eq!(
            ErrorResponse::new("not_found", "x").status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ErrorResponse::new("validation_error", "x").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorResponse::new("database_error", "x").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_repository_errors_map_to_codes() {
        let err: ErrorResponse = RepositoryError::not_found("No job: 1").into();
        assert_eq!(err.error, "not_found");

        let err: ErrorResponse = RepositoryError::from(ValidationError::NoData).into();
        assert_eq!(err.error, "validation_error");
        assert_eq!(err.message, "No data");

        let err: ErrorResponse =
            RepositoryError::from(DatabaseError::ForeignKeyViolation("fk".to_string())).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err: ErrorResponse =
            RepositoryError::from(DatabaseError::QueryFailed("boom".to_string())).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
