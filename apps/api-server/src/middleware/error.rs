//! Error handling - every failure leaves as a `{message, status}` envelope.

use actix_web::error::{JsonPayloadError, PathError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use quill_core::DomainError;
use quill_core::domain::FieldErrors;
use quill_shared::ErrorResponse;
use std::fmt;

/// Application-level error type that converts to envelope responses.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    Validation(FieldErrors),
    /// Message is returned to the client as-is.
    Internal(String),
    /// Detail is logged; the client only sees a generic message.
    Unexpected(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Validation(errors) => write!(f, "Validation errors: {}", errors),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
            AppError::Unexpected(msg) => write!(f, "Unexpected error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal(_) | AppError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(message) => ErrorResponse::not_found(message),
            AppError::Validation(errors) => {
                ErrorResponse::unprocessable(errors.summary(), errors.clone().into_pairs())
            }
            // Already logged where the write failed.
            AppError::Internal(message) => ErrorResponse::internal_error(message),
            AppError::Unexpected(detail) => {
                tracing::error!("Unexpected error: {}", detail);
                ErrorResponse::internal_error("Server Error")
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { .. } | DomainError::EmptyCollection(_) => {
                AppError::NotFound(err.to_string())
            }
            DomainError::Validation(errors) => AppError::Validation(errors),
            DomainError::Internal(message) => AppError::Internal(message),
            DomainError::Repository(e) => AppError::Unexpected(e.to_string()),
        }
    }
}

/// Bodies that don't deserialize are reported like any other validation failure.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "Rejected request body");
    AppError::Validation(FieldErrors::single("request", err.to_string())).into()
}

/// A path id that isn't a UUID can't name any post.
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "Rejected path parameter");
    AppError::NotFound("Post not found".to_string()).into()
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::error::RepoError;
    use uuid::Uuid;

    #[test]
    fn test_domain_errors_map_to_status_codes() {
        let cases = [
            (
                AppError::from(DomainError::NotFound {
                    entity_type: "Post",
                    id: Uuid::new_v4(),
                }),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::from(DomainError::EmptyCollection("posts")),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::from(DomainError::Validation(FieldErrors::single("title", "bad"))),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                AppError::from(DomainError::Internal("boom".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::from(DomainError::Repository(RepoError::Connection(
                    "refused".to_string(),
                ))),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(error.status_code(), status, "{error}");
            assert_eq!(error.error_response().status(), status);
        }
    }

    #[actix_web::test]
    async fn test_internal_error_body_carries_message() {
        let res = AppError::Internal("Query execution failed: lock timeout".to_string())
            .error_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = actix_web::body::to_bytes(res.into_body()).await.unwrap();
        assert_eq!(
            body.as_ref(),
            br#"{"message":"Query execution failed: lock timeout","status":500}"#
        );
    }

    #[actix_web::test]
    async fn test_validation_errors_keep_field_order() {
        let mut errors = FieldErrors::single("title", "The title field is required.");
        errors.add("body", "The body field is required.");

        let body = actix_web::body::to_bytes(AppError::Validation(errors).error_response().into_body())
            .await
            .unwrap();
        assert_eq!(
            body.as_ref(),
            br#"{"message":"The title field is required. (and 1 more error)","status":422,"errors":{"title":["The title field is required."],"body":["The body field is required."]}}"#
        );
    }

    #[test]
    fn test_unhandled_repository_failure_is_opaque() {
        let error = AppError::from(DomainError::Repository(RepoError::Query(
            "relation \"posts\" does not exist".to_string(),
        )));
        assert!(matches!(error, AppError::Unexpected(ref d) if d.contains("posts")));
    }
}
