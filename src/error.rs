//! Error handling module
//!
//! Centralized error types and HTTP response conversion. Every failure of a
//! request ends up here and is rendered as one uniform JSON envelope.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;
use crate::repository::RepositoryError;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Client errors (4xx)
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Server errors (5xx)
    #[error("Repository error: {0}")]
    Repository(RepositoryError),
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Conflict(msg) => AppError::Domain(DomainError::Conflict(msg)),
            RepositoryError::CustomerNotFound(id) => {
                AppError::Domain(DomainError::customer_not_found(id))
            }
            other => AppError::Repository(other),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub title: String,
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub exception: String,
    pub details: Vec<String>,
}

fn title_for(status: StatusCode) -> &'static str {
    match status {
        StatusCode::CONFLICT => "Conflict! Consult the documentation",
        StatusCode::INTERNAL_SERVER_ERROR => "Internal Server Error! Consult the documentation",
        _ => "Bad Request! Consult the documentation",
    }
}

impl AppError {
    /// HTTP status, failure class name and detail lines for this error
    fn parts(&self) -> (StatusCode, &'static str, Vec<String>) {
        match self {
            AppError::Domain(domain_err) => {
                // Unknown ids are reported as 400, not 404, so lookups
                // never reveal which records exist.
                let (status, exception) = match domain_err {
                    DomainError::Validation(_) => (StatusCode::BAD_REQUEST, "ValidationFailure"),
                    DomainError::BusinessRule(_) => {
                        (StatusCode::BAD_REQUEST, "BusinessRuleFailure")
                    }
                    DomainError::NotFound(_) => (StatusCode::BAD_REQUEST, "NotFoundFailure"),
                    DomainError::MalformedIdentifier(_) => {
                        (StatusCode::BAD_REQUEST, "MalformedIdentifierFailure")
                    }
                    DomainError::Conflict(_) => (StatusCode::CONFLICT, "ConflictFailure"),
                };
                (status, exception, domain_err.details())
            }

            // 500 Internal Server Error
            AppError::Repository(e) => {
                tracing::error!("Repository error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "InternalFailure",
                    vec!["Unexpected storage failure".to_string()],
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, exception, details) = self.parts();

        if status.is_client_error() {
            tracing::debug!(status = %status, exception, ?details, "Request rejected");
        }

        let body = ErrorResponse {
            title: title_for(status).to_string(),
            timestamp: Utc::now(),
            status: status.as_u16(),
            exception: exception.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}
