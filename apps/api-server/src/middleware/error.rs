//! Error handling - maps layer errors onto RFC 7807 responses.

use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use inkpost_core::error::{BlogError, ExtractError, RepoError};
use inkpost_shared::ErrorResponse;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Unauthorized,
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {msg}"),
            AppError::BadRequest(msg) => write!(f, "Bad request: {msg}"),
            AppError::Unauthorized => write!(f, "Unauthorized"),
            AppError::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Unauthorized => ErrorResponse::unauthorized(),
            AppError::Internal(detail) => {
                // Never leak internals to the client.
                tracing::error!("internal error: {detail}");
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found".to_string()),
            RepoError::Constraint(msg) => AppError::BadRequest(msg),
            RepoError::Connection(msg) => {
                tracing::error!("database connection error: {msg}");
                AppError::Internal("Database error".to_string())
            }
            RepoError::Query(msg) => {
                tracing::error!("database query error: {msg}");
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

impl From<BlogError> for AppError {
    fn from(err: BlogError) -> Self {
        match err {
            BlogError::NotFound => AppError::NotFound("Blog post not found".to_string()),
            BlogError::ContentUnavailable(cause) => {
                tracing::warn!(error = %cause, "post content unavailable");
                AppError::NotFound("Post content not available".to_string())
            }
            BlogError::Ingestion(cause) => match cause {
                ExtractError::InvalidArchive => {
                    AppError::BadRequest("Invalid ZIP file".to_string())
                }
                ExtractError::MissingRequiredFile(name) => {
                    AppError::BadRequest(format!("ZIP file must contain {name}"))
                }
                ExtractError::UnsafeEntry(entry) => {
                    AppError::BadRequest(format!("ZIP entry has an unsafe path: {entry}"))
                }
                other @ (ExtractError::DestinationNotEmpty(_) | ExtractError::Io(_)) => {
                    AppError::Internal(other.to_string())
                }
            },
            BlogError::Repo(repo) => repo.into(),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
