//! Query Error Types
//!
//! Failures of cached resource fetches. Errors are `Clone` because one
//! in-flight fetch fans its outcome out to every caller attached to it.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::{AppError, ErrorKind};
use thiserror::Error;

/// Query-specific result type alias
pub type QueryResult<T> = Result<T, QueryError>;

/// Query-specific error variants
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// No credential stored when a protected resource was requested
    #[error("No session token stored")]
    MissingToken,

    /// Upstream rejected the bearer token
    #[error("Session rejected by upstream: {0}")]
    Unauthorized(String),

    /// Network failure or no response
    #[error("Transport failure: {0}")]
    Transport(String),

    /// Upstream answered with a non-success status
    #[error("Upstream error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Upstream body did not match the expected shape
    #[error("Response decode error: {0}")]
    Decode(String),

    /// Same key read back as a different type than it was stored with
    #[error("Cached value for {0} has a different type")]
    TypeMismatch(String),
}

impl QueryError {
    /// Transport failures and upstream 5xx are transient; everything else is final
    pub fn is_retryable(&self) -> bool {
        match self {
            QueryError::Transport(_) => true,
            QueryError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            QueryError::MissingToken | QueryError::Unauthorized(_) => ErrorKind::Unauthorized,
            QueryError::Transport(_) => ErrorKind::ServiceUnavailable,
            QueryError::Api { status, .. } => match status {
                403 => ErrorKind::Forbidden,
                404 => ErrorKind::NotFound,
                429 => ErrorKind::TooManyRequests,
                400..=499 => ErrorKind::BadRequest,
                _ => ErrorKind::BadGateway,
            },
            QueryError::Decode(_) => ErrorKind::BadGateway,
            QueryError::TypeMismatch(_) => ErrorKind::InternalServerError,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        let err = AppError::new(self.kind(), self.to_string());
        match self {
            QueryError::MissingToken | QueryError::Unauthorized(_) => {
                err.with_action("Please sign in again")
            }
            _ => err,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            QueryError::TypeMismatch(key) => {
                tracing::error!(key = %key, "Query cache type mismatch");
            }
            QueryError::Transport(msg) => {
                tracing::warn!(message = %msg, "Upstream unreachable");
            }
            QueryError::Api { status, message } if *status >= 500 => {
                tracing::warn!(status, message = %message, "Upstream server error");
            }
            _ => {
                tracing::debug!(error = %self, "Query error");
            }
        }
    }
}

impl From<QueryError> for AppError {
    fn from(err: QueryError) -> Self {
        err.to_app_error()
    }
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
