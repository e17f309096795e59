//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::{AppError, ErrorKind};
use platform::cookie::CookieError;
use thiserror::Error;

/// Shown when the backend gives no reason for a failed login
pub const DEFAULT_LOGIN_FAILURE: &str = "Login failed. Please try again.";

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Backend rejected the identifier/secret pair
    #[error("Invalid credentials: {}", .0.as_deref().unwrap_or("rejected by backend"))]
    InvalidCredentials(Option<String>),

    /// Auth backend unreachable or failing
    #[error("Auth backend unavailable: {0}")]
    Transport(String),

    /// Another login is still pending for this session
    #[error("A login attempt is already in progress")]
    LoginInProgress,

    /// Credential store could not be written
    #[error("Credential storage error: {0}")]
    Storage(#[from] CookieError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Only transport failures are worth another sign-in attempt
    pub fn is_retryable(&self) -> bool {
        matches!(self, AuthError::Transport(_))
    }

    /// Message suitable for showing next to the login form
    pub fn user_message(&self) -> String {
        match self {
            AuthError::InvalidCredentials(Some(message)) if !message.is_empty() => {
                message.clone()
            }
            AuthError::LoginInProgress => self.to_string(),
            _ => DEFAULT_LOGIN_FAILURE.to_string(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials(_) => ErrorKind::Unauthorized,
            AuthError::Transport(_) => ErrorKind::ServiceUnavailable,
            AuthError::LoginInProgress => ErrorKind::Conflict,
            AuthError::Storage(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError; storage failures keep their cause for the logs
    pub fn into_app_error(self) -> AppError {
        let message = self.user_message();
        match self {
            AuthError::Storage(source) => AppError::internal(message).with_source(source),
            AuthError::LoginInProgress => {
                AppError::new(ErrorKind::Conflict, message).with_action("Wait for the pending login")
            }
            other => AppError::new(other.kind(), message),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Storage(e) => {
                tracing::error!(error = %e, "Credential storage error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials(_) => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::Transport(msg) => {
                tracing::warn!(message = %msg, "Auth backend unavailable");
            }
            AuthError::LoginInProgress => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}
