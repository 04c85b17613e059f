//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::PasswordHashError;
use platform::token::TokenError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Request body failed shape validation
    #[error("{0}")]
    Validation(String),

    /// Unknown email or wrong password. The two cases are never told apart.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing, malformed, forged or expired bearer token
    #[error("Not authenticated")]
    NotAuthenticated,

    /// A user with this email already exists
    #[error("Email is already registered")]
    EmailTaken,

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] PasswordHashError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::InvalidCredentials | AuthError::NotAuthenticated => ErrorKind::Unauthorized,
            AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::PasswordHash(_)
            | AuthError::Token(_)
            | AuthError::Database(_)
            | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn into_app_error(self) -> AppError {
        let kind = self.kind();
        AppError::new(kind, self.to_string()).with_source(self)
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::PasswordHash(e) => {
                tracing::error!(error = %e, "Password hashing error");
            }
            AuthError::Token(e) => {
                tracing::error!(error = %e, "Token signing error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            _ => {
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

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => AuthError::Validation(err.message().to_string()),
            _ => AuthError::Internal(err.to_string()),
        }
    }
}

impl From<tokio::task::JoinError> for AuthError {
    fn from(err: tokio::task::JoinError) -> Self {
        AuthError::Internal(format!("Blocking task failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(AuthError::Validation("x".into()).kind(), ErrorKind::BadRequest);
        assert_eq!(AuthError::InvalidCredentials.kind(), ErrorKind::Unauthorized);
        assert_eq!(AuthError::NotAuthenticated.kind(), ErrorKind::Unauthorized);
        assert_eq!(AuthError::EmailTaken.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn test_database_error_is_opaque_500() {
        let err = AuthError::Database(sqlx::Error::PoolTimedOut).into_app_error();
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.public_message(), "Internal Server Error");
    }

    #[test]
    fn test_invalid_credentials_message() {
        let err = AuthError::InvalidCredentials.into_app_error();
        assert_eq!(err.public_message(), "Invalid credentials");
    }

    #[test]
    fn test_bad_request_app_error_becomes_validation() {
        let err = AuthError::from(AppError::bad_request("Invalid email format"));
        assert!(matches!(err, AuthError::Validation(ref m) if m == "Invalid email format"));
    }
}
