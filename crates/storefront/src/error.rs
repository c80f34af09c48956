//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side errors to
//! Sentry before responding. Every error response carries a machine-readable
//! `kind` so clients can tell retryable transport failures apart from input
//! they need to correct.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Session store operation failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Input failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// No authenticated identity.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated but lacking the required capability.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Classification exposed to clients so they can decide retry vs. user
/// correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The request was malformed; retrying unchanged will not help.
    Validation,
    /// Missing identity or capability.
    Unauthorized,
    /// The referenced resource does not exist.
    NotFound,
    /// A uniqueness constraint was violated.
    Conflict,
    /// A transient I/O failure; retrying may succeed.
    TransientIo,
    /// Unclassified server-side failure.
    Internal,
}

/// JSON body for error responses.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    kind: ErrorKind,
}

impl AppError {
    /// Classify this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Repository(err) => match err {
                RepositoryError::NotFound => ErrorKind::NotFound,
                RepositoryError::Conflict(_) => ErrorKind::Conflict,
                RepositoryError::Database(_) => ErrorKind::TransientIo,
                RepositoryError::DataCorruption(_) => ErrorKind::Internal,
            },
            Self::Auth(err) => match err {
                AuthError::InvalidEmail(_) | AuthError::WeakPassword(_) => ErrorKind::Validation,
                AuthError::InvalidCredentials => ErrorKind::Unauthorized,
                AuthError::UserAlreadyExists => ErrorKind::Conflict,
                AuthError::Repository(repo) => match repo {
                    RepositoryError::NotFound => ErrorKind::NotFound,
                    RepositoryError::Conflict(_) => ErrorKind::Conflict,
                    RepositoryError::Database(_) => ErrorKind::TransientIo,
                    RepositoryError::DataCorruption(_) => ErrorKind::Internal,
                },
                AuthError::PasswordHash => ErrorKind::Internal,
            },
            Self::Session(_) => ErrorKind::TransientIo,
            Self::Validation(_) => ErrorKind::Validation,
            Self::Unauthorized(_) | Self::Forbidden(_) => ErrorKind::Unauthorized,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    const fn status(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::Unauthorized => match self {
                Self::Forbidden(_) => StatusCode::FORBIDDEN,
                _ => StatusCode::UNAUTHORIZED,
            },
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::TransientIo => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. Server-side failures are not detailed.
    fn message(&self) -> String {
        match self.kind() {
            ErrorKind::TransientIo => "Temporary service error, please retry".to_string(),
            ErrorKind::Internal => "Internal server error".to_string(),
            ErrorKind::Unauthorized => match self {
                Self::Auth(AuthError::InvalidCredentials) => "Invalid credentials".to_string(),
                other => other.to_string(),
            },
            ErrorKind::Conflict => match self {
                Self::Auth(AuthError::UserAlreadyExists) => {
                    "An account with this email already exists".to_string()
                }
                other => other.to_string(),
            },
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server-side errors to Sentry
        if matches!(self.kind(), ErrorKind::TransientIo | ErrorKind::Internal) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = self.status();
        let body = ErrorBody {
            error: self.message(),
            kind: self.kind(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context from a user ID.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_kind_classification() {
        assert_eq!(
            AppError::Validation("bad".to_string()).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            AppError::Repository(RepositoryError::Database(sqlx::Error::PoolTimedOut)).kind(),
            ErrorKind::TransientIo
        );
        assert_eq!(
            AppError::Repository(RepositoryError::NotFound).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            AppError::Auth(AuthError::InvalidCredentials).kind(),
            ErrorKind::Unauthorized
        );
        assert_eq!(
            AppError::Auth(AuthError::UserAlreadyExists).kind(),
            ErrorKind::Conflict
        );
        assert_eq!(
            AppError::Forbidden("admin capability required".to_string()).kind(),
            ErrorKind::Unauthorized
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            status_of(AppError::Validation("q".to_string())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(AppError::Unauthorized("login required".to_string())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AppError::Forbidden("admins only".to_string())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(AppError::NotFound("product".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Auth(AuthError::UserAlreadyExists)),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(AppError::Repository(RepositoryError::Database(
                sqlx::Error::PoolTimedOut
            ))),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_of(AppError::Internal("boom".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_details_not_leaked() {
        let err = AppError::Internal("connection string was postgres://...".to_string());
        assert_eq!(err.message(), "Internal server error");
    }
}
