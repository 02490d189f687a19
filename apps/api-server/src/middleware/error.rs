//! Error handling - every failure leaves as a status code plus `{message}` body.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use rbac_core::RepoError;
use rbac_core::ports::AuthError;
use rbac_shared::ErrorResponse;
use std::fmt;

/// Application-level error type that converts to JSON error responses.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Unauthorized(String),
    Forbidden,
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden => write!(f, "Forbidden"),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(message) => ErrorResponse::not_found(message),
            AppError::BadRequest(message) => ErrorResponse::bad_request(message),
            AppError::Unauthorized(message) => ErrorResponse::unauthorized(message),
            AppError::Forbidden => ErrorResponse::forbidden(),
            AppError::Internal(detail) => {
                // Log internal errors
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => AppError::BadRequest("Invalid credentials".to_string()),
            AuthError::TokenExpired => AppError::Unauthorized("Token expired".to_string()),
            AuthError::InvalidToken(reason) => {
                tracing::debug!(%reason, "Rejected token");
                AppError::Unauthorized("Unauthorized".to_string())
            }
            AuthError::MissingAuth => AppError::Unauthorized("Unauthorized".to_string()),
            AuthError::InsufficientPermissions => AppError::Forbidden,
            AuthError::Configuration(msg)
            | AuthError::Hashing(msg)
            | AuthError::Backend(msg) => AppError::Internal(msg),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_status_codes() {
        let cases = [
            (AuthError::MissingAuth, StatusCode::UNAUTHORIZED),
            (AuthError::InvalidToken("bad".into()), StatusCode::UNAUTHORIZED),
            (AuthError::TokenExpired, StatusCode::UNAUTHORIZED),
            (AuthError::InsufficientPermissions, StatusCode::FORBIDDEN),
            (AuthError::InvalidCredentials, StatusCode::BAD_REQUEST),
            (
                AuthError::Configuration("no secret".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AuthError::Backend("down".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            let unauthenticated = err.is_unauthenticated();
            let status = AppError::from(err).status_code();
            assert_eq!(status, expected);
            assert_eq!(unauthenticated, status == StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn test_repo_errors_hide_driver_text() {
        let err = AppError::from(RepoError::Query("relation \"users\" does not exist".into()));

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(matches!(err, AppError::Internal(ref m) if m == "Database error"));
    }

    #[test]
    fn test_connection_errors_are_internal() {
        let err = AppError::from(RepoError::Connection("pool timed out".into()));

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(matches!(err, AppError::Internal(ref m) if m == "Database error"));
    }
}
