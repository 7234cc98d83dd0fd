//! Authentication errors and their HTTP mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Failure raised by a credential store implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Connection, pool, or transaction failure.
    #[error("credential store unavailable: {0}")]
    Unavailable(String),

    /// A row exists but cannot be turned into an account.
    #[error("corrupt account record: {0}")]
    Corrupt(String),
}

#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed request; rejected before any store access.
    #[error("{0}")]
    Validation(String),

    /// Unknown username or wrong password. Deliberately indistinguishable.
    #[error("Invalid user name or password")]
    InvalidCredentials,

    /// Correct credentials on an account whose permission flag is off.
    #[error("You don't have permission")]
    PermissionDenied,

    #[error("Missing token")]
    MissingToken,

    #[error("Token expired")]
    TokenExpired,

    /// Bad signature, malformed, unknown role, or revoked by a newer login.
    #[error("Invalid token")]
    TokenInvalid,

    /// Authenticated, but the role may not use this resource.
    #[error("{0}")]
    Forbidden(String),

    #[error("Database connection failed")]
    StoreUnavailable(#[source] StoreError),

    #[error("An unexpected error occurred")]
    Internal(String),
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials
            | AuthError::MissingToken
            | AuthError::TokenExpired => StatusCode::UNAUTHORIZED,
            AuthError::PermissionDenied | AuthError::TokenInvalid | AuthError::Forbidden(_) => {
                StatusCode::FORBIDDEN
            }
            AuthError::StoreUnavailable(_) | AuthError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        AuthError::StoreUnavailable(err)
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            AuthError::StoreUnavailable(source) => {
                tracing::error!(error = %source, "Credential store failure");
            }
            AuthError::Internal(detail) => {
                tracing::error!(error = %detail, "Authentication internal error");
            }
            _ => {}
        }

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AuthError::Validation("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::InvalidCredentials.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AuthError::PermissionDenied.status(), StatusCode::FORBIDDEN);
        assert_eq!(AuthError::MissingToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::TokenExpired.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::TokenInvalid.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            AuthError::StoreUnavailable(StoreError::Unavailable("down".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages_match_wire_contract() {
        assert_eq!(AuthError::MissingToken.to_string(), "Missing token");
        assert_eq!(AuthError::TokenExpired.to_string(), "Token expired");
        assert_eq!(AuthError::TokenInvalid.to_string(), "Invalid token");
    }

    #[test]
    fn test_store_error_is_not_leaked() {
        let err: AuthError = StoreError::Unavailable("password=hunter2 host=db".into()).into();
        assert_eq!(err.to_string(), "Database connection failed");
    }
}
