//! Authorization failure taxonomy.
//!
//! # Responsibilities
//! - Enumerate every way a request can fail the gate
//! - Map each failure to exactly one HTTP status
//! - Render failures as plain-text rejection responses
//!
//! # Design Decisions
//! - Local failures (header parsing) are separate variants from failures
//!   that required a call to the auth service
//! - Service-unreachable and service-rejected collapse into the same 401
//!   so callers cannot probe infrastructure state; logs keep them distinct
//! - Messages are static and human-readable; upstream error bodies are
//!   never forwarded to the caller

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors produced by the authorization gate.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No `Authorization` header on a secured route.
    #[error("Authorization header is required")]
    MissingCredential,

    /// `Authorization` header present but not two space-separated tokens.
    #[error("Authorization header format must be: 'Bearer {{token}}'")]
    MalformedHeader,

    /// Credential scheme is not `Bearer`.
    #[error("Authorization type must be 'Bearer'")]
    UnsupportedScheme,

    /// Auth service answered but did not vouch for the credential.
    #[error("Invalid or expired token")]
    InvalidCredential,

    /// Auth service unreachable, timed out, or returned an unusable reply.
    #[error("Token validation failed")]
    DelegateFailure,
}

impl AuthError {
    /// HTTP status this failure maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::MissingCredential => StatusCode::UNAUTHORIZED,
            AuthError::MalformedHeader => StatusCode::BAD_REQUEST,
            AuthError::UnsupportedScheme => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredential => StatusCode::UNAUTHORIZED,
            AuthError::DelegateFailure => StatusCode::UNAUTHORIZED,
        }
    }

    /// Stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::MissingCredential => "missing_credential",
            AuthError::MalformedHeader => "malformed_header",
            AuthError::UnsupportedScheme => "unsupported_scheme",
            AuthError::InvalidCredential => "invalid_credential",
            AuthError::DelegateFailure => "delegate_failure",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AuthError::MissingCredential.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::MalformedHeader.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::UnsupportedScheme.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::InvalidCredential.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::DelegateFailure.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_error_display() {
        let err = AuthError::MalformedHeader;
        assert_eq!(
            err.to_string(),
            "Authorization header format must be: 'Bearer {token}'"
        );

        let err = AuthError::MissingCredential;
        assert!(err.to_string().contains("required"));
    }
}
