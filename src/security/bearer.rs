//! Bearer credential extraction.
//!
//! # Responsibilities
//! - Locate the `Authorization` header on an inbound request
//! - Enforce the strict `Bearer {token}` shape
//! - Hand the raw token to the delegate, or fail with a typed error
//!
//! # Design Decisions
//! - Single scheme, single space separator, exactly two tokens; anything
//!   else is a 400 before any network traffic happens
//! - Only the first `Authorization` value is considered
//! - The token itself stays opaque here; it is never logged

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;

use crate::security::error::AuthError;

/// Expected credential scheme, compared case-insensitively.
const BEARER_SCHEME: &str = "Bearer";

/// Extract the bearer token from a request header map.
///
/// Returns a borrow into the header value; callers own nothing until
/// they decide to keep the credential for the delegate call.
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers.get(AUTHORIZATION).ok_or(AuthError::MissingCredential)?;

    // Header values are not guaranteed to be visible ASCII
    let value = value.to_str().map_err(|_| AuthError::MalformedHeader)?;

    let parts: Vec<&str> = value.trim().split(' ').collect();
    if parts.len() != 2 {
        tracing::warn!(
            parts = parts.len(),
            "Invalid Authorization header format: expected 2 parts"
        );
        return Err(AuthError::MalformedHeader);
    }

    if !parts[0].eq_ignore_ascii_case(BEARER_SCHEME) {
        tracing::warn!(scheme = %parts[0], "Unsupported Authorization scheme");
        return Err(AuthError::UnsupportedScheme);
    }

    Ok(parts[1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_extracts_token() {
        let headers = headers_with_auth("Bearer abc123");
        assert_eq!(extract_bearer(&headers).unwrap(), "abc123");
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        let headers = headers_with_auth("bearer abc123");
        assert_eq!(extract_bearer(&headers).unwrap(), "abc123");

        let headers = headers_with_auth("BEARER abc123");
        assert_eq!(extract_bearer(&headers).unwrap(), "abc123");
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        let headers = headers_with_auth("  Bearer abc123  ");
        assert_eq!(extract_bearer(&headers).unwrap(), "abc123");
    }

    #[test]
    fn test_missing_header() {
        let headers = HeaderMap::new();
        assert!(matches!(
            extract_bearer(&headers),
            Err(AuthError::MissingCredential)
        ));
    }

    #[test]
    fn test_missing_separator() {
        let headers = headers_with_auth("Bearerabc123");
        assert!(matches!(
            extract_bearer(&headers),
            Err(AuthError::MalformedHeader)
        ));
    }

    #[test]
    fn test_too_many_tokens() {
        let headers = headers_with_auth("Bearer a b");
        assert!(matches!(
            extract_bearer(&headers),
            Err(AuthError::MalformedHeader)
        ));
    }

    #[test]
    fn test_double_space_is_malformed() {
        // split on single spaces yields an empty middle token
        let headers = headers_with_auth("Bearer  abc123");
        assert!(matches!(
            extract_bearer(&headers),
            Err(AuthError::MalformedHeader)
        ));
    }

    #[test]
    fn test_scheme_only_is_malformed() {
        let headers = headers_with_auth("Bearer");
        assert!(matches!(
            extract_bearer(&headers),
            Err(AuthError::MalformedHeader)
        ));
    }

    #[test]
    fn test_unsupported_scheme() {
        let headers = headers_with_auth("Basic abc123");
        assert!(matches!(
            extract_bearer(&headers),
            Err(AuthError::UnsupportedScheme)
        ));
    }
}
