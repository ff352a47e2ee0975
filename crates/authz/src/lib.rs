//! Bearer-credential verification for protected endpoints.
//!
//! The gate compares the inbound `Authorization` header against a single
//! configured secret. Missing or malformed headers are distinguished from a
//! present-but-wrong credential so the HTTP layer can answer 401 vs 403.

use thiserror::Error;

const BEARER_PREFIX: &str = "Bearer ";

/// Reasons a bearer credential is rejected.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthzError {
    #[error("missing Authorization header")]
    Missing,

    #[error("malformed Authorization header; expected 'Bearer <token>'")]
    Malformed,

    #[error("invalid bearer credential")]
    Mismatched,
}

/// Verify an `Authorization` header value against the configured secret.
///
/// `header` is the raw header value, `None` when the header was absent.
pub fn verify_bearer(header: Option<&str>, secret: &str) -> Result<(), AuthzError> {
    let header = header.ok_or(AuthzError::Missing)?;

    let token = header
        .strip_prefix(BEARER_PREFIX)
        .ok_or(AuthzError::Malformed)?;

    if token != secret {
        tracing::warn!("rejected request with mismatched bearer credential");
        return Err(AuthzError::Mismatched);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_matching_token() {
        assert_eq!(verify_bearer(Some("Bearer s3cret"), "s3cret"), Ok(()));
    }

    #[test]
    fn rejects_missing_header() {
        assert_eq!(verify_bearer(None, "s3cret"), Err(AuthzError::Missing));
    }

    #[test]
    fn rejects_malformed_header() {
        assert_eq!(
            verify_bearer(Some("Basic dXNlcg=="), "s3cret"),
            Err(AuthzError::Malformed)
        );
        assert_eq!(
            verify_bearer(Some("s3cret"), "s3cret"),
            Err(AuthzError::Malformed)
        );
    }

    #[test]
    fn rejects_mismatched_token() {
        assert_eq!(
            verify_bearer(Some("Bearer wrong"), "s3cret"),
            Err(AuthzError::Mismatched)
        );
    }

    #[test]
    fn bearer_scheme_is_case_sensitive() {
        // Exact-prefix match only; no scheme normalization.
        assert_eq!(
            verify_bearer(Some("bearer s3cret"), "s3cret"),
            Err(AuthzError::Malformed)
        );
    }
}
