//! Correlation error types.
//!
//! The taxonomy separates fail-fast input problems, fatal credential
//! problems, and write/read failures. Absence of a matching result row is not
//! represented here at all — it is the `Processing` variant of
//! [`tether_core::StatusCheck`], not an error.

use tether_store::StoreError;
use thiserror::Error;

/// Errors from submitting a request.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Bad input; fails fast and never reaches the network.
    #[error("validation error: {0}")]
    Validation(String),

    /// Credential exchange failed. Fatal, not retried automatically.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The write to the requests table failed or was rejected. Surfaced
    /// verbatim and never auto-retried — a retry risks a duplicate visible
    /// request with unclear state.
    #[error("submission failed: {0}")]
    Submission(String),
}

impl From<StoreError> for SubmitError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Auth(message) => Self::Auth(message),
            other => Self::Submission(other.to_string()),
        }
    }
}

/// Errors from a status check.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Credential exchange failed. Fatal for the session, not retried here.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The read against the results table genuinely failed (store
    /// unreachable, malformed filter). During polling this is absorbed and
    /// the next scheduled tick retries naturally.
    #[error("query failed: {0}")]
    Query(String),
}

impl From<StoreError> for ResolveError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Auth(message) => Self::Auth(message),
            other => Self::Query(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_auth_maps_to_auth() {
        let err = SubmitError::from(StoreError::Auth("bad app_secret".into()));
        assert!(matches!(err, SubmitError::Auth(_)));

        let err = ResolveError::from(StoreError::Auth("bad app_secret".into()));
        assert!(matches!(err, ResolveError::Auth(_)));
    }

    #[test]
    fn store_envelope_preserves_raw_diagnostic() {
        let err = SubmitError::from(StoreError::Envelope {
            code: 1254045,
            message: "FieldNameNotFound".into(),
        });
        match err {
            SubmitError::Submission(message) => assert!(message.contains("FieldNameNotFound")),
            other => panic!("expected Submission, got {other:?}"),
        }
    }
}
