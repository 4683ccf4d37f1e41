//! Store error types.

use thiserror::Error;

/// Errors that can occur when talking to the external store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The token exchange failed. Fatal for the whole operation; never
    /// retried automatically. Carries the store's raw diagnostic body.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The store returned a non-success HTTP status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the store.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The store's response envelope carried a non-zero application code.
    /// The raw `msg` is preserved verbatim — schema/field-name mismatches
    /// surface here and must not be masked.
    #[error("store rejected the call (code {code}): {message}")]
    Envelope {
        /// Application-level error code from the envelope.
        code: i64,
        /// Raw diagnostic message from the store.
        message: String,
    },

    /// Failed to parse a store response.
    #[error("parse error: {0}")]
    Parse(String),
}
