//! Shared HTTP response helpers for the store client.
//!
//! Centralizes the status-code check (non-success → [`StoreError::Api`]) so
//! the auth and records modules stay focused on request construction and
//! response mapping.

use crate::error::StoreError;

/// Check an HTTP response for a non-success status.
///
/// Returns the response unchanged on success; otherwise maps to
/// [`StoreError::Api`] with the status code and response body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    if !resp.status().is_success() {
        return Err(StoreError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_response(status: u16, body: &'static str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body)
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn check_response_success() {
        let resp = mock_response(200, "{}");
        assert!(check_response(resp).await.is_ok());
    }

    #[tokio::test]
    async fn check_response_api_error_carries_body() {
        let resp = mock_response(500, "upstream exploded");
        let err = check_response(resp).await.unwrap_err();
        match err {
            StoreError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "upstream exploded");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn check_response_unauthorized_is_api_error() {
        let resp = mock_response(401, "bad token");
        let err = check_response(resp).await.unwrap_err();
        assert!(matches!(err, StoreError::Api { status: 401, .. }));
    }
}
