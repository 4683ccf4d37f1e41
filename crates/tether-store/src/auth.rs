//! Tenant token exchange.
//!
//! The store issues short-lived bearer tokens against the two static
//! application credentials. A token is fetched fresh per logical operation —
//! no caching is assumed and none is required for correctness — and is never
//! persisted.

use serde::Deserialize;

use crate::{StoreClient, error::StoreError, http::check_response};

#[derive(Debug, Deserialize)]
struct TokenResponse {
    code: i64,
    #[serde(default)]
    msg: String,
    #[serde(default)]
    tenant_access_token: Option<String>,
}

impl StoreClient {
    /// Exchange the application credentials for a short-lived bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Auth`] with the store's raw diagnostic when the
    /// exchange is rejected, [`StoreError::Http`] on transport failure.
    pub(crate) async fn tenant_token(&self) -> Result<String, StoreError> {
        let url = format!(
            "{}/open-apis/auth/v3/tenant_access_token/internal",
            self.base_url
        );
        let resp = check_response(
            self.http
                .post(&url)
                .json(&serde_json::json!({
                    "app_id": self.app_id,
                    "app_secret": self.app_secret,
                }))
                .send()
                .await?,
        )
        .await?;

        let body = resp.text().await?;
        let token: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| StoreError::Parse(format!("token response: {e}")))?;

        match token.tenant_access_token {
            Some(value) if token.code == 0 => Ok(value),
            _ => {
                tracing::debug!(code = token.code, msg = %token.msg, "token exchange rejected");
                Err(StoreError::Auth(body))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_successful_token_response() {
        let body = r#"{"code":0,"msg":"ok","tenant_access_token":"t-abc123","expire":7199}"#;
        let token: TokenResponse = serde_json::from_str(body).unwrap();
        assert_eq!(token.code, 0);
        assert_eq!(token.tenant_access_token.as_deref(), Some("t-abc123"));
    }

    #[test]
    fn parse_rejected_token_response() {
        let body = r#"{"code":10003,"msg":"invalid app_id"}"#;
        let token: TokenResponse = serde_json::from_str(body).unwrap();
        assert_eq!(token.code, 10003);
        assert!(token.tenant_access_token.is_none());
        assert_eq!(token.msg, "invalid app_id");
    }

    #[tokio::test]
    #[ignore = "requires live store credentials (TETHER_STORE__* in the environment)"]
    async fn live_token_exchange() {
        let config = tether_config::TetherConfig::load_with_dotenv()
            .expect("config should load")
            .store;
        assert!(config.is_configured(), "live test needs full store config");

        let client = StoreClient::new(&config);
        let token = client.tenant_token().await.expect("token exchange");
        assert!(!token.is_empty());
    }
}
