//! Optional post-write trigger for the downstream automation.
//!
//! The submitter's contract ends at the record write; the store's own change
//! detection is the default way the external processor notices new requests.
//! Deployments that still rely on an explicit webhook configure one here, and
//! the CLI fires it after a successful submit. Submission success never
//! depends on the trigger.

use crate::{error::StoreError, http::check_response};

/// Fires the downstream automation's webhook with a record id.
#[derive(Debug, Clone)]
pub struct PipelineTrigger {
    http: reqwest::Client,
    webhook_url: String,
}

impl PipelineTrigger {
    /// Create a trigger for the given webhook address.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::builder()
                .user_agent("tether/0.1")
                .timeout(std::time::Duration::from_secs(15))
                .build()
                .expect("reqwest client should build"),
            webhook_url: webhook_url.into(),
        }
    }

    /// POST the record id to the webhook.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Http`] on transport failure or
    /// [`StoreError::Api`] when the webhook answers with a non-success
    /// status.
    pub async fn fire(&self, record_id: &str) -> Result<(), StoreError> {
        let resp = self
            .http
            .post(&self.webhook_url)
            .json(&serde_json::json!({ "record_id": record_id }))
            .send()
            .await?;
        check_response(resp).await?;
        tracing::debug!(record_id, "pipeline trigger fired");
        Ok(())
    }
}
