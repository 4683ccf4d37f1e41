//! Downstream automation trigger configuration.
//!
//! The store's own change detection is the default trigger for the external
//! processor; an explicit webhook is optional and fired by the CLI after a
//! successful submit, never by the submitter itself.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TriggerConfig {
    /// Webhook address of the downstream automation. Empty = disabled.
    #[serde(default)]
    pub webhook_url: String,
}

impl TriggerConfig {
    /// Whether an explicit post-write trigger is configured.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.webhook_url.is_empty()
    }
}
