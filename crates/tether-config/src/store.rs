//! External tabular store configuration.
//!
//! The store holds two tables: one for submitted requests and one for the
//! results the external automation writes independently. Credentials are the
//! two static application credentials used for the per-operation token
//! exchange; they come from env/TOML and are never persisted elsewhere.

use serde::{Deserialize, Serialize};

/// Default API base URL for the hosted store.
fn default_base_url() -> String {
    "https://open.feishu.cn".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// API base URL. Overridable for testing against a local mock.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Application identifier used in the token exchange.
    #[serde(default)]
    pub app_id: String,

    /// Application secret used in the token exchange.
    #[serde(default)]
    pub app_secret: String,

    /// Identifier of the multi-table app (base) holding both tables.
    #[serde(default)]
    pub app_token: String,

    /// Table holding submitted requests.
    #[serde(default)]
    pub requests_table_id: String,

    /// Table the external automation writes results into.
    #[serde(default)]
    pub results_table_id: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            app_id: String::new(),
            app_secret: String::new(),
            app_token: String::new(),
            requests_table_id: String::new(),
            results_table_id: String::new(),
        }
    }
}

impl StoreConfig {
    /// Check the store config has every field needed for live operation.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.app_id.is_empty()
            && !self.app_secret.is_empty()
            && !self.app_token.is_empty()
            && !self.requests_table_id.is_empty()
            && !self.results_table_id.is_empty()
    }
}
