//! # tether-store
//!
//! HTTP client for the external tabular store (a hosted Bitable-style API).
//!
//! The store owns two tables Tether cares about: a requests table this client
//! writes to, and a results table the external automation writes to on its
//! own schedule. This crate only speaks the wire protocol — "create a record
//! with given fields", "query records matching a filter, newest first" — and
//! knows nothing about correlation or field-name drift (see
//! `tether-correlate` for that).
//!
//! Authentication is a short-lived bearer token obtained per logical
//! operation via a token-exchange call; it is never cached or persisted.

mod auth;
mod error;
mod http;
mod records;
mod trigger;

pub use error::StoreError;
pub use records::{CreatedRecord, TableRecord};
pub use trigger::PipelineTrigger;

use tether_config::StoreConfig;

/// HTTP client for one configured store application.
///
/// Cheap to clone; the underlying `reqwest::Client` is shared.
#[derive(Debug, Clone)]
pub struct StoreClient {
    http: reqwest::Client,
    base_url: String,
    app_id: String,
    app_secret: String,
    app_token: String,
}

impl StoreClient {
    /// Create a client from the store section of the configuration.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            http: reqwest::Client::builder()
                .user_agent("tether/0.1")
                .timeout(std::time::Duration::from_secs(15))
                .build()
                .expect("reqwest client should build"),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            app_id: config.app_id.clone(),
            app_secret: config.app_secret.clone(),
            app_token: config.app_token.clone(),
        }
    }

    /// Base URL for a table's records endpoint.
    fn records_url(&self, table_id: &str) -> String {
        format!(
            "{}/open-apis/bitable/v1/apps/{}/tables/{}/records",
            self.base_url, self.app_token, table_id
        )
    }

    /// Build a server-side exact-match filter expression for one column.
    ///
    /// Double quotes inside the value are escaped so a value can never break
    /// out of the expression.
    #[must_use]
    pub fn filter_eq(column: &str, value: &str) -> String {
        format!(
            "CurrentValue.[{column}]=\"{}\"",
            value.replace('"', "\\\"")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> StoreClient {
        StoreClient::new(&StoreConfig {
            base_url: "https://open.feishu.cn/".into(),
            app_id: "cli_a1b2".into(),
            app_secret: "s3cret".into(),
            app_token: "bascnXYZ".into(),
            requests_table_id: "tblreq".into(),
            results_table_id: "tblres".into(),
        })
    }

    #[test]
    fn records_url_joins_without_double_slash() {
        let url = client().records_url("tblres");
        assert_eq!(
            url,
            "https://open.feishu.cn/open-apis/bitable/v1/apps/bascnXYZ/tables/tblres/records"
        );
    }

    #[test]
    fn filter_eq_builds_expression() {
        assert_eq!(
            StoreClient::filter_eq("型号", "G7-Pro"),
            "CurrentValue.[型号]=\"G7-Pro\""
        );
    }

    #[test]
    fn filter_eq_escapes_quotes() {
        assert_eq!(
            StoreClient::filter_eq("型号", "G7\"Pro"),
            "CurrentValue.[型号]=\"G7\\\"Pro\""
        );
    }
}
