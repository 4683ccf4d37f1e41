//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default path of the local completion history.
fn default_history_path() -> String {
    ".tether/history.jsonl".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Where completed analyses are appended locally.
    #[serde(default = "default_history_path")]
    pub history_path: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            history_path: default_history_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert_eq!(config.history_path, ".tether/history.jsonl");
    }
}
