//! # tether-config
//!
//! Layered configuration loading for Tether using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`TETHER_*` prefix, `__` as separator)
//! 2. Project-level `.tether/config.toml`
//! 3. User-level `~/.config/tether/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `TETHER_STORE__APP_ID` -> `store.app_id`,
//! `TETHER_POLLING__INTERVAL_SECS` -> `polling.interval_secs`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use tether_config::TetherConfig;
//!
//! // Load from all sources (dotenvy + TOML + env):
//! let config = TetherConfig::load_with_dotenv().expect("config");
//!
//! if config.store.is_configured() {
//!     println!("store app: {}", config.store.app_token);
//! }
//! ```

mod error;
mod general;
mod polling;
mod store;
mod trigger;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use polling::PollingConfig;
pub use store::StoreConfig;
pub use trigger::TriggerConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TetherConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub trigger: TriggerConfig,
    #[serde(default)]
    pub polling: PollingConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl TetherConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// Precedence (highest to lowest):
    /// 1. Environment variables (`TETHER_*` prefix)
    /// 2. `.tether/config.toml` (project-local)
    /// 3. `~/.config/tether/config.toml` (user-global)
    /// 4. Default values
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if extraction fails (e.g. a value has
    /// the wrong type).
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Calls `dotenvy` to load the `.env` file from the working directory (or
    /// the crate's workspace during tests) before building the figment. This
    /// is the typical entry point for the CLI.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if extraction fails.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".tether/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment = figment.merge(Env::prefixed("TETHER_").split("__"));

        figment
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tether").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if available) or current dir
    /// looking for a `.env` file. Silently does nothing if no `.env` is found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // Walk up at most 2 levels (crate -> crates/ -> workspace root)
            for _ in 0..2 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        // Fallback: try current directory
        let _ = dotenvy::dotenv();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = TetherConfig::default();
        assert!(!config.store.is_configured());
        assert!(!config.trigger.is_enabled());
        assert_eq!(config.polling.interval_secs, 3);
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: TetherConfig = TetherConfig::figment().extract()?;
            assert!(!config.store.is_configured());
            assert_eq!(config.polling.scan_page_size, 50);
            Ok(())
        });
    }

    #[test]
    fn env_vars_override_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("TETHER_STORE__APP_ID", "cli_a1b2");
            jail.set_env("TETHER_POLLING__INTERVAL_SECS", "7");
            let config: TetherConfig = TetherConfig::figment().extract()?;
            assert_eq!(config.store.app_id, "cli_a1b2");
            assert_eq!(config.polling.interval_secs, 7);
            Ok(())
        });
    }

    #[test]
    fn toml_file_layers_under_env() {
        figment::Jail::expect_with(|jail| {
            jail.create_dir(".tether")?;
            jail.create_file(
                ".tether/config.toml",
                r#"
                [store]
                app_id = "cli_from_file"
                app_secret = "s3cret"
                "#,
            )?;
            jail.set_env("TETHER_STORE__APP_ID", "cli_from_env");
            let config: TetherConfig = TetherConfig::figment().extract()?;
            assert_eq!(config.store.app_id, "cli_from_env");
            assert_eq!(config.store.app_secret, "s3cret");
            Ok(())
        });
    }
}
