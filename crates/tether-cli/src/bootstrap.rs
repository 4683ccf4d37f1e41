use tether_config::TetherConfig;
use tether_correlate::StoreBinding;
use tether_store::StoreClient;

/// Load configuration (`.env` + TOML files + environment).
pub fn load_config() -> anyhow::Result<TetherConfig> {
    TetherConfig::load_with_dotenv().map_err(anyhow::Error::from)
}

/// Build the store binding both table accessors go through.
///
/// Fails early with a setup hint when credentials are missing, before any
/// command touches the network.
pub fn store_binding(config: &TetherConfig) -> anyhow::Result<StoreBinding> {
    if !config.store.is_configured() {
        anyhow::bail!(
            "store credentials are not configured. Set TETHER_STORE__APP_ID, \
             TETHER_STORE__APP_SECRET, TETHER_STORE__APP_TOKEN, \
             TETHER_STORE__REQUESTS_TABLE_ID and TETHER_STORE__RESULTS_TABLE_ID \
             (or the matching [store] keys in .tether/config.toml)"
        );
    }

    let client = StoreClient::new(&config.store);
    Ok(StoreBinding::new(
        client,
        config.store.requests_table_id.clone(),
        config.store.results_table_id.clone(),
    ))
}
