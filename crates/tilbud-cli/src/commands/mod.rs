//! Subcommands of the `tilbud` CLI.

pub mod batch;
pub mod config;
pub mod markets;
pub mod offers;
pub mod output;
pub mod process;

use std::path::{Path, PathBuf};

use tracing::debug;

use tilbud_core::models::config::TilbudConfig;
use tilbud_core::store::JsonOfferStore;

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tilbud")
        .join("config.json")
}

/// Load configuration from an explicit path, else from the default location,
/// else fall back to defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<TilbudConfig> {
    let config = if let Some(path) = config_path {
        TilbudConfig::from_file(Path::new(path))?
    } else {
        let default_path = default_config_path();
        if default_path.exists() {
            debug!("Loading configuration from {}", default_path.display());
            TilbudConfig::from_file(&default_path)?
        } else {
            TilbudConfig::default()
        }
    };

    config.validate()?;
    Ok(config)
}

/// Open the offer store, preferring an explicit path over the configured one.
pub fn open_store(store: Option<&Path>, config: &TilbudConfig) -> anyhow::Result<JsonOfferStore> {
    let path = store.unwrap_or(config.store.path.as_path());
    Ok(JsonOfferStore::open(path)?)
}
