pub mod browse;
pub mod catalog;
pub mod config;
pub mod details;
pub mod watchlist;

use color_eyre::eyre::Context;
use color_eyre::Result;
use marquee_config::{Config, PathManager};
use marquee_core::AppStore;
use marquee_tmdb::TmdbClient;

/// Load and validate the config, then build the remote client.
pub(crate) fn load_client() -> Result<TmdbClient> {
    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();
    tracing::debug!("Loading config from {:?}", config_file);
    let config = Config::load_or_default(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))
        .wrap_err("Failed to load configuration")?;
    config
        .validate()
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
    Ok(TmdbClient::new(&config.tmdb))
}

/// Rehydrate the application store from disk.
pub(crate) fn open_store() -> Result<AppStore> {
    let path_manager = PathManager::default();
    path_manager
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))
        .wrap_err("Failed to create application directories")?;
    Ok(AppStore::open(&path_manager))
}
