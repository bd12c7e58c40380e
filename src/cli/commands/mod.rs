pub mod profile;
pub mod search;
pub mod settings;
pub mod stats;
pub mod watched;
pub mod watchlist;

use anyhow::Result;

use crate::clients::tmdb::TmdbClient;
use crate::config::Config;
use crate::db::Store;
use crate::session::Session;

/// Opens the store and resolves the session for a command invocation.
pub async fn open_session(config: &Config) -> Result<Session> {
    let store = Store::new(&config.general.database_path).await?;
    Session::open(store, &config.data_dir()).await
}

/// TMDB client with the credential from the settings table, falling back
/// to the config file.
pub async fn tmdb_client(config: &Config, store: &Store) -> Result<TmdbClient> {
    let api_key = match store.get_api_key().await? {
        Some(key) => key,
        None => config.tmdb.api_key.clone().ok_or_else(|| {
            anyhow::anyhow!("no TMDB API key; run 'screenlog apikey set <key>'")
        })?,
    };

    Ok(TmdbClient::new(&config.tmdb.base_url, &api_key))
}
