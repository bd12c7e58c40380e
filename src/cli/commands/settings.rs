use anyhow::Result;

use crate::cli::ApikeyCommands;
use crate::config::Config;

use super::open_session;

pub async fn dispatch(config: &Config, command: ApikeyCommands) -> Result<()> {
    match command {
        ApikeyCommands::Set { key } => cmd_set(config, &key).await,
        ApikeyCommands::Show => cmd_show(config).await,
    }
}

async fn cmd_set(config: &Config, key: &str) -> Result<()> {
    let session = open_session(config).await?;
    session.store().set_api_key(key).await?;
    println!("TMDB API key saved");
    Ok(())
}

async fn cmd_show(config: &Config) -> Result<()> {
    let session = open_session(config).await?;
    match session.store().get_api_key().await? {
        Some(key) => {
            let tail = key.get(key.len().saturating_sub(4)..).unwrap_or("");
            println!("TMDB API key configured (...{tail})");
        }
        None => println!("No TMDB API key set; run 'screenlog apikey set <key>'"),
    }
    Ok(())
}

pub async fn cmd_clear(config: &Config, all: bool) -> Result<()> {
    let session = open_session(config).await?;

    if all {
        session.store().clear().await?;
        println!("Wiped every table, including profiles and the metadata cache");
        return Ok(());
    }

    let profile = session.require_active()?;
    session.store().clear_user_data(&profile.id).await?;
    println!("Cleared {}'s watched and watchlist data", profile.name);
    Ok(())
}
