use anyhow::Result;

use crate::cli::WatchlistCommands;
use crate::config::Config;
use crate::models::media::MediaType;

use super::{open_session, tmdb_client};

pub async fn dispatch(config: &Config, command: WatchlistCommands) -> Result<()> {
    match command {
        WatchlistCommands::Add {
            id,
            tv,
            priority,
            notes,
        } => cmd_add(config, id, tv, priority, notes.as_deref()).await,
        WatchlistCommands::List => cmd_list(config).await,
        WatchlistCommands::Remove { id, tv } => cmd_remove(config, id, tv).await,
        WatchlistCommands::Done { id, tv } => cmd_done(config, id, tv).await,
    }
}

async fn cmd_add(
    config: &Config,
    id: i64,
    tv: bool,
    priority: i32,
    notes: Option<&str>,
) -> Result<()> {
    let session = open_session(config).await?;
    let profile = session.require_active()?;
    let store = session.store();
    let client = tmdb_client(config, store).await?;

    if tv {
        let show = client
            .show(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("no TMDB show with id {id}"))?;
        store
            .add_to_watchlist_show(&profile.id, &show, priority, notes)
            .await?;
        println!("Added '{}' to {}'s watchlist", show.name, profile.name);
    } else {
        let movie = client
            .movie(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("no TMDB movie with id {id}"))?;
        store
            .add_to_watchlist_movie(&profile.id, &movie, priority, notes)
            .await?;
        println!("Added '{}' to {}'s watchlist", movie.title, profile.name);
    }
    Ok(())
}

async fn cmd_list(config: &Config) -> Result<()> {
    let session = open_session(config).await?;
    let profile = session.require_active()?;
    let items = session.store().get_watchlist(&profile.id).await?;

    if items.is_empty() {
        println!("{}'s watchlist is empty", profile.name);
        return Ok(());
    }

    println!("{}'s watchlist:", profile.name);
    println!("{:-<70}", "");
    for item in items {
        println!(
            "{:>8}  [{}] {} (added {})",
            item.item_id,
            item.item_type,
            item.title(),
            item.added_at
        );
        if let Some(notes) = &item.notes {
            println!("          {notes}");
        }
    }
    Ok(())
}

async fn cmd_remove(config: &Config, id: i64, tv: bool) -> Result<()> {
    let session = open_session(config).await?;
    let profile = session.require_active()?;
    let item_type = if tv { MediaType::Tv } else { MediaType::Movie };

    if session
        .store()
        .remove_from_watchlist(&profile.id, item_type, id)
        .await?
    {
        println!("Removed {item_type} {id} from the watchlist");
    } else {
        println!("No {item_type} {id} on the watchlist");
    }
    Ok(())
}

async fn cmd_done(config: &Config, id: i64, tv: bool) -> Result<()> {
    let session = open_session(config).await?;
    let profile = session.require_active()?;
    let item_type = if tv { MediaType::Tv } else { MediaType::Movie };

    if session
        .store()
        .finish_watchlist_item(&profile.id, item_type, id)
        .await?
    {
        println!("Marked {item_type} {id} watched");
    } else {
        println!("No {item_type} {id} on {}'s watchlist", profile.name);
    }
    Ok(())
}
