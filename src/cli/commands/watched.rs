use anyhow::Result;

use crate::cli::WatchedCommands;
use crate::config::Config;
use crate::models::watched::{WatchStatus, WatchedShowUpdate};

use super::{open_session, tmdb_client};

pub async fn dispatch(config: &Config, command: WatchedCommands) -> Result<()> {
    match command {
        WatchedCommands::Add {
            id,
            tv,
            rating,
            notes,
        } => cmd_add(config, id, tv, rating, notes.as_deref()).await,
        WatchedCommands::List { tv } => cmd_list(config, tv).await,
        WatchedCommands::Rate { id, rating } => cmd_rate(config, id, rating).await,
        WatchedCommands::Update {
            id,
            status,
            episodes,
            rating,
            notes,
        } => cmd_update(config, id, status, episodes, rating, notes).await,
        WatchedCommands::Remove { id, tv } => cmd_remove(config, id, tv).await,
    }
}

fn validate_rating(rating: i32) -> Result<()> {
    if !(0..=10).contains(&rating) {
        anyhow::bail!("rating must be between 1 and 10 (0 = unrated)");
    }
    Ok(())
}

async fn cmd_add(
    config: &Config,
    id: i64,
    tv: bool,
    rating: i32,
    notes: Option<&str>,
) -> Result<()> {
    validate_rating(rating)?;

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
            .add_watched_show(&profile.id, &show, rating, WatchStatus::Watching, &[], notes)
            .await?;
        println!("Recorded '{}' for {}", show.name, profile.name);
    } else {
        let movie = client
            .movie(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("no TMDB movie with id {id}"))?;
        store
            .add_watched_movie(&profile.id, &movie, rating, notes)
            .await?;
        println!("Recorded '{}' for {}", movie.title, profile.name);
    }
    Ok(())
}

fn format_rating(rating: i32) -> String {
    if rating == 0 {
        "unrated".to_string()
    } else {
        format!("{rating}/10")
    }
}

async fn cmd_list(config: &Config, tv: bool) -> Result<()> {
    let session = open_session(config).await?;
    let profile = session.require_active()?;

    if tv {
        let shows = session.store().get_watched_shows(&profile.id).await?;
        if shows.is_empty() {
            println!("{} has no watched shows", profile.name);
            return Ok(());
        }
        println!("{}'s shows:", profile.name);
        println!("{:-<70}", "");
        for watched in shows {
            println!(
                "{:>8}  {} [{}] {} - {} episodes",
                watched.show.id,
                watched.show.name,
                watched.status,
                format_rating(watched.rating),
                watched.episodes_watched.len()
            );
        }
    } else {
        let movies = session.store().get_watched_movies(&profile.id).await?;
        if movies.is_empty() {
            println!("{} has no watched movies", profile.name);
            return Ok(());
        }
        println!("{}'s movies:", profile.name);
        println!("{:-<70}", "");
        for watched in movies {
            println!(
                "{:>8}  {} - {} (watched {})",
                watched.movie.id,
                watched.movie.title,
                format_rating(watched.rating),
                watched.watched_at
            );
        }
    }
    Ok(())
}

async fn cmd_rate(config: &Config, id: i64, rating: i32) -> Result<()> {
    validate_rating(rating)?;

    let session = open_session(config).await?;
    let profile = session.require_active()?;

    if session
        .store()
        .update_movie_rating(&profile.id, id, rating)
        .await?
    {
        println!("Rated movie {id}: {}", format_rating(rating));
    } else {
        println!("Movie {id} is not in {}'s watched list", profile.name);
    }
    Ok(())
}

fn parse_episodes(list: &str) -> Result<Vec<i32>> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i32>()
                .map_err(|_| anyhow::anyhow!("invalid episode number: {s:?}"))
        })
        .collect()
}

async fn cmd_update(
    config: &Config,
    id: i64,
    status: Option<String>,
    episodes: Option<String>,
    rating: Option<i32>,
    notes: Option<String>,
) -> Result<()> {
    if let Some(rating) = rating {
        validate_rating(rating)?;
    }

    let status = status
        .as_deref()
        .map(|s| {
            WatchStatus::parse(s)
                .ok_or_else(|| anyhow::anyhow!("status must be watching, completed or dropped"))
        })
        .transpose()?;
    let episodes_watched = episodes.as_deref().map(parse_episodes).transpose()?;

    let patch = WatchedShowUpdate {
        rating,
        status,
        episodes_watched,
        notes,
    };
    if patch.is_empty() {
        anyhow::bail!("nothing to update; pass --status, --episodes, --rating or --notes");
    }

    let session = open_session(config).await?;
    let profile = session.require_active()?;

    if session
        .store()
        .update_watched_show(&profile.id, id, &patch)
        .await?
    {
        println!("Updated show {id}");
    } else {
        println!("Show {id} is not in {}'s watched list", profile.name);
    }
    Ok(())
}

async fn cmd_remove(config: &Config, id: i64, tv: bool) -> Result<()> {
    let session = open_session(config).await?;
    let profile = session.require_active()?;
    let store = session.store();

    let removed = if tv {
        store.remove_watched_show(&profile.id, id).await?
    } else {
        store.remove_watched_movie(&profile.id, id).await?
    };

    if removed {
        println!("Removed watched record {id}");
    } else {
        println!("No watched record {id}");
    }
    Ok(())
}
