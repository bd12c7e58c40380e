use anyhow::Result;

use crate::config::Config;
use crate::models::watched::WatchStatus;

use super::open_session;

/// Counts and averages from facade reads. No streak tracking.
pub async fn cmd_stats(config: &Config) -> Result<()> {
    let session = open_session(config).await?;
    let profile = session.require_active()?;
    let store = session.store();

    let movies = store.get_watched_movies(&profile.id).await?;
    let shows = store.get_watched_shows(&profile.id).await?;
    let watchlist = store.get_watchlist(&profile.id).await?;

    println!("Stats for {}:", profile.name);
    println!("{:-<70}", "");
    println!("Watched movies:  {}", movies.len());
    println!("Tracked shows:   {}", shows.len());
    println!("Watchlist items: {}", watchlist.len());

    let rated: Vec<i32> = movies
        .iter()
        .map(|m| m.rating)
        .chain(shows.iter().map(|s| s.rating))
        .filter(|&r| r > 0)
        .collect();
    if !rated.is_empty() {
        #[allow(clippy::cast_precision_loss)]
        let mean = f64::from(rated.iter().sum::<i32>()) / rated.len() as f64;
        println!("Mean rating:     {mean:.1}/10 ({} rated)", rated.len());
    }

    let episodes: usize = shows.iter().map(|s| s.episodes_watched.len()).sum();
    if !shows.is_empty() {
        let watching = shows
            .iter()
            .filter(|s| s.status == WatchStatus::Watching)
            .count();
        let completed = shows
            .iter()
            .filter(|s| s.status == WatchStatus::Completed)
            .count();
        let dropped = shows
            .iter()
            .filter(|s| s.status == WatchStatus::Dropped)
            .count();
        println!("Episodes logged: {episodes}");
        println!("Show status:     {watching} watching / {completed} completed / {dropped} dropped");
    }

    Ok(())
}
