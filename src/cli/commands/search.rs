use anyhow::Result;

use crate::config::Config;

use super::{open_session, tmdb_client};

pub async fn cmd_search(config: &Config, query: &str, tv: bool) -> Result<()> {
    let session = open_session(config).await?;
    let client = tmdb_client(config, session.store()).await?;

    if tv {
        let shows = client.search_shows(query).await?;
        if shows.is_empty() {
            println!("No shows found for '{query}'");
            return Ok(());
        }
        println!("TV shows matching '{query}':");
        println!("{:-<70}", "");
        for show in shows {
            let year = show
                .first_air_date
                .as_deref()
                .and_then(|d| d.get(..4))
                .unwrap_or("????");
            println!(
                "{:>8}  {} ({}) - {:.1}",
                show.id,
                show.name,
                year,
                show.vote_average.unwrap_or(0.0)
            );
        }
    } else {
        let movies = client.search_movies(query).await?;
        if movies.is_empty() {
            println!("No movies found for '{query}'");
            return Ok(());
        }
        println!("Movies matching '{query}':");
        println!("{:-<70}", "");
        for movie in movies {
            let year = movie
                .release_date
                .as_deref()
                .and_then(|d| d.get(..4))
                .unwrap_or("????");
            println!(
                "{:>8}  {} ({}) - {:.1}",
                movie.id,
                movie.title,
                year,
                movie.vote_average.unwrap_or(0.0)
            );
        }
    }

    println!();
    println!("Add with 'screenlog watchlist add <id>' or 'screenlog watched add <id>'");
    Ok(())
}
