//! Command-line front-end. Every command resolves the active profile
//! through the session module and talks to the store facade.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Config;

/// screenlog - a local movie & TV watch tracker
#[derive(Parser)]
#[command(name = "screenlog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a default config file
    #[command(alias = "--init")]
    Init,

    /// Manage profiles
    #[command(alias = "p")]
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },

    /// Search TMDB for movies or shows
    #[command(alias = "s")]
    Search {
        /// Search query
        #[arg(required = true)]
        query: Vec<String>,
        /// Search TV shows instead of movies
        #[arg(long)]
        tv: bool,
    },

    /// Manage the active profile's watchlist
    #[command(alias = "wl")]
    Watchlist {
        #[command(subcommand)]
        command: WatchlistCommands,
    },

    /// Manage the active profile's watched records
    #[command(alias = "w")]
    Watched {
        #[command(subcommand)]
        command: WatchedCommands,
    },

    /// Store or inspect the TMDB API key
    Apikey {
        #[command(subcommand)]
        command: ApikeyCommands,
    },

    /// Aggregate statistics for the active profile
    Stats,

    /// Delete the active profile's watch data, or everything with --all
    Clear {
        /// Wipe every table, including profiles and the metadata cache
        #[arg(long)]
        all: bool,
    },
}

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Create a profile; the first one becomes active
    Create {
        name: String,
    },
    /// List profiles
    #[command(alias = "ls")]
    List,
    /// Switch the active profile (by id or login)
    Switch {
        id: String,
    },
    /// Rename a profile
    Rename {
        id: String,
        name: String,
    },
    /// Delete a profile and its watch data
    #[command(alias = "rm")]
    Remove {
        id: String,
    },
}

#[derive(Subcommand)]
pub enum WatchlistCommands {
    /// Add a movie (or show with --tv) by TMDB id
    Add {
        id: i64,
        #[arg(long)]
        tv: bool,
        #[arg(long, default_value = "0")]
        priority: i32,
        #[arg(long)]
        notes: Option<String>,
    },
    /// List watchlist entries, newest first
    #[command(alias = "ls")]
    List,
    /// Remove an entry
    #[command(alias = "rm")]
    Remove {
        id: i64,
        #[arg(long)]
        tv: bool,
    },
    /// Mark an entry watched: records it and drops it from the list
    Done {
        id: i64,
        #[arg(long)]
        tv: bool,
    },
}

#[derive(Subcommand)]
pub enum WatchedCommands {
    /// Record a movie (or show with --tv) as watched, by TMDB id
    Add {
        id: i64,
        #[arg(long)]
        tv: bool,
        /// 1-10; omit to leave unrated
        #[arg(long, default_value = "0")]
        rating: i32,
        #[arg(long)]
        notes: Option<String>,
    },
    /// List watched records, newest first
    #[command(alias = "ls")]
    List {
        #[arg(long)]
        tv: bool,
    },
    /// Rate a watched movie
    Rate {
        id: i64,
        rating: i32,
    },
    /// Update a watched show's status or episode progress
    Update {
        id: i64,
        /// watching | completed | dropped
        #[arg(long)]
        status: Option<String>,
        /// Comma-separated episode numbers, e.g. "1,2,3"
        #[arg(long)]
        episodes: Option<String>,
        #[arg(long)]
        rating: Option<i32>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Remove a watched record
    #[command(alias = "rm")]
    Remove {
        id: i64,
        #[arg(long)]
        tv: bool,
    },
}

#[derive(Subcommand)]
pub enum ApikeyCommands {
    /// Store the TMDB API key in the settings table
    Set { key: String },
    /// Print whether a key is configured
    Show,
}

pub async fn execute(cli: Cli, config: &Config) -> Result<()> {
    match cli.command {
        Commands::Init => {
            if Config::create_default_if_missing()? {
                println!("Config file created. Edit config.toml and run again.");
            } else {
                println!("config.toml already exists");
            }
            Ok(())
        }
        Commands::Profile { command } => commands::profile::dispatch(config, command).await,
        Commands::Search { query, tv } => {
            commands::search::cmd_search(config, &query.join(" "), tv).await
        }
        Commands::Watchlist { command } => commands::watchlist::dispatch(config, command).await,
        Commands::Watched { command } => commands::watched::dispatch(config, command).await,
        Commands::Apikey { command } => commands::settings::dispatch(config, command).await,
        Commands::Stats => commands::stats::cmd_stats(config).await,
        Commands::Clear { all } => commands::settings::cmd_clear(config, all).await,
    }
}
