use anyhow::Result;

use crate::cli::ProfileCommands;
use crate::config::Config;
use crate::models::profile::{ProfileUpdate, slugify};

use super::open_session;

pub async fn dispatch(config: &Config, command: ProfileCommands) -> Result<()> {
    match command {
        ProfileCommands::Create { name } => cmd_create(config, &name).await,
        ProfileCommands::List => cmd_list(config).await,
        ProfileCommands::Switch { id } => cmd_switch(config, &id).await,
        ProfileCommands::Rename { id, name } => cmd_rename(config, &id, &name).await,
        ProfileCommands::Remove { id } => cmd_remove(config, &id).await,
    }
}

async fn cmd_create(config: &Config, name: &str) -> Result<()> {
    let mut session = open_session(config).await?;
    let profile = session.create_profile(name).await?;

    println!("Created profile '{}' (login: {})", profile.name, profile.login);
    if session.active().is_some_and(|p| p.id == profile.id) {
        println!("'{}' is now the active profile", profile.name);
    }
    Ok(())
}

async fn cmd_list(config: &Config) -> Result<()> {
    let session = open_session(config).await?;

    if session.needs_profile_creation() {
        println!("No profiles yet. Create one with 'screenlog profile create <name>'");
        return Ok(());
    }

    println!("Profiles:");
    println!("{:-<70}", "");
    for profile in session.profiles() {
        let active_marker = if session.active().is_some_and(|p| p.id == profile.id) {
            " [ACTIVE]"
        } else {
            ""
        };
        println!("• {} (login: {}){}", profile.name, profile.login, active_marker);
        println!("  id: {}", profile.id);
    }
    Ok(())
}

async fn cmd_switch(config: &Config, id: &str) -> Result<()> {
    let mut session = open_session(config).await?;
    session.switch_profile(id)?;

    let active = session.require_active()?;
    println!("Active profile: {}", active.name);
    Ok(())
}

async fn cmd_rename(config: &Config, id: &str, name: &str) -> Result<()> {
    let mut session = open_session(config).await?;
    let patch = ProfileUpdate {
        name: Some(name.to_string()),
        login: Some(slugify(name)),
        avatar: None,
    };
    session.update_profile(id, &patch).await?;

    println!("Renamed profile {id} to '{name}'");
    Ok(())
}

async fn cmd_remove(config: &Config, id: &str) -> Result<()> {
    let mut session = open_session(config).await?;

    if !session.delete_profile(id).await? {
        println!("No profile with id {id}");
        return Ok(());
    }

    println!("Deleted profile {id} and its watch data");
    match session.active() {
        Some(profile) => println!("Active profile is now '{}'", profile.name),
        None => println!("No profiles left. Create one with 'screenlog profile create <name>'"),
    }
    Ok(())
}
