//! Profile/session state: the store's primary caller. Tracks the set of
//! known profiles and which one is active, remembering the choice in a
//! plain-text pointer file outside the relational store.

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{info, warn};

use crate::constants;
use crate::db::Store;
use crate::models::profile::{Profile, ProfileUpdate};

pub struct Session {
    store: Store,
    pointer_path: PathBuf,
    profiles: Vec<Profile>,
    active: Option<Profile>,
}

impl Session {
    /// Loads all profiles and resolves the active one. Zero profiles means
    /// the app is unusable until one is created.
    pub async fn open(store: Store, data_dir: &Path) -> Result<Self> {
        let pointer_path = data_dir.join(constants::session::ACTIVE_PROFILE_FILE);
        let profiles = store.get_all_profiles().await?;

        let remembered = read_pointer(&pointer_path);
        let active = resolve_active(&profiles, remembered.as_deref());

        let session = Self {
            store,
            pointer_path,
            profiles,
            active,
        };
        session.remember_active();
        Ok(session)
    }

    #[must_use]
    pub fn needs_profile_creation(&self) -> bool {
        self.profiles.is_empty()
    }

    #[must_use]
    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    #[must_use]
    pub const fn active(&self) -> Option<&Profile> {
        self.active.as_ref()
    }

    #[must_use]
    pub const fn store(&self) -> &Store {
        &self.store
    }

    /// Active profile or an error telling the user to create one.
    pub fn require_active(&self) -> Result<&Profile> {
        self.active
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("no profile yet; run 'screenlog profile create <name>'"))
    }

    /// Creates and persists a profile. The first profile becomes active.
    pub async fn create_profile(&mut self, name: &str) -> Result<Profile> {
        let profile = Profile::new(name);
        self.store.set_profile(&profile).await?;

        self.profiles.push(profile.clone());
        self.profiles.sort_by(|a, b| a.name.cmp(&b.name));

        if self.active.is_none() {
            self.active = Some(profile.clone());
            self.remember_active();
        }

        info!("Created profile {} ({})", profile.name, profile.id);
        Ok(profile)
    }

    pub fn switch_profile(&mut self, id: &str) -> Result<()> {
        let profile = self
            .profiles
            .iter()
            .find(|p| p.id == id || p.login == id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("unknown profile: {id}"))?;

        self.active = Some(profile);
        self.remember_active();
        Ok(())
    }

    pub async fn update_profile(&mut self, id: &str, patch: &ProfileUpdate) -> Result<()> {
        self.store.update_profile(id, patch).await?;
        self.reload().await
    }

    /// Deletes a profile and its watch data. If it was the active one the
    /// first remaining profile (alphabetically) takes over; deleting the
    /// last profile flips the session back to needs-creation.
    pub async fn delete_profile(&mut self, id: &str) -> Result<bool> {
        let removed = self.store.delete_profile(id).await?;
        if removed {
            self.reload().await?;
        }
        Ok(removed)
    }

    async fn reload(&mut self) -> Result<()> {
        self.profiles = self.store.get_all_profiles().await?;
        let current = self.active.as_ref().map(|p| p.id.clone());
        self.active = resolve_active(&self.profiles, current.as_deref());
        self.remember_active();
        Ok(())
    }

    fn remember_active(&self) {
        let result = match &self.active {
            Some(profile) => std::fs::write(&self.pointer_path, &profile.id),
            None => match std::fs::remove_file(&self.pointer_path) {
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                other => other,
            },
        };
        if let Err(e) = result {
            warn!(
                "Could not update active-profile pointer {}: {}",
                self.pointer_path.display(),
                e
            );
        }
    }
}

fn read_pointer(path: &Path) -> Option<String> {
    let id = std::fs::read_to_string(path).ok()?;
    let id = id.trim().to_string();
    (!id.is_empty()).then_some(id)
}

/// Remembered id wins if it still exists; otherwise the first profile
/// alphabetically (profiles arrive sorted by name from the store).
fn resolve_active(profiles: &[Profile], remembered: Option<&str>) -> Option<Profile> {
    remembered
        .and_then(|id| profiles.iter().find(|p| p.id == id))
        .or_else(|| profiles.first())
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(id: &str, name: &str) -> Profile {
        Profile {
            id: id.to_string(),
            name: name.to_string(),
            login: name.to_lowercase(),
            avatar: None,
            created_at: String::new(),
        }
    }

    #[test]
    fn remembered_profile_wins_when_present() {
        let profiles = vec![profile("a", "Alex"), profile("b", "Brook")];
        let active = resolve_active(&profiles, Some("b")).unwrap();
        assert_eq!(active.id, "b");
    }

    #[test]
    fn stale_pointer_falls_back_to_first() {
        let profiles = vec![profile("a", "Alex"), profile("b", "Brook")];
        let active = resolve_active(&profiles, Some("gone")).unwrap();
        assert_eq!(active.id, "a");
    }

    #[test]
    fn no_profiles_means_no_active() {
        assert!(resolve_active(&[], Some("a")).is_none());
        assert!(resolve_active(&[], None).is_none());
    }
}
