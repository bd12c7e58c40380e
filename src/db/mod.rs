use crate::constants;
use crate::models::media::{MediaType, Movie, Show};
use crate::models::profile::{Profile, ProfileUpdate};
use crate::models::watched::{WatchStatus, WatchedMovie, WatchedShow, WatchedShowUpdate};
use crate::models::watchlist::WatchlistItem;
use anyhow::Result;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, EntityTrait, TransactionTrait};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

pub mod codec;
pub mod error;
pub mod migrator;
pub mod repositories;

pub use error::StoreError;

/// Typed facade over the embedded store. Owns the connection, applies the
/// schema at construction and translates domain verbs into SQL.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    /// Construction failure is fatal to the caller: there is no recovery
    /// path for a store that cannot be opened.
    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Store opened & schema applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    fn profile_repo(&self) -> repositories::profile::ProfileRepository {
        repositories::profile::ProfileRepository::new(self.conn.clone())
    }

    fn settings_repo(&self) -> repositories::settings::SettingsRepository {
        repositories::settings::SettingsRepository::new(self.conn.clone())
    }

    fn cache_repo(&self) -> repositories::cache::CacheRepository {
        repositories::cache::CacheRepository::new(self.conn.clone())
    }

    fn watched_repo(&self) -> repositories::watched::WatchedRepository {
        repositories::watched::WatchedRepository::new(self.conn.clone())
    }

    fn watchlist_repo(&self) -> repositories::watchlist::WatchlistRepository {
        repositories::watchlist::WatchlistRepository::new(self.conn.clone())
    }

    // ========== Profiles ==========

    pub async fn set_profile(&self, profile: &Profile) -> Result<()> {
        self.profile_repo().set(profile).await
    }

    pub async fn get_all_profiles(&self) -> Result<Vec<Profile>> {
        self.profile_repo().get_all().await
    }

    pub async fn update_profile(&self, id: &str, patch: &ProfileUpdate) -> Result<()> {
        self.profile_repo().update(id, patch).await
    }

    pub async fn delete_profile(&self, id: &str) -> Result<bool> {
        self.profile_repo().delete(id).await
    }

    // ========== Settings ==========

    pub async fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.settings_repo().set(key, value).await
    }

    pub async fn get_setting(&self, key: &str) -> Result<Option<String>> {
        self.settings_repo().get(key).await
    }

    pub async fn set_api_key(&self, api_key: &str) -> Result<()> {
        self.settings_repo()
            .set(constants::settings::TMDB_API_KEY, api_key)
            .await
    }

    pub async fn get_api_key(&self) -> Result<Option<String>> {
        self.settings_repo()
            .get(constants::settings::TMDB_API_KEY)
            .await
    }

    // ========== Metadata cache ==========

    pub async fn cache_movie(&self, movie: &Movie) -> Result<()> {
        self.cache_repo().set_movie(movie).await
    }

    pub async fn cache_show(&self, show: &Show) -> Result<()> {
        self.cache_repo().set_show(show).await
    }

    pub async fn get_cached_movie(&self, id: i64) -> Result<Option<Movie>> {
        self.cache_repo().get_movie(id).await
    }

    pub async fn get_cached_show(&self, id: i64) -> Result<Option<Show>> {
        self.cache_repo().get_show(id).await
    }

    // ========== Watched ==========

    /// Cache first, then link. The pair is not atomic: a failure after the
    /// first half leaves an orphan cache row, which needs no complement.
    pub async fn add_watched_movie(
        &self,
        profile_id: &str,
        movie: &Movie,
        rating: i32,
        notes: Option<&str>,
    ) -> Result<()> {
        self.cache_repo().set_movie(movie).await?;
        self.watched_repo()
            .add_movie(profile_id, movie.id, rating, notes)
            .await
    }

    pub async fn add_watched_show(
        &self,
        profile_id: &str,
        show: &Show,
        rating: i32,
        status: WatchStatus,
        episodes_watched: &[i32],
        notes: Option<&str>,
    ) -> Result<()> {
        self.cache_repo().set_show(show).await?;
        self.watched_repo()
            .add_show(profile_id, show.id, rating, status, episodes_watched, notes)
            .await
    }

    pub async fn get_watched_movies(&self, profile_id: &str) -> Result<Vec<WatchedMovie>> {
        self.watched_repo().movies_for(profile_id).await
    }

    pub async fn get_watched_shows(&self, profile_id: &str) -> Result<Vec<WatchedShow>> {
        self.watched_repo().shows_for(profile_id).await
    }

    pub async fn update_watched_show(
        &self,
        profile_id: &str,
        show_id: i64,
        patch: &WatchedShowUpdate,
    ) -> Result<bool> {
        self.watched_repo()
            .update_show(profile_id, show_id, patch)
            .await
    }

    pub async fn update_movie_rating(
        &self,
        profile_id: &str,
        movie_id: i64,
        rating: i32,
    ) -> Result<bool> {
        self.watched_repo()
            .update_movie_rating(profile_id, movie_id, rating)
            .await
    }

    pub async fn remove_watched_movie(&self, profile_id: &str, movie_id: i64) -> Result<bool> {
        self.watched_repo().remove_movie(profile_id, movie_id).await
    }

    pub async fn remove_watched_show(&self, profile_id: &str, show_id: i64) -> Result<bool> {
        self.watched_repo().remove_show(profile_id, show_id).await
    }

    // ========== Watchlist ==========

    pub async fn add_to_watchlist_movie(
        &self,
        profile_id: &str,
        movie: &Movie,
        priority: i32,
        notes: Option<&str>,
    ) -> Result<()> {
        self.cache_repo().set_movie(movie).await?;
        self.watchlist_repo()
            .add(profile_id, MediaType::Movie, movie.id, priority, notes)
            .await
    }

    pub async fn add_to_watchlist_show(
        &self,
        profile_id: &str,
        show: &Show,
        priority: i32,
        notes: Option<&str>,
    ) -> Result<()> {
        self.cache_repo().set_show(show).await?;
        self.watchlist_repo()
            .add(profile_id, MediaType::Tv, show.id, priority, notes)
            .await
    }

    /// Watchlist entries newest-added first, each joined against whichever
    /// cache table its discriminator names. Exactly one of movie/show is
    /// populated per item.
    pub async fn get_watchlist(&self, profile_id: &str) -> Result<Vec<WatchlistItem>> {
        let rows = self.watchlist_repo().rows_for(profile_id).await?;

        let movie_ids: Vec<i64> = rows
            .iter()
            .filter(|r| r.item_type == MediaType::Movie.as_str())
            .map(|r| r.item_id)
            .collect();
        let show_ids: Vec<i64> = rows
            .iter()
            .filter(|r| r.item_type == MediaType::Tv.as_str())
            .map(|r| r.item_id)
            .collect();

        let cache = self.cache_repo();
        let movies = cache.movies_by_ids(&movie_ids).await?;
        let shows = cache.shows_by_ids(&show_ids).await?;

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            let Some(item_type) = MediaType::parse(&row.item_type) else {
                return Err(StoreError::Corrupted {
                    table: "watchlist",
                    column: "item_type",
                    detail: format!("unknown type {:?}", row.item_type),
                }
                .into());
            };

            let (movie, show) = match item_type {
                MediaType::Movie => (movies.get(&row.item_id).cloned(), None),
                MediaType::Tv => (None, shows.get(&row.item_id).cloned()),
            };
            if movie.is_none() && show.is_none() {
                warn!(
                    "watchlist {} {} for profile {} has no cache row, skipping",
                    row.item_type, row.item_id, row.profile_id
                );
                continue;
            }

            items.push(WatchlistItem {
                profile_id: row.profile_id,
                item_type,
                item_id: row.item_id,
                added_at: row.added_at,
                priority: row.priority,
                notes: row.notes,
                movie,
                show,
            });
        }

        Ok(items)
    }

    /// Moves a watchlist entry to the watched records: writes the watch row
    /// (unrated; shows land as completed) before dropping the list entry.
    /// Returns false when the entry is not on the list, even if the id
    /// happens to be in the metadata cache for another reason.
    pub async fn finish_watchlist_item(
        &self,
        profile_id: &str,
        item_type: MediaType,
        item_id: i64,
    ) -> Result<bool> {
        if self
            .watchlist_repo()
            .get(profile_id, item_type, item_id)
            .await?
            .is_none()
        {
            return Ok(false);
        }

        match item_type {
            MediaType::Movie => {
                let Some(movie) = self.cache_repo().get_movie(item_id).await? else {
                    warn!(
                        "watchlist movie {} for profile {} has no cache row, leaving the entry",
                        item_id, profile_id
                    );
                    return Ok(false);
                };
                self.watched_repo()
                    .add_movie(profile_id, movie.id, 0, None)
                    .await?;
            }
            MediaType::Tv => {
                let Some(show) = self.cache_repo().get_show(item_id).await? else {
                    warn!(
                        "watchlist show {} for profile {} has no cache row, leaving the entry",
                        item_id, profile_id
                    );
                    return Ok(false);
                };
                self.watched_repo()
                    .add_show(profile_id, show.id, 0, WatchStatus::Completed, &[], None)
                    .await?;
            }
        }

        self.watchlist_repo()
            .remove(profile_id, item_type, item_id)
            .await?;
        Ok(true)
    }

    pub async fn remove_from_watchlist(
        &self,
        profile_id: &str,
        item_type: MediaType,
        item_id: i64,
    ) -> Result<bool> {
        self.watchlist_repo()
            .remove(profile_id, item_type, item_id)
            .await
    }

    // ========== Bulk ==========

    /// Deletes a profile's watched and watchlist rows. The profile itself
    /// and the shared cache tables stay.
    pub async fn clear_user_data(&self, profile_id: &str) -> Result<()> {
        use crate::entities::{watched_movies, watched_shows, watchlist};
        use sea_orm::{ColumnTrait, QueryFilter};

        let txn = self.conn.begin().await?;

        watched_movies::Entity::delete_many()
            .filter(watched_movies::Column::ProfileId.eq(profile_id))
            .exec(&txn)
            .await?;
        watched_shows::Entity::delete_many()
            .filter(watched_shows::Column::ProfileId.eq(profile_id))
            .exec(&txn)
            .await?;
        watchlist::Entity::delete_many()
            .filter(watchlist::Column::ProfileId.eq(profile_id))
            .exec(&txn)
            .await?;

        txn.commit().await?;

        info!("Cleared watch data for profile {}", profile_id);
        Ok(())
    }

    /// Full reset: every row in every table.
    pub async fn clear(&self) -> Result<()> {
        use crate::entities::prelude::*;

        let txn = self.conn.begin().await?;

        WatchedMovies::delete_many().exec(&txn).await?;
        WatchedShows::delete_many().exec(&txn).await?;
        Watchlist::delete_many().exec(&txn).await?;
        CachedMovies::delete_many().exec(&txn).await?;
        CachedShows::delete_many().exec(&txn).await?;
        Settings::delete_many().exec(&txn).await?;
        Profiles::delete_many().exec(&txn).await?;

        txn.commit().await?;

        info!("Store wiped");
        Ok(())
    }
}
