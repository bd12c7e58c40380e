use crate::db::codec;
use crate::db::error::StoreError;
use crate::entities::{prelude::*, watched_movies, watched_shows};
use crate::models::watched::{WatchStatus, WatchedMovie, WatchedShow, WatchedShowUpdate};
use anyhow::Result;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::warn;

use super::cache::CacheRepository;

pub struct WatchedRepository {
    conn: DatabaseConnection,
}

impl WatchedRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Upserts the watch row. The caller must have cached the movie first;
    /// re-adding replaces rating, timestamp and notes.
    pub async fn add_movie(
        &self,
        profile_id: &str,
        movie_id: i64,
        rating: i32,
        notes: Option<&str>,
    ) -> Result<()> {
        let active_model = watched_movies::ActiveModel {
            profile_id: Set(profile_id.to_string()),
            movie_id: Set(movie_id),
            rating: Set(rating),
            watched_at: Set(chrono::Utc::now().to_rfc3339()),
            notes: Set(notes.map(ToString::to_string)),
        };

        WatchedMovies::insert(active_model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::columns([
                    watched_movies::Column::ProfileId,
                    watched_movies::Column::MovieId,
                ])
                .update_columns([
                    watched_movies::Column::Rating,
                    watched_movies::Column::WatchedAt,
                    watched_movies::Column::Notes,
                ])
                .to_owned(),
            )
            .exec(&self.conn)
            .await?;

        Ok(())
    }

    pub async fn add_show(
        &self,
        profile_id: &str,
        show_id: i64,
        rating: i32,
        status: WatchStatus,
        episodes_watched: &[i32],
        notes: Option<&str>,
    ) -> Result<()> {
        let active_model = watched_shows::ActiveModel {
            profile_id: Set(profile_id.to_string()),
            show_id: Set(show_id),
            rating: Set(rating),
            status: Set(status.as_str().to_string()),
            episodes_watched: Set(Some(codec::encode_list(episodes_watched)?)),
            notes: Set(notes.map(ToString::to_string)),
            updated_at: Set(chrono::Utc::now().to_rfc3339()),
        };

        WatchedShows::insert(active_model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::columns([
                    watched_shows::Column::ProfileId,
                    watched_shows::Column::ShowId,
                ])
                .update_columns([
                    watched_shows::Column::Rating,
                    watched_shows::Column::Status,
                    watched_shows::Column::EpisodesWatched,
                    watched_shows::Column::Notes,
                    watched_shows::Column::UpdatedAt,
                ])
                .to_owned(),
            )
            .exec(&self.conn)
            .await?;

        Ok(())
    }

    /// Watched movies joined with cached metadata, newest first. Rows whose
    /// cache entry is missing are dropped (inner-join semantics); the facade
    /// always writes the cache row before the watch row, so this only
    /// happens after a manual cache wipe.
    pub async fn movies_for(&self, profile_id: &str) -> Result<Vec<WatchedMovie>> {
        let rows = WatchedMovies::find()
            .filter(watched_movies::Column::ProfileId.eq(profile_id))
            .order_by_desc(watched_movies::Column::WatchedAt)
            .find_also_related(CachedMovies)
            .all(&self.conn)
            .await?;

        let mut watched = Vec::with_capacity(rows.len());
        for (row, cached) in rows {
            let Some(cached) = cached else {
                warn!(
                    "watched movie {} for profile {} has no cache row, skipping",
                    row.movie_id, row.profile_id
                );
                continue;
            };
            watched.push(WatchedMovie {
                profile_id: row.profile_id,
                movie: CacheRepository::map_movie(cached)?,
                rating: row.rating,
                watched_at: row.watched_at,
                notes: row.notes,
            });
        }

        Ok(watched)
    }

    pub async fn shows_for(&self, profile_id: &str) -> Result<Vec<WatchedShow>> {
        let rows = WatchedShows::find()
            .filter(watched_shows::Column::ProfileId.eq(profile_id))
            .order_by_desc(watched_shows::Column::UpdatedAt)
            .find_also_related(CachedShows)
            .all(&self.conn)
            .await?;

        let mut watched = Vec::with_capacity(rows.len());
        for (row, cached) in rows {
            let Some(cached) = cached else {
                warn!(
                    "watched show {} for profile {} has no cache row, skipping",
                    row.show_id, row.profile_id
                );
                continue;
            };
            let status =
                WatchStatus::parse(&row.status).ok_or_else(|| StoreError::Corrupted {
                    table: "watched_shows",
                    column: "status",
                    detail: format!("unknown status {:?}", row.status),
                })?;
            watched.push(WatchedShow {
                profile_id: row.profile_id,
                show: CacheRepository::map_show(cached)?,
                rating: row.rating,
                status,
                episodes_watched: codec::decode_list(
                    "watched_shows",
                    "episodes_watched",
                    row.episodes_watched.as_deref(),
                )?,
                notes: row.notes,
                updated_at: row.updated_at,
            });
        }

        Ok(watched)
    }

    /// Patches the given fields of a watched-show row and bumps `updated_at`.
    /// Returns false when no such row exists.
    pub async fn update_show(
        &self,
        profile_id: &str,
        show_id: i64,
        patch: &WatchedShowUpdate,
    ) -> Result<bool> {
        if patch.is_empty() {
            return Err(StoreError::EmptyUpdate.into());
        }

        let mut update = WatchedShows::update_many()
            .filter(watched_shows::Column::ProfileId.eq(profile_id))
            .filter(watched_shows::Column::ShowId.eq(show_id));

        if let Some(rating) = patch.rating {
            update = update.col_expr(
                watched_shows::Column::Rating,
                sea_orm::sea_query::Expr::value(rating),
            );
        }
        if let Some(status) = patch.status {
            update = update.col_expr(
                watched_shows::Column::Status,
                sea_orm::sea_query::Expr::value(status.as_str()),
            );
        }
        if let Some(episodes) = &patch.episodes_watched {
            update = update.col_expr(
                watched_shows::Column::EpisodesWatched,
                sea_orm::sea_query::Expr::value(codec::encode_list(episodes)?),
            );
        }
        if let Some(notes) = &patch.notes {
            update = update.col_expr(
                watched_shows::Column::Notes,
                sea_orm::sea_query::Expr::value(notes.clone()),
            );
        }
        update = update.col_expr(
            watched_shows::Column::UpdatedAt,
            sea_orm::sea_query::Expr::value(chrono::Utc::now().to_rfc3339()),
        );

        let result = update.exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn update_movie_rating(
        &self,
        profile_id: &str,
        movie_id: i64,
        rating: i32,
    ) -> Result<bool> {
        let result = WatchedMovies::update_many()
            .col_expr(
                watched_movies::Column::Rating,
                sea_orm::sea_query::Expr::value(rating),
            )
            .filter(watched_movies::Column::ProfileId.eq(profile_id))
            .filter(watched_movies::Column::MovieId.eq(movie_id))
            .exec(&self.conn)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn remove_movie(&self, profile_id: &str, movie_id: i64) -> Result<bool> {
        let result = WatchedMovies::delete_many()
            .filter(watched_movies::Column::ProfileId.eq(profile_id))
            .filter(watched_movies::Column::MovieId.eq(movie_id))
            .exec(&self.conn)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn remove_show(&self, profile_id: &str, show_id: i64) -> Result<bool> {
        let result = WatchedShows::delete_many()
            .filter(watched_shows::Column::ProfileId.eq(profile_id))
            .filter(watched_shows::Column::ShowId.eq(show_id))
            .exec(&self.conn)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
