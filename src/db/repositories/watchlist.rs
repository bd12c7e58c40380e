use crate::entities::{prelude::*, watchlist};
use crate::models::media::MediaType;
use anyhow::Result;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

pub struct WatchlistRepository {
    conn: DatabaseConnection,
}

impl WatchlistRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Upserts by (profile, type, id); re-adding refreshes timestamp,
    /// priority and notes instead of duplicating.
    pub async fn add(
        &self,
        profile_id: &str,
        item_type: MediaType,
        item_id: i64,
        priority: i32,
        notes: Option<&str>,
    ) -> Result<()> {
        let active_model = watchlist::ActiveModel {
            profile_id: Set(profile_id.to_string()),
            item_type: Set(item_type.as_str().to_string()),
            item_id: Set(item_id),
            added_at: Set(chrono::Utc::now().to_rfc3339()),
            priority: Set(priority),
            notes: Set(notes.map(ToString::to_string)),
        };

        Watchlist::insert(active_model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::columns([
                    watchlist::Column::ProfileId,
                    watchlist::Column::ItemType,
                    watchlist::Column::ItemId,
                ])
                .update_columns([
                    watchlist::Column::AddedAt,
                    watchlist::Column::Priority,
                    watchlist::Column::Notes,
                ])
                .to_owned(),
            )
            .exec(&self.conn)
            .await?;

        Ok(())
    }

    pub async fn get(
        &self,
        profile_id: &str,
        item_type: MediaType,
        item_id: i64,
    ) -> Result<Option<watchlist::Model>> {
        let row = Watchlist::find_by_id((
            profile_id.to_string(),
            item_type.as_str().to_string(),
            item_id,
        ))
        .one(&self.conn)
        .await?;

        Ok(row)
    }

    /// Raw rows, newest-added first. The facade joins in the cached
    /// metadata since the type discriminator picks the table.
    pub async fn rows_for(&self, profile_id: &str) -> Result<Vec<watchlist::Model>> {
        let rows = Watchlist::find()
            .filter(watchlist::Column::ProfileId.eq(profile_id))
            .order_by_desc(watchlist::Column::AddedAt)
            .all(&self.conn)
            .await?;

        Ok(rows)
    }

    pub async fn remove(
        &self,
        profile_id: &str,
        item_type: MediaType,
        item_id: i64,
    ) -> Result<bool> {
        let result = Watchlist::delete_many()
            .filter(watchlist::Column::ProfileId.eq(profile_id))
            .filter(watchlist::Column::ItemType.eq(item_type.as_str()))
            .filter(watchlist::Column::ItemId.eq(item_id))
            .exec(&self.conn)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
