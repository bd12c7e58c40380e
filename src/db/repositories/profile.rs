use crate::db::error::StoreError;
use crate::entities::{prelude::*, profiles, watched_movies, watched_shows, watchlist};
use crate::models::profile::{Profile, ProfileUpdate};
use anyhow::Result;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::info;

pub struct ProfileRepository {
    conn: DatabaseConnection,
}

impl ProfileRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: profiles::Model) -> Profile {
        Profile {
            id: model.id,
            name: model.name,
            login: model.login,
            avatar: model.avatar,
            created_at: model.created_at,
        }
    }

    pub async fn set(&self, profile: &Profile) -> Result<()> {
        let active_model = profiles::ActiveModel {
            id: Set(profile.id.clone()),
            name: Set(profile.name.clone()),
            login: Set(profile.login.clone()),
            avatar: Set(profile.avatar.clone()),
            created_at: Set(profile.created_at.clone()),
        };

        Profiles::insert(active_model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(profiles::Column::Id)
                    .update_columns([
                        profiles::Column::Name,
                        profiles::Column::Login,
                        profiles::Column::Avatar,
                    ])
                    .to_owned(),
            )
            .exec(&self.conn)
            .await?;

        info!("Saved profile: {} ({})", profile.name, profile.id);
        Ok(())
    }

    pub async fn get_all(&self) -> Result<Vec<Profile>> {
        let rows = Profiles::find()
            .order_by_asc(profiles::Column::Name)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    /// Patches the given fields only. Fails on an empty patch and on an
    /// unknown id; it never creates a profile.
    pub async fn update(&self, id: &str, patch: &ProfileUpdate) -> Result<()> {
        if patch.is_empty() {
            return Err(StoreError::EmptyUpdate.into());
        }

        let mut update = Profiles::update_many().filter(profiles::Column::Id.eq(id));

        if let Some(name) = &patch.name {
            update = update.col_expr(
                profiles::Column::Name,
                sea_orm::sea_query::Expr::value(name.clone()),
            );
        }
        if let Some(login) = &patch.login {
            update = update.col_expr(
                profiles::Column::Login,
                sea_orm::sea_query::Expr::value(login.clone()),
            );
        }
        if let Some(avatar) = &patch.avatar {
            update = update.col_expr(
                profiles::Column::Avatar,
                sea_orm::sea_query::Expr::value(avatar.clone()),
            );
        }

        let result = update.exec(&self.conn).await?;
        if result.rows_affected == 0 {
            return Err(StoreError::ProfileNotFound(id.to_string()).into());
        }

        Ok(())
    }

    /// Deletes a profile and all of its dependent rows in one transaction.
    /// Cache tables are shared and stay untouched.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let txn = self.conn.begin().await?;

        watched_movies::Entity::delete_many()
            .filter(watched_movies::Column::ProfileId.eq(id))
            .exec(&txn)
            .await?;

        watched_shows::Entity::delete_many()
            .filter(watched_shows::Column::ProfileId.eq(id))
            .exec(&txn)
            .await?;

        watchlist::Entity::delete_many()
            .filter(watchlist::Column::ProfileId.eq(id))
            .exec(&txn)
            .await?;

        let result = Profiles::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        let removed = result.rows_affected > 0;
        if removed {
            info!("Removed profile {} and its watch data", id);
        }
        Ok(removed)
    }
}
