use crate::entities::prelude::*;
use crate::entities::{profiles, watched_movies, watched_shows, watchlist};
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        manager
            .create_table(
                schema
                    .create_table_from_entity(Profiles)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Settings)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(CachedMovies)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(CachedShows)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(WatchedMovies)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(WatchedShows)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Watchlist)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Sort-order indexes for the list queries.
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_profiles_name")
                    .table(Profiles)
                    .col(profiles::Column::Name)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_watched_movies_watched_at")
                    .table(WatchedMovies)
                    .col(watched_movies::Column::WatchedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_watched_shows_updated_at")
                    .table(WatchedShows)
                    .col(watched_shows::Column::UpdatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_watchlist_added_at")
                    .table(Watchlist)
                    .col(watchlist::Column::AddedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Watchlist).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(WatchedShows).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(WatchedMovies).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CachedShows).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CachedMovies).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Settings).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Profiles).to_owned())
            .await?;

        Ok(())
    }
}
