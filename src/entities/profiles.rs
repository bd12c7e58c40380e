use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    /// Opaque profile id (UUID v4, generated at creation).
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub name: String,

    /// Slug derived from the display name.
    pub login: String,

    pub avatar: Option<String>,

    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::watched_movies::Entity")]
    WatchedMovies,
    #[sea_orm(has_many = "super::watched_shows::Entity")]
    WatchedShows,
    #[sea_orm(has_many = "super::watchlist::Entity")]
    Watchlist,
}

impl Related<super::watched_movies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WatchedMovies.def()
    }
}

impl Related<super::watched_shows::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WatchedShows.def()
    }
}

impl Related<super::watchlist::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Watchlist.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
