use sea_orm::entity::prelude::*;

/// One row per (profile, movie). Re-adding replaces the row.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "watched_movies")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub profile_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub movie_id: i64,
    /// 0 means unrated.
    pub rating: i32,
    pub watched_at: String,
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    // Dependent rows are cleaned up by the facade, not by the engine.
    #[sea_orm(
        belongs_to = "super::profiles::Entity",
        from = "Column::ProfileId",
        to = "super::profiles::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Profiles,
    #[sea_orm(
        belongs_to = "super::cached_movies::Entity",
        from = "Column::MovieId",
        to = "super::cached_movies::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    CachedMovies,
}

impl Related<super::profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profiles.def()
    }
}

impl Related<super::cached_movies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CachedMovies.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
