use sea_orm::entity::prelude::*;

/// Best-effort mirror of TMDB TV metadata, keyed by the TMDB id.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cached_shows")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub name: String,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub first_air_date: Option<String>,
    pub vote_average: Option<f32>,
    /// JSON array of TMDB genre ids.
    pub genre_ids: Option<String>,
    /// JSON array of {id, name} genre objects.
    pub genres: Option<String>,
    pub number_of_seasons: Option<i32>,
    pub number_of_episodes: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::watched_shows::Entity")]
    WatchedShows,
}

impl Related<super::watched_shows::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WatchedShows.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
