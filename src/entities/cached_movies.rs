use sea_orm::entity::prelude::*;

/// Best-effort mirror of TMDB movie metadata, keyed by the TMDB id.
/// Refreshed on every reference, never independently deleted.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cached_movies")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub title: String,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f32>,
    /// JSON array of TMDB genre ids.
    pub genre_ids: Option<String>,
    /// JSON array of {id, name} genre objects.
    pub genres: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::watched_movies::Entity")]
    WatchedMovies,
}

impl Related<super::watched_movies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WatchedMovies.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
