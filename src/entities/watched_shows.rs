use sea_orm::entity::prelude::*;

/// One row per (profile, show), carrying per-episode progress.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "watched_shows")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub profile_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub show_id: i64,
    /// 0 means unrated.
    pub rating: i32,
    /// "watching" | "completed" | "dropped"
    pub status: String,
    /// JSON array of watched episode numbers, in watch order.
    pub episodes_watched: Option<String>,
    pub notes: Option<String>,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::profiles::Entity",
        from = "Column::ProfileId",
        to = "super::profiles::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Profiles,
    #[sea_orm(
        belongs_to = "super::cached_shows::Entity",
        from = "Column::ShowId",
        to = "super::cached_shows::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    CachedShows,
}

impl Related<super::profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profiles.def()
    }
}

impl Related<super::cached_shows::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CachedShows.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
