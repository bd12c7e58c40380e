use sea_orm::entity::prelude::*;

/// Items a profile intends to watch. `item_id` points at either the movie
/// or the show cache table depending on `item_type`, so there is no engine
/// level foreign key to a cache table here.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "watchlist")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub profile_id: String,
    /// "movie" | "tv"
    #[sea_orm(primary_key, auto_increment = false)]
    pub item_type: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub item_id: i64,
    pub added_at: String,
    pub priority: i32,
    pub notes: Option<String>,
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
}

impl Related<super::profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profiles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
