use crate::entities::{prelude::*, settings};
use anyhow::Result;
use sea_orm::{DatabaseConnection, EntityTrait, Set};

pub struct SettingsRepository {
    conn: DatabaseConnection,
}

impl SettingsRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn set(&self, key: &str, value: &str) -> Result<()> {
        let active_model = settings::ActiveModel {
            key: Set(key.to_string()),
            value: Set(value.to_string()),
        };

        Settings::insert(active_model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(settings::Column::Key)
                    .update_column(settings::Column::Value)
                    .to_owned(),
            )
            .exec(&self.conn)
            .await?;

        Ok(())
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let row = Settings::find_by_id(key).one(&self.conn).await?;
        Ok(row.map(|m| m.value))
    }
}
