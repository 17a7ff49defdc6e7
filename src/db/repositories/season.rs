use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::{DramaId, timestamp_now};
use crate::entities::{prelude::*, seasons};

pub struct SeasonRepository {
    conn: DatabaseConnection,
}

impl SeasonRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list_for_drama(&self, drama_id: DramaId) -> Result<Vec<seasons::Model>> {
        Seasons::find()
            .filter(seasons::Column::DramaId.eq(drama_id.value()))
            .order_by_asc(seasons::Column::SeasonNumber)
            .all(&self.conn)
            .await
            .context("Failed to list seasons")
    }

    pub async fn get(&self, id: i32) -> Result<Option<seasons::Model>> {
        Seasons::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query season")
    }

    pub async fn create(
        &self,
        drama_id: DramaId,
        season_number: i32,
        title: &str,
    ) -> Result<seasons::Model> {
        seasons::ActiveModel {
            drama_id: Set(drama_id.value()),
            season_number: Set(season_number),
            title: Set(title.to_string()),
            created_at: Set(timestamp_now()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert season")
    }

    pub async fn update(
        &self,
        id: i32,
        season_number: i32,
        title: &str,
    ) -> Result<Option<seasons::Model>> {
        let Some(season) = self.get(id).await? else {
            return Ok(None);
        };

        let mut active: seasons::ActiveModel = season.into();
        active.season_number = Set(season_number);
        active.title = Set(title.to_string());
        let model = active
            .update(&self.conn)
            .await
            .context("Failed to update season")?;

        Ok(Some(model))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Seasons::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete season")?;

        Ok(result.rows_affected > 0)
    }
}
