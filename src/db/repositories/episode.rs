use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::timestamp_now;
use crate::entities::{episodes, prelude::*, seasons};

/// Writable episode fields.
#[derive(Debug, Clone)]
pub struct EpisodeInput {
    pub episode_number: i32,
    pub title: String,
    pub video_url: String,
    pub duration: i32,
    pub thumbnail_url: Option<String>,
    pub source_url: Option<String>,
}

pub struct EpisodeRepository {
    conn: DatabaseConnection,
}

impl EpisodeRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list_for_season(&self, season_id: i32) -> Result<Vec<episodes::Model>> {
        Episodes::find()
            .filter(episodes::Column::SeasonId.eq(season_id))
            .order_by_asc(episodes::Column::EpisodeNumber)
            .all(&self.conn)
            .await
            .context("Failed to list episodes")
    }

    pub async fn get(&self, id: i32) -> Result<Option<episodes::Model>> {
        Episodes::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query episode")
    }

    /// Episode together with the season it belongs to.
    pub async fn get_with_season(
        &self,
        id: i32,
    ) -> Result<Option<(episodes::Model, Option<seasons::Model>)>> {
        Episodes::find_by_id(id)
            .find_also_related(Seasons)
            .one(&self.conn)
            .await
            .context("Failed to query episode with season")
    }

    pub async fn create(
        &self,
        season_id: i32,
        input: EpisodeInput,
        added_by: Option<i32>,
    ) -> Result<episodes::Model> {
        episodes::ActiveModel {
            season_id: Set(season_id),
            episode_number: Set(input.episode_number),
            title: Set(input.title),
            video_url: Set(input.video_url),
            duration: Set(input.duration),
            thumbnail_url: Set(input.thumbnail_url),
            view_count: Set(0),
            source_url: Set(input.source_url),
            added_by: Set(added_by),
            created_at: Set(timestamp_now()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert episode")
    }

    pub async fn update(&self, id: i32, input: EpisodeInput) -> Result<Option<episodes::Model>> {
        let Some(episode) = self.get(id).await? else {
            return Ok(None);
        };

        let mut active: episodes::ActiveModel = episode.into();
        active.episode_number = Set(input.episode_number);
        active.title = Set(input.title);
        active.video_url = Set(input.video_url);
        active.duration = Set(input.duration);
        active.thumbnail_url = Set(input.thumbnail_url);
        active.source_url = Set(input.source_url);
        let model = active
            .update(&self.conn)
            .await
            .context("Failed to update episode")?;

        Ok(Some(model))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Episodes::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete episode")?;

        Ok(result.rows_affected > 0)
    }
}
