use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::{genres, prelude::*};

pub struct GenreRepository {
    conn: DatabaseConnection,
}

impl GenreRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<genres::Model>> {
        Genres::find()
            .order_by_asc(genres::Column::Name)
            .all(&self.conn)
            .await
            .context("Failed to list genres")
    }

    pub async fn get(&self, id: i32) -> Result<Option<genres::Model>> {
        Genres::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query genre")
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<genres::Model>> {
        Genres::find()
            .filter(genres::Column::Slug.eq(slug))
            .one(&self.conn)
            .await
            .context("Failed to query genre by slug")
    }

    pub async fn create(&self, name: &str, slug: &str) -> Result<genres::Model> {
        genres::ActiveModel {
            name: Set(name.to_string()),
            slug: Set(slug.to_string()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert genre")
    }

    pub async fn update(&self, id: i32, name: &str, slug: &str) -> Result<Option<genres::Model>> {
        let Some(genre) = self.get(id).await? else {
            return Ok(None);
        };

        let mut active: genres::ActiveModel = genre.into();
        active.name = Set(name.to_string());
        active.slug = Set(slug.to_string());
        let model = active
            .update(&self.conn)
            .await
            .context("Failed to update genre")?;

        Ok(Some(model))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Genres::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete genre")?;

        Ok(result.rows_affected > 0)
    }
}
