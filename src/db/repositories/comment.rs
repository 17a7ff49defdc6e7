use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::{Pagination, timestamp_now};
use crate::entities::{comments, prelude::*, users};

pub struct CommentRepository {
    conn: DatabaseConnection,
}

impl CommentRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list_for_episode(
        &self,
        episode_id: i32,
        window: Pagination,
    ) -> Result<(Vec<(comments::Model, Option<users::Model>)>, u64)> {
        let paginator = Comments::find()
            .filter(comments::Column::EpisodeId.eq(episode_id))
            .order_by_desc(comments::Column::CreatedAt)
            .order_by_desc(comments::Column::Id)
            .find_also_related(Users)
            .paginate(&self.conn, window.limit());

        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(window.index()).await?;

        Ok((items, total))
    }

    pub async fn get(&self, id: i32) -> Result<Option<comments::Model>> {
        Comments::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query comment")
    }

    pub async fn create(
        &self,
        user_id: i32,
        episode_id: i32,
        comment_text: &str,
    ) -> Result<comments::Model> {
        let now = timestamp_now();

        comments::ActiveModel {
            user_id: Set(user_id),
            episode_id: Set(episode_id),
            comment_text: Set(comment_text.to_string()),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert comment")
    }

    pub async fn update(&self, id: i32, comment_text: &str) -> Result<Option<comments::Model>> {
        let Some(comment) = self.get(id).await? else {
            return Ok(None);
        };

        let mut active: comments::ActiveModel = comment.into();
        active.comment_text = Set(comment_text.to_string());
        active.updated_at = Set(timestamp_now());
        let model = active
            .update(&self.conn)
            .await
            .context("Failed to update comment")?;

        Ok(Some(model))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Comments::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete comment")?;

        Ok(result.rows_affected > 0)
    }
}
