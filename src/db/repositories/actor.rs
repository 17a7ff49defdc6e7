use anyhow::{Context, Result};
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use crate::db::query::escape_like;
use crate::domain::{Pagination, timestamp_now};
use crate::entities::{actors, prelude::*};

pub struct ActorRepository {
    conn: DatabaseConnection,
}

impl ActorRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Name-ordered page, optionally narrowed by a case-insensitive name search.
    pub async fn list(
        &self,
        window: Pagination,
        search: Option<&str>,
    ) -> Result<(Vec<actors::Model>, u64)> {
        let mut query = Actors::find()
            .order_by_asc(actors::Column::Name)
            .order_by_asc(actors::Column::Id);

        if let Some(term) = search.map(str::trim).filter(|s| !s.is_empty()) {
            let pattern = format!("%{}%", escape_like(&term.to_lowercase()));
            query = query.filter(
                Expr::expr(Func::lower(Expr::col((Actors, actors::Column::Name))))
                    .like(LikeExpr::new(pattern).escape('\\')),
            );
        }

        let paginator = query.paginate(&self.conn, window.limit());
        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(window.index()).await?;

        Ok((items, total))
    }

    pub async fn get(&self, id: i32) -> Result<Option<actors::Model>> {
        Actors::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query actor")
    }

    pub async fn create(&self, name: &str, photo_url: Option<String>) -> Result<actors::Model> {
        actors::ActiveModel {
            name: Set(name.to_string()),
            photo_url: Set(photo_url),
            created_at: Set(timestamp_now()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert actor")
    }

    pub async fn update(
        &self,
        id: i32,
        name: &str,
        photo_url: Option<String>,
    ) -> Result<Option<actors::Model>> {
        let Some(actor) = self.get(id).await? else {
            return Ok(None);
        };

        let mut active: actors::ActiveModel = actor.into();
        active.name = Set(name.to_string());
        active.photo_url = Set(photo_url);
        let model = active
            .update(&self.conn)
            .await
            .context("Failed to update actor")?;

        Ok(Some(model))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Actors::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete actor")?;

        Ok(result.rows_affected > 0)
    }
}
