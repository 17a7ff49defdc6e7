use anyhow::{Context, Result};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::{DramaId, Pagination, timestamp_now};
use crate::entities::{dramas, prelude::*, watchlists};

pub struct WatchlistRepository {
    conn: DatabaseConnection,
}

impl WatchlistRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Newest additions first, each with its drama.
    pub async fn list(
        &self,
        user_id: i32,
        window: Pagination,
    ) -> Result<(Vec<(watchlists::Model, Option<dramas::Model>)>, u64)> {
        let paginator = Watchlists::find()
            .filter(watchlists::Column::UserId.eq(user_id))
            .order_by_desc(watchlists::Column::CreatedAt)
            .order_by_desc(watchlists::Column::DramaId)
            .find_also_related(Dramas)
            .paginate(&self.conn, window.limit());

        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(window.index()).await?;

        Ok((items, total))
    }

    /// Returns `false` when the drama was already on the list.
    pub async fn add(&self, user_id: i32, drama_id: DramaId) -> Result<bool> {
        let inserted = Watchlists::insert(watchlists::ActiveModel {
            user_id: Set(user_id),
            drama_id: Set(drama_id.value()),
            created_at: Set(timestamp_now()),
        })
        .on_conflict(
            OnConflict::columns([watchlists::Column::UserId, watchlists::Column::DramaId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(&self.conn)
        .await
        .context("Failed to add watchlist entry")?;

        Ok(inserted > 0)
    }

    pub async fn remove(&self, user_id: i32, drama_id: DramaId) -> Result<bool> {
        let result = Watchlists::delete_many()
            .filter(watchlists::Column::UserId.eq(user_id))
            .filter(watchlists::Column::DramaId.eq(drama_id.value()))
            .exec(&self.conn)
            .await
            .context("Failed to remove watchlist entry")?;

        Ok(result.rows_affected > 0)
    }

    pub async fn contains(&self, user_id: i32, drama_id: DramaId) -> Result<bool> {
        let count = Watchlists::find()
            .filter(watchlists::Column::UserId.eq(user_id))
            .filter(watchlists::Column::DramaId.eq(drama_id.value()))
            .count(&self.conn)
            .await
            .context("Failed to check watchlist")?;

        Ok(count > 0)
    }
}
