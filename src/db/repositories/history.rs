use anyhow::{Context, Result};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::domain::{Pagination, timestamp_now};
use crate::entities::{dramas, episodes, prelude::*, seasons, watch_history};

pub struct HistoryRepository {
    conn: DatabaseConnection,
}

impl HistoryRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Records progress for (user, episode). The first record a user makes for
    /// an episode counts as a view of that episode and of its drama.
    pub async fn record(
        &self,
        user_id: i32,
        episode_id: i32,
        progress_seconds: i32,
        completed: bool,
    ) -> Result<watch_history::Model> {
        let txn = self.conn.begin().await?;
        let now = timestamp_now();

        let existing = WatchHistory::find()
            .filter(watch_history::Column::UserId.eq(user_id))
            .filter(watch_history::Column::EpisodeId.eq(episode_id))
            .one(&txn)
            .await
            .context("Failed to query watch history")?;

        let model = if let Some(existing) = existing {
            let mut active: watch_history::ActiveModel = existing.into();
            active.progress_seconds = Set(progress_seconds);
            active.completed = Set(completed);
            active.last_watched_at = Set(now);
            active.update(&txn).await?
        } else {
            let model = watch_history::ActiveModel {
                user_id: Set(user_id),
                episode_id: Set(episode_id),
                progress_seconds: Set(progress_seconds),
                completed: Set(completed),
                last_watched_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .context("Failed to insert watch history")?;

            Episodes::update_many()
                .col_expr(
                    episodes::Column::ViewCount,
                    Expr::col(episodes::Column::ViewCount).add(1),
                )
                .filter(episodes::Column::Id.eq(episode_id))
                .exec(&txn)
                .await?;

            let drama_id = Episodes::find_by_id(episode_id)
                .find_also_related(Seasons)
                .one(&txn)
                .await?
                .and_then(|(_, season)| season.map(|s: seasons::Model| s.drama_id));

            if let Some(drama_id) = drama_id {
                Dramas::update_many()
                    .col_expr(
                        dramas::Column::ViewCount,
                        Expr::col(dramas::Column::ViewCount).add(1),
                    )
                    .filter(dramas::Column::Id.eq(drama_id))
                    .exec(&txn)
                    .await?;
            }

            model
        };

        txn.commit().await?;
        Ok(model)
    }

    /// Most recently watched first, each with its episode.
    pub async fn list(
        &self,
        user_id: i32,
        window: Pagination,
    ) -> Result<(Vec<(watch_history::Model, Option<episodes::Model>)>, u64)> {
        let paginator = WatchHistory::find()
            .filter(watch_history::Column::UserId.eq(user_id))
            .order_by_desc(watch_history::Column::LastWatchedAt)
            .order_by_desc(watch_history::Column::Id)
            .find_also_related(Episodes)
            .paginate(&self.conn, window.limit());

        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(window.index()).await?;

        Ok((items, total))
    }

    pub async fn get(&self, user_id: i32, episode_id: i32) -> Result<Option<watch_history::Model>> {
        WatchHistory::find()
            .filter(watch_history::Column::UserId.eq(user_id))
            .filter(watch_history::Column::EpisodeId.eq(episode_id))
            .one(&self.conn)
            .await
            .context("Failed to query watch progress")
    }
}
