use crate::entities::prelude::*;
use crate::entities::{comments, reviews, watch_history};
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        manager
            .create_table(
                schema
                    .create_table_from_entity(WatchHistory)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Watchlists)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Reviews)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Comments)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Upserts on history and the one-review-per-drama rule hinge on these.
        manager
            .create_index(
                Index::create()
                    .name("idx_watch_history_user_episode")
                    .table(WatchHistory)
                    .col(watch_history::Column::UserId)
                    .col(watch_history::Column::EpisodeId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reviews_user_drama")
                    .table(Reviews)
                    .col(reviews::Column::UserId)
                    .col(reviews::Column::DramaId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_comments_episode")
                    .table(Comments)
                    .col(comments::Column::EpisodeId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Comments).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Reviews).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Watchlists).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(WatchHistory).if_exists().to_owned())
            .await?;

        Ok(())
    }
}
