use crate::entities::prelude::*;
use crate::entities::{dramas, episodes, seasons};
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{EntityTrait, Schema};

#[derive(DeriveMigrationName)]
pub struct Migration;

async fn create_from_entity<E>(manager: &SchemaManager<'_>, schema: &Schema, entity: E) -> Result<(), DbErr>
where
    E: EntityTrait,
{
    manager
        .create_table(
            schema
                .create_table_from_entity(entity)
                .if_not_exists()
                .to_owned(),
        )
        .await
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        // Parents before children so foreign keys read naturally in the schema dump.
        create_from_entity(manager, &schema, Users).await?;
        create_from_entity(manager, &schema, Genres).await?;
        create_from_entity(manager, &schema, Actors).await?;
        create_from_entity(manager, &schema, Dramas).await?;
        create_from_entity(manager, &schema, DramaGenres).await?;
        create_from_entity(manager, &schema, DramaActors).await?;
        create_from_entity(manager, &schema, Seasons).await?;
        create_from_entity(manager, &schema, Episodes).await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_seasons_drama_number")
                    .table(Seasons)
                    .col(seasons::Column::DramaId)
                    .col(seasons::Column::SeasonNumber)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_episodes_season_number")
                    .table(Episodes)
                    .col(episodes::Column::SeasonId)
                    .col(episodes::Column::EpisodeNumber)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        for (name, column) in [
            ("idx_dramas_created_at", dramas::Column::CreatedAt),
            ("idx_dramas_status", dramas::Column::Status),
            ("idx_dramas_view_count", dramas::Column::ViewCount),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(Dramas)
                        .col(column)
                        .if_not_exists()
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Episodes).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Seasons).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DramaActors).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DramaGenres).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Dramas).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Actors).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Genres).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users).if_exists().to_owned())
            .await?;

        Ok(())
    }
}
