use std::collections::HashSet;

use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};

use crate::db::query::DramaListQuery;
use crate::domain::{ActorRole, DramaId, DramaStatus, timestamp_now};
use crate::entities::{actors, drama_actors, drama_genres, dramas, genres, prelude::*};
use tracing::warn;

/// Why a drama create or update did not commit.
#[derive(Debug, thiserror::Error)]
pub enum DramaWriteError {
    #[error("Drama {0} not found")]
    NotFound(DramaId),

    #[error("Genre {0} does not exist")]
    MissingGenre(i32),

    #[error("Actor {0} does not exist")]
    MissingActor(i32),

    #[error(transparent)]
    Database(#[from] DbErr),
}

/// Scalar fields plus the full association sets for a drama write.
#[derive(Debug, Clone)]
pub struct DramaInput {
    pub title: String,
    pub synopsis: Option<String>,
    pub poster_url: Option<String>,
    pub year: i32,
    pub total_seasons: i32,
    pub status: DramaStatus,
    pub source_url: Option<String>,
    pub genre_ids: Vec<i32>,
    pub actors: Vec<(i32, ActorRole)>,
}

impl DramaInput {
    /// Genre ids with repeats removed, first occurrence kept.
    #[must_use]
    pub fn unique_genre_ids(&self) -> Vec<i32> {
        let mut seen = HashSet::new();
        self.genre_ids
            .iter()
            .copied()
            .filter(|id| seen.insert(*id))
            .collect()
    }

    /// Cast entries keyed by actor; a repeated actor keeps its first role.
    #[must_use]
    pub fn unique_cast(&self) -> Vec<(i32, ActorRole)> {
        let mut seen = HashSet::new();
        self.actors
            .iter()
            .copied()
            .filter(|(id, _)| seen.insert(*id))
            .collect()
    }
}

pub struct DramaRepository {
    conn: DatabaseConnection,
}

impl DramaRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Runs the count and the page fetch inside one read transaction so both
    /// observe the same snapshot.
    pub async fn list(&self, query: &DramaListQuery) -> Result<(Vec<dramas::Model>, u64)> {
        let txn = self.conn.begin().await?;

        let total = query
            .count_select()
            .count(&txn)
            .await
            .context("Failed to count dramas")?;

        let items = query
            .page_select()
            .all(&txn)
            .await
            .context("Failed to fetch drama page")?;

        txn.commit().await?;
        Ok((items, total))
    }

    pub async fn get(&self, id: DramaId) -> Result<Option<dramas::Model>> {
        Dramas::find_by_id(id.value())
            .one(&self.conn)
            .await
            .context("Failed to query drama")
    }

    pub async fn exists(&self, id: DramaId) -> Result<bool> {
        let count = Dramas::find_by_id(id.value())
            .count(&self.conn)
            .await
            .context("Failed to check drama")?;

        Ok(count > 0)
    }

    pub async fn genres(&self, id: DramaId) -> Result<Vec<genres::Model>> {
        Genres::find()
            .join(
                sea_orm::JoinType::InnerJoin,
                genres::Relation::DramaGenres.def(),
            )
            .filter(drama_genres::Column::DramaId.eq(id.value()))
            .order_by_asc(genres::Column::Name)
            .all(&self.conn)
            .await
            .context("Failed to load drama genres")
    }

    pub async fn cast(&self, id: DramaId) -> Result<Vec<(actors::Model, ActorRole)>> {
        let rows = DramaActors::find()
            .filter(drama_actors::Column::DramaId.eq(id.value()))
            .find_also_related(Actors)
            .order_by_asc(actors::Column::Name)
            .all(&self.conn)
            .await
            .context("Failed to load drama cast")?;

        Ok(rows
            .into_iter()
            .filter_map(|(link, actor)| {
                let role = link.role.parse().unwrap_or_else(|_| {
                    warn!(
                        drama_id = link.drama_id,
                        actor_id = link.actor_id,
                        stored_role = %link.role,
                        "Unknown cast role, treating as support"
                    );
                    ActorRole::Support
                });
                actor.map(|actor| (actor, role))
            })
            .collect())
    }

    /// Inserts the drama and its associations atomically.
    pub async fn create(
        &self,
        input: &DramaInput,
        added_by: Option<i32>,
    ) -> Result<DramaId, DramaWriteError> {
        let txn = self.conn.begin().await?;
        let now = timestamp_now();

        let inserted = Dramas::insert(dramas::ActiveModel {
            title: Set(input.title.clone()),
            synopsis: Set(input.synopsis.clone()),
            poster_url: Set(input.poster_url.clone()),
            year: Set(input.year),
            rating: Set(0.0),
            total_seasons: Set(input.total_seasons),
            status: Set(input.status.as_str().to_string()),
            view_count: Set(0),
            source_url: Set(input.source_url.clone()),
            added_by: Set(added_by),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        })
        .exec(&txn)
        .await?;

        let id = inserted.last_insert_id;
        replace_genres(&txn, id, &input.unique_genre_ids()).await?;
        replace_cast(&txn, id, &input.unique_cast()).await?;

        txn.commit().await?;
        Ok(DramaId::new(id))
    }

    /// Overwrites scalar fields and replaces both association sets wholesale.
    /// Nothing is kept unless every step succeeds.
    pub async fn update(&self, id: DramaId, input: &DramaInput) -> Result<(), DramaWriteError> {
        let txn = self.conn.begin().await?;

        let existing = Dramas::find_by_id(id.value())
            .one(&txn)
            .await?
            .ok_or(DramaWriteError::NotFound(id))?;

        let mut active: dramas::ActiveModel = existing.into();
        active.title = Set(input.title.clone());
        active.synopsis = Set(input.synopsis.clone());
        active.poster_url = Set(input.poster_url.clone());
        active.year = Set(input.year);
        active.total_seasons = Set(input.total_seasons);
        active.status = Set(input.status.as_str().to_string());
        active.source_url = Set(input.source_url.clone());
        active.updated_at = Set(timestamp_now());
        active.update(&txn).await?;

        replace_genres(&txn, id.value(), &input.unique_genre_ids()).await?;
        replace_cast(&txn, id.value(), &input.unique_cast()).await?;

        txn.commit().await?;
        Ok(())
    }

    /// Association rows go with the drama through ON DELETE CASCADE.
    pub async fn delete(&self, id: DramaId) -> Result<bool> {
        let result = Dramas::delete_by_id(id.value())
            .exec(&self.conn)
            .await
            .context("Failed to delete drama")?;

        Ok(result.rows_affected > 0)
    }
}

async fn replace_genres(
    txn: &DatabaseTransaction,
    drama_id: i32,
    genre_ids: &[i32],
) -> Result<(), DramaWriteError> {
    if !genre_ids.is_empty() {
        let found: HashSet<i32> = Genres::find()
            .select_only()
            .column(genres::Column::Id)
            .filter(genres::Column::Id.is_in(genre_ids.iter().copied()))
            .into_tuple::<i32>()
            .all(txn)
            .await?
            .into_iter()
            .collect();

        if let Some(missing) = genre_ids.iter().find(|id| !found.contains(id)) {
            return Err(DramaWriteError::MissingGenre(*missing));
        }
    }

    DramaGenres::delete_many()
        .filter(drama_genres::Column::DramaId.eq(drama_id))
        .exec(txn)
        .await?;

    if !genre_ids.is_empty() {
        let rows = genre_ids.iter().map(|genre_id| drama_genres::ActiveModel {
            drama_id: Set(drama_id),
            genre_id: Set(*genre_id),
        });
        DramaGenres::insert_many(rows)
            .exec_without_returning(txn)
            .await?;
    }

    Ok(())
}

async fn replace_cast(
    txn: &DatabaseTransaction,
    drama_id: i32,
    cast: &[(i32, ActorRole)],
) -> Result<(), DramaWriteError> {
    if !cast.is_empty() {
        let found: HashSet<i32> = Actors::find()
            .select_only()
            .column(actors::Column::Id)
            .filter(actors::Column::Id.is_in(cast.iter().map(|(id, _)| *id)))
            .into_tuple::<i32>()
            .all(txn)
            .await?
            .into_iter()
            .collect();

        if let Some((missing, _)) = cast.iter().find(|(id, _)| !found.contains(id)) {
            return Err(DramaWriteError::MissingActor(*missing));
        }
    }

    DramaActors::delete_many()
        .filter(drama_actors::Column::DramaId.eq(drama_id))
        .exec(txn)
        .await?;

    if !cast.is_empty() {
        let rows = cast.iter().map(|(actor_id, role)| drama_actors::ActiveModel {
            drama_id: Set(drama_id),
            actor_id: Set(*actor_id),
            role: Set(role.as_str().to_string()),
        });
        DramaActors::insert_many(rows)
            .exec_without_returning(txn)
            .await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(genre_ids: Vec<i32>, actors: Vec<(i32, ActorRole)>) -> DramaInput {
        DramaInput {
            title: "Goblin".to_string(),
            synopsis: None,
            poster_url: None,
            year: 2016,
            total_seasons: 1,
            status: DramaStatus::Completed,
            source_url: None,
            genre_ids,
            actors,
        }
    }

    #[test]
    fn test_unique_genre_ids_keeps_first_occurrence() {
        let input = input(vec![4, 2, 4, 1, 2], vec![]);
        assert_eq!(input.unique_genre_ids(), vec![4, 2, 1]);
    }

    #[test]
    fn test_unique_cast_keeps_first_role() {
        let input = input(
            vec![1],
            vec![
                (7, ActorRole::Main),
                (8, ActorRole::Support),
                (7, ActorRole::Support),
            ],
        );
        assert_eq!(
            input.unique_cast(),
            vec![(7, ActorRole::Main), (8, ActorRole::Support)]
        );
    }
}
