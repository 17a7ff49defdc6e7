use anyhow::{Context, Result};
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::domain::{DramaId, Pagination, timestamp_now};
use crate::entities::{dramas, prelude::*, reviews, users};

pub struct ReviewRepository {
    conn: DatabaseConnection,
}

impl ReviewRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Newest first, each with its author.
    pub async fn list_for_drama(
        &self,
        drama_id: DramaId,
        window: Pagination,
    ) -> Result<(Vec<(reviews::Model, Option<users::Model>)>, u64)> {
        let paginator = Reviews::find()
            .filter(reviews::Column::DramaId.eq(drama_id.value()))
            .order_by_desc(reviews::Column::CreatedAt)
            .order_by_desc(reviews::Column::Id)
            .find_also_related(Users)
            .paginate(&self.conn, window.limit());

        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(window.index()).await?;

        Ok((items, total))
    }

    pub async fn get(&self, id: i32) -> Result<Option<reviews::Model>> {
        Reviews::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query review")
    }

    /// Inserts the review and refreshes the drama's rating in one transaction.
    pub async fn create(
        &self,
        user_id: i32,
        drama_id: DramaId,
        rating: i32,
        review_text: &str,
    ) -> Result<reviews::Model> {
        let txn = self.conn.begin().await?;
        let now = timestamp_now();

        let model = reviews::ActiveModel {
            user_id: Set(user_id),
            drama_id: Set(drama_id.value()),
            rating: Set(rating),
            review_text: Set(review_text.to_string()),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .context("Failed to insert review")?;

        refresh_drama_rating(&txn, drama_id.value()).await?;

        txn.commit().await?;
        Ok(model)
    }

    pub async fn update(
        &self,
        id: i32,
        rating: i32,
        review_text: &str,
    ) -> Result<Option<reviews::Model>> {
        let txn = self.conn.begin().await?;

        let Some(review) = Reviews::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };
        let drama_id = review.drama_id;

        let mut active: reviews::ActiveModel = review.into();
        active.rating = Set(rating);
        active.review_text = Set(review_text.to_string());
        active.updated_at = Set(timestamp_now());
        let model = active
            .update(&txn)
            .await
            .context("Failed to update review")?;

        refresh_drama_rating(&txn, drama_id).await?;

        txn.commit().await?;
        Ok(Some(model))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let txn = self.conn.begin().await?;

        let Some(review) = Reviews::find_by_id(id).one(&txn).await? else {
            return Ok(false);
        };

        Reviews::delete_by_id(id)
            .exec(&txn)
            .await
            .context("Failed to delete review")?;

        refresh_drama_rating(&txn, review.drama_id).await?;

        txn.commit().await?;
        Ok(true)
    }
}

/// Rewrites `dramas.rating` from the current reviews of that drama.
async fn refresh_drama_rating<C>(db: &C, drama_id: i32) -> Result<f64>
where
    C: ConnectionTrait,
{
    let average = Reviews::find()
        .select_only()
        .column_as(
            SimpleExpr::from(Func::avg(Expr::col(reviews::Column::Rating))),
            "average",
        )
        .filter(reviews::Column::DramaId.eq(drama_id))
        .into_tuple::<Option<f64>>()
        .one(db)
        .await
        .context("Failed to average review ratings")?
        .flatten();

    let rating = round_rating(average);

    Dramas::update_many()
        .col_expr(dramas::Column::Rating, Expr::value(rating))
        .filter(dramas::Column::Id.eq(drama_id))
        .exec(db)
        .await
        .context("Failed to store drama rating")?;

    Ok(rating)
}

/// Mean rating rounded to one decimal; no reviews means 0.0.
#[must_use]
pub fn round_rating(average: Option<f64>) -> f64 {
    average.map_or(0.0, |avg| (avg * 10.0).round() / 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_rating() {
        assert!((round_rating(None) - 0.0).abs() < f64::EPSILON);
        assert!((round_rating(Some(8.0)) - 8.0).abs() < f64::EPSILON);
        assert!((round_rating(Some(26.0 / 3.0)) - 8.7).abs() < 1e-9);
        assert!((round_rating(Some(7.25)) - 7.3).abs() < 1e-9);
    }
}
