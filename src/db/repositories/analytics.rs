use anyhow::{Context, Result};
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, QuerySelect};

use crate::entities::{dramas, prelude::*};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogTotals {
    pub users: u64,
    pub dramas: u64,
    pub episodes: u64,
    pub views: i64,
}

pub struct AnalyticsRepository {
    conn: DatabaseConnection,
}

impl AnalyticsRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// The four aggregates are independent, so they run concurrently.
    pub async fn totals(&self) -> Result<CatalogTotals> {
        let users = async {
            Users::find()
                .count(&self.conn)
                .await
                .context("Failed to count users")
        };
        let dramas = async {
            Dramas::find()
                .count(&self.conn)
                .await
                .context("Failed to count dramas")
        };
        let episodes = async {
            Episodes::find()
                .count(&self.conn)
                .await
                .context("Failed to count episodes")
        };
        let views = async {
            Dramas::find()
                .select_only()
                .column_as(
                    SimpleExpr::from(Func::sum(Expr::col(dramas::Column::ViewCount))),
                    "views",
                )
                .into_tuple::<Option<i64>>()
                .one(&self.conn)
                .await
                .context("Failed to sum drama views")
        };

        let (users, dramas, episodes, views) = tokio::try_join!(users, dramas, episodes, views)?;

        Ok(CatalogTotals {
            users,
            dramas,
            episodes,
            views: views.flatten().unwrap_or(0),
        })
    }
}
