//! `SeaORM` implementation of the `AnalyticsService` trait.

use crate::api::types::DashboardDto;
use crate::db::Store;
use crate::services::analytics_service::{AnalyticsError, AnalyticsService};
use async_trait::async_trait;

pub struct SeaOrmAnalyticsService {
    store: Store,
}

impl SeaOrmAnalyticsService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AnalyticsService for SeaOrmAnalyticsService {
    async fn dashboard(&self) -> Result<DashboardDto, AnalyticsError> {
        let totals = self.store.catalog_totals().await?;
        Ok(DashboardDto {
            total_users: totals.users,
            total_dramas: totals.dramas,
            total_episodes: totals.episodes,
            total_views: totals.views,
        })
    }
}
