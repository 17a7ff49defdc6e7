//! Admin dashboard figures.

use thiserror::Error;

use crate::api::types::DashboardDto;
use crate::db::DbFailure;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for AnalyticsError {
    fn from(err: anyhow::Error) -> Self {
        match DbFailure::of_anyhow(&err) {
            DbFailure::Unavailable => Self::Unavailable(format!("{err:#}")),
            _ => Self::Database(format!("{err:#}")),
        }
    }
}

#[async_trait::async_trait]
pub trait AnalyticsService: Send + Sync {
    /// Catalog-wide totals; `total_views` sums drama view counts.
    async fn dashboard(&self) -> Result<DashboardDto, AnalyticsError>;
}
