//! `SeaORM` implementation of the `DramaService` trait.

use crate::api::types::{DramaDto, DramaSummaryDto};
use crate::db::{DramaInput, DramaListQuery, Store};
use crate::domain::{DramaId, Page};
use crate::services::drama_service::{DramaError, DramaService};
use async_trait::async_trait;
use tracing::{info, warn};

pub struct SeaOrmDramaService {
    store: Store,
}

impl SeaOrmDramaService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    fn record_write(op: &'static str, outcome: &'static str) {
        metrics::counter!("drama_writes_total", "op" => op, "outcome" => outcome).increment(1);
    }
}

#[async_trait]
impl DramaService for SeaOrmDramaService {
    async fn list(&self, query: DramaListQuery) -> Result<Page<DramaSummaryDto>, DramaError> {
        let (rows, total) = self.store.list_dramas(&query).await?;
        Ok(Page::new(rows, total, query.window).map(DramaSummaryDto::from))
    }

    async fn get(&self, id: DramaId) -> Result<DramaDto, DramaError> {
        let drama = self
            .store
            .get_drama(id)
            .await?
            .ok_or(DramaError::NotFound(id))?;

        let (genres, cast) = tokio::join!(
            self.store.get_drama_genres(id),
            self.store.get_drama_cast(id)
        );

        let genres = genres.unwrap_or_else(|e| {
            warn!(drama_id = %id, error = %e, "Failed to load drama genres");
            Vec::new()
        });
        let cast = cast.unwrap_or_else(|e| {
            warn!(drama_id = %id, error = %e, "Failed to load drama cast");
            Vec::new()
        });

        Ok(DramaDto::assemble(drama, genres, cast))
    }

    async fn create(&self, input: DramaInput, added_by: i32) -> Result<DramaDto, DramaError> {
        let id = match self.store.create_drama(&input, Some(added_by)).await {
            Ok(id) => id,
            Err(e) => {
                Self::record_write("create", "error");
                return Err(e.into());
            }
        };

        Self::record_write("create", "ok");
        info!(drama_id = %id, title = %input.title, "Drama created");

        self.get(id).await
    }

    async fn update(&self, id: DramaId, input: DramaInput) -> Result<DramaDto, DramaError> {
        if let Err(e) = self.store.update_drama(id, &input).await {
            Self::record_write("update", "error");
            return Err(e.into());
        }

        Self::record_write("update", "ok");
        info!(drama_id = %id, "Drama updated");

        self.get(id).await
    }

    async fn delete(&self, id: DramaId) -> Result<(), DramaError> {
        if !self.store.delete_drama(id).await? {
            return Err(DramaError::NotFound(id));
        }

        Self::record_write("delete", "ok");
        info!(drama_id = %id, "Drama deleted");
        Ok(())
    }
}
