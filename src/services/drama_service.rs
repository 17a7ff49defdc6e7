//! Domain service for the drama catalog.
//!
//! Listing goes through [`DramaListQuery`], single fetches return the drama
//! with its genres and cast attached, and writes replace both association
//! sets atomically.

use thiserror::Error;

use crate::api::types::{DramaDto, DramaSummaryDto};
use crate::db::{DbFailure, DramaInput, DramaListQuery, DramaWriteError};
use crate::domain::{DramaId, Page};

/// Errors specific to drama operations.
#[derive(Debug, Error)]
pub enum DramaError {
    #[error("Drama {0} not found")]
    NotFound(DramaId),

    #[error("Genre {0} does not exist")]
    MissingGenre(i32),

    #[error("Actor {0} does not exist")]
    MissingActor(i32),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for DramaError {
    fn from(err: sea_orm::DbErr) -> Self {
        match DbFailure::of(&err) {
            DbFailure::Unavailable => Self::Unavailable(err.to_string()),
            _ => Self::Database(err.to_string()),
        }
    }
}

impl From<anyhow::Error> for DramaError {
    fn from(err: anyhow::Error) -> Self {
        match DbFailure::of_anyhow(&err) {
            DbFailure::Unavailable => Self::Unavailable(format!("{err:#}")),
            _ => Self::Database(format!("{err:#}")),
        }
    }
}

impl From<DramaWriteError> for DramaError {
    fn from(err: DramaWriteError) -> Self {
        match err {
            DramaWriteError::NotFound(id) => Self::NotFound(id),
            DramaWriteError::MissingGenre(id) => Self::MissingGenre(id),
            DramaWriteError::MissingActor(id) => Self::MissingActor(id),
            DramaWriteError::Database(e) => Self::from(e),
        }
    }
}

/// Domain service trait for dramas.
#[async_trait::async_trait]
pub trait DramaService: Send + Sync {
    /// Returns one page of dramas plus the total of the filtered set.
    ///
    /// # Errors
    ///
    /// Returns an error if either the count or the page query fails.
    async fn list(&self, query: DramaListQuery) -> Result<Page<DramaSummaryDto>, DramaError>;

    /// Returns the drama with its genres and cast.
    ///
    /// # Errors
    ///
    /// Returns [`DramaError::NotFound`] if the drama does not exist. Failing
    /// association reads do not fail the call.
    async fn get(&self, id: DramaId) -> Result<DramaDto, DramaError>;

    /// Creates a drama with its associations and returns the stored aggregate.
    ///
    /// # Errors
    ///
    /// Returns [`DramaError::MissingGenre`] or [`DramaError::MissingActor`]
    /// when an association names an unknown row; nothing is persisted then.
    async fn create(&self, input: DramaInput, added_by: i32) -> Result<DramaDto, DramaError>;

    /// Replaces scalars and both association sets of an existing drama.
    ///
    /// # Errors
    ///
    /// Returns [`DramaError::NotFound`] if the drama does not exist.
    async fn update(&self, id: DramaId, input: DramaInput) -> Result<DramaDto, DramaError>;

    /// Deletes a drama; association rows cascade.
    ///
    /// # Errors
    ///
    /// Returns [`DramaError::NotFound`] if the drama does not exist.
    async fn delete(&self, id: DramaId) -> Result<(), DramaError>;
}
