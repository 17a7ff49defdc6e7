//! Domain service for the reference data around dramas: genres, actors,
//! seasons and episodes.

use thiserror::Error;

use crate::api::types::{ActorDto, EpisodeDto, GenreDto, SeasonDto};
use crate::db::{DbFailure, EpisodeInput};
use crate::domain::{DramaId, Page, Pagination};

/// Errors specific to catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl CatalogError {
    pub(crate) fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("{resource} {id}"))
    }
}

impl From<sea_orm::DbErr> for CatalogError {
    fn from(err: sea_orm::DbErr) -> Self {
        match DbFailure::of(&err) {
            DbFailure::Unavailable => Self::Unavailable(err.to_string()),
            _ => Self::Database(err.to_string()),
        }
    }
}

impl From<anyhow::Error> for CatalogError {
    fn from(err: anyhow::Error) -> Self {
        match DbFailure::of_anyhow(&err) {
            DbFailure::Unavailable => Self::Unavailable(format!("{err:#}")),
            _ => Self::Database(format!("{err:#}")),
        }
    }
}

/// Domain service trait for catalog reference data.
#[async_trait::async_trait]
pub trait CatalogService: Send + Sync {
    // Genres

    /// All genres ordered by name.
    async fn list_genres(&self) -> Result<Vec<GenreDto>, CatalogError>;

    /// Creates a genre. The slug is derived from `slug` when given, else
    /// from `name`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] if the normalized slug is empty
    /// and [`CatalogError::Conflict`] if another genre already uses it.
    async fn create_genre(&self, name: &str, slug: Option<&str>)
    -> Result<GenreDto, CatalogError>;

    async fn update_genre(
        &self,
        id: i32,
        name: &str,
        slug: Option<&str>,
    ) -> Result<GenreDto, CatalogError>;

    async fn delete_genre(&self, id: i32) -> Result<(), CatalogError>;

    // Actors

    /// Actors ordered by name, optionally narrowed by a name search.
    async fn list_actors(
        &self,
        window: Pagination,
        search: Option<&str>,
    ) -> Result<Page<ActorDto>, CatalogError>;

    async fn get_actor(&self, id: i32) -> Result<ActorDto, CatalogError>;

    async fn create_actor(
        &self,
        name: &str,
        photo_url: Option<String>,
    ) -> Result<ActorDto, CatalogError>;

    async fn update_actor(
        &self,
        id: i32,
        name: &str,
        photo_url: Option<String>,
    ) -> Result<ActorDto, CatalogError>;

    async fn delete_actor(&self, id: i32) -> Result<(), CatalogError>;

    // Seasons

    /// Seasons of a drama by number.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if the drama does not exist.
    async fn list_seasons(&self, drama_id: DramaId) -> Result<Vec<SeasonDto>, CatalogError>;

    async fn get_season(&self, id: i32) -> Result<SeasonDto, CatalogError>;

    /// # Errors
    ///
    /// Returns [`CatalogError::Conflict`] if the drama already has a season
    /// with this number.
    async fn create_season(
        &self,
        drama_id: DramaId,
        season_number: i32,
        title: &str,
    ) -> Result<SeasonDto, CatalogError>;

    async fn update_season(
        &self,
        id: i32,
        season_number: i32,
        title: &str,
    ) -> Result<SeasonDto, CatalogError>;

    async fn delete_season(&self, id: i32) -> Result<(), CatalogError>;

    // Episodes

    async fn list_episodes(&self, season_id: i32) -> Result<Vec<EpisodeDto>, CatalogError>;

    async fn get_episode(&self, id: i32) -> Result<EpisodeDto, CatalogError>;

    /// # Errors
    ///
    /// Returns [`CatalogError::Conflict`] if the season already has an
    /// episode with this number.
    async fn create_episode(
        &self,
        season_id: i32,
        input: EpisodeInput,
        added_by: i32,
    ) -> Result<EpisodeDto, CatalogError>;

    async fn update_episode(
        &self,
        id: i32,
        input: EpisodeInput,
    ) -> Result<EpisodeDto, CatalogError>;

    async fn delete_episode(&self, id: i32) -> Result<(), CatalogError>;
}
