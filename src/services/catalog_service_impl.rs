//! `SeaORM` implementation of the `CatalogService` trait.

use crate::api::types::{ActorDto, EpisodeDto, GenreDto, SeasonDto};
use crate::db::{DbFailure, EpisodeInput, Store};
use crate::domain::{DramaId, Page, Pagination, slugify};
use crate::services::catalog_service::{CatalogError, CatalogService};
use async_trait::async_trait;
use tracing::info;

pub struct SeaOrmCatalogService {
    store: Store,
}

impl SeaOrmCatalogService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    fn genre_slug(name: &str, slug: Option<&str>) -> Result<String, CatalogError> {
        let source = slug.map(str::trim).filter(|s| !s.is_empty()).unwrap_or(name);
        let slug = slugify(source);
        if slug.is_empty() {
            return Err(CatalogError::Validation(
                "Genre slug must contain at least one letter or digit".to_string(),
            ));
        }
        Ok(slug)
    }

    async fn ensure_slug_free(&self, slug: &str, owner: Option<i32>) -> Result<(), CatalogError> {
        match self.store.get_genre_by_slug(slug).await? {
            Some(existing) if Some(existing.id) != owner => Err(CatalogError::Conflict(format!(
                "Genre slug '{slug}' is already in use"
            ))),
            _ => Ok(()),
        }
    }

    /// Turns a unique-index violation into a conflict carrying `message`.
    fn write_error(err: anyhow::Error, message: impl FnOnce() -> String) -> CatalogError {
        match DbFailure::of_anyhow(&err) {
            DbFailure::UniqueViolation => CatalogError::Conflict(message()),
            _ => CatalogError::from(err),
        }
    }
}

#[async_trait]
impl CatalogService for SeaOrmCatalogService {
    async fn list_genres(&self) -> Result<Vec<GenreDto>, CatalogError> {
        let genres = self.store.list_genres().await?;
        Ok(genres.into_iter().map(GenreDto::from).collect())
    }

    async fn create_genre(
        &self,
        name: &str,
        slug: Option<&str>,
    ) -> Result<GenreDto, CatalogError> {
        let slug = Self::genre_slug(name, slug)?;
        self.ensure_slug_free(&slug, None).await?;

        let genre = self
            .store
            .create_genre(name.trim(), &slug)
            .await
            .map_err(|e| Self::write_error(e, || format!("Genre slug '{slug}' is already in use")))?;

        info!(genre_id = genre.id, slug = %genre.slug, "Genre created");
        Ok(GenreDto::from(genre))
    }

    async fn update_genre(
        &self,
        id: i32,
        name: &str,
        slug: Option<&str>,
    ) -> Result<GenreDto, CatalogError> {
        let slug = Self::genre_slug(name, slug)?;
        self.ensure_slug_free(&slug, Some(id)).await?;

        self.store
            .update_genre(id, name.trim(), &slug)
            .await
            .map_err(|e| Self::write_error(e, || format!("Genre slug '{slug}' is already in use")))?
            .map(GenreDto::from)
            .ok_or_else(|| CatalogError::not_found("Genre", id))
    }

    async fn delete_genre(&self, id: i32) -> Result<(), CatalogError> {
        if !self.store.delete_genre(id).await? {
            return Err(CatalogError::not_found("Genre", id));
        }
        info!(genre_id = id, "Genre deleted");
        Ok(())
    }

    async fn list_actors(
        &self,
        window: Pagination,
        search: Option<&str>,
    ) -> Result<Page<ActorDto>, CatalogError> {
        let (actors, total) = self.store.list_actors(window, search).await?;
        Ok(Page::new(actors, total, window).map(ActorDto::from))
    }

    async fn get_actor(&self, id: i32) -> Result<ActorDto, CatalogError> {
        self.store
            .get_actor(id)
            .await?
            .map(ActorDto::from)
            .ok_or_else(|| CatalogError::not_found("Actor", id))
    }

    async fn create_actor(
        &self,
        name: &str,
        photo_url: Option<String>,
    ) -> Result<ActorDto, CatalogError> {
        let actor = self.store.create_actor(name.trim(), photo_url).await?;
        info!(actor_id = actor.id, "Actor created");
        Ok(ActorDto::from(actor))
    }

    async fn update_actor(
        &self,
        id: i32,
        name: &str,
        photo_url: Option<String>,
    ) -> Result<ActorDto, CatalogError> {
        self.store
            .update_actor(id, name.trim(), photo_url)
            .await?
            .map(ActorDto::from)
            .ok_or_else(|| CatalogError::not_found("Actor", id))
    }

    async fn delete_actor(&self, id: i32) -> Result<(), CatalogError> {
        if !self.store.delete_actor(id).await? {
            return Err(CatalogError::not_found("Actor", id));
        }
        info!(actor_id = id, "Actor deleted");
        Ok(())
    }

    async fn list_seasons(&self, drama_id: DramaId) -> Result<Vec<SeasonDto>, CatalogError> {
        if !self.store.drama_exists(drama_id).await? {
            return Err(CatalogError::not_found("Drama", drama_id));
        }

        let seasons = self.store.list_seasons(drama_id).await?;
        Ok(seasons.into_iter().map(SeasonDto::from).collect())
    }

    async fn get_season(&self, id: i32) -> Result<SeasonDto, CatalogError> {
        self.store
            .get_season(id)
            .await?
            .map(SeasonDto::from)
            .ok_or_else(|| CatalogError::not_found("Season", id))
    }

    async fn create_season(
        &self,
        drama_id: DramaId,
        season_number: i32,
        title: &str,
    ) -> Result<SeasonDto, CatalogError> {
        if !self.store.drama_exists(drama_id).await? {
            return Err(CatalogError::not_found("Drama", drama_id));
        }

        let season = self
            .store
            .create_season(drama_id, season_number, title.trim())
            .await
            .map_err(|e| {
                Self::write_error(e, || {
                    format!("Drama {drama_id} already has season {season_number}")
                })
            })?;

        info!(season_id = season.id, drama_id = %drama_id, "Season created");
        Ok(SeasonDto::from(season))
    }

    async fn update_season(
        &self,
        id: i32,
        season_number: i32,
        title: &str,
    ) -> Result<SeasonDto, CatalogError> {
        self.store
            .update_season(id, season_number, title.trim())
            .await
            .map_err(|e| {
                Self::write_error(e, || {
                    format!("Season number {season_number} is already taken")
                })
            })?
            .map(SeasonDto::from)
            .ok_or_else(|| CatalogError::not_found("Season", id))
    }

    async fn delete_season(&self, id: i32) -> Result<(), CatalogError> {
        if !self.store.delete_season(id).await? {
            return Err(CatalogError::not_found("Season", id));
        }
        info!(season_id = id, "Season deleted");
        Ok(())
    }

    async fn list_episodes(&self, season_id: i32) -> Result<Vec<EpisodeDto>, CatalogError> {
        if self.store.get_season(season_id).await?.is_none() {
            return Err(CatalogError::not_found("Season", season_id));
        }

        let episodes = self.store.list_episodes(season_id).await?;
        Ok(episodes.into_iter().map(EpisodeDto::from).collect())
    }

    async fn get_episode(&self, id: i32) -> Result<EpisodeDto, CatalogError> {
        self.store
            .get_episode(id)
            .await?
            .map(EpisodeDto::from)
            .ok_or_else(|| CatalogError::not_found("Episode", id))
    }

    async fn create_episode(
        &self,
        season_id: i32,
        input: EpisodeInput,
        added_by: i32,
    ) -> Result<EpisodeDto, CatalogError> {
        if self.store.get_season(season_id).await?.is_none() {
            return Err(CatalogError::not_found("Season", season_id));
        }

        let number = input.episode_number;
        let episode = self
            .store
            .create_episode(season_id, input, Some(added_by))
            .await
            .map_err(|e| {
                Self::write_error(e, || {
                    format!("Season {season_id} already has episode {number}")
                })
            })?;

        info!(episode_id = episode.id, season_id, "Episode created");
        Ok(EpisodeDto::from(episode))
    }

    async fn update_episode(
        &self,
        id: i32,
        input: EpisodeInput,
    ) -> Result<EpisodeDto, CatalogError> {
        let number = input.episode_number;
        self.store
            .update_episode(id, input)
            .await
            .map_err(|e| {
                Self::write_error(e, || format!("Episode number {number} is already taken"))
            })?
            .map(EpisodeDto::from)
            .ok_or_else(|| CatalogError::not_found("Episode", id))
    }

    async fn delete_episode(&self, id: i32) -> Result<(), CatalogError> {
        if !self.store.delete_episode(id).await? {
            return Err(CatalogError::not_found("Episode", id));
        }
        info!(episode_id = id, "Episode deleted");
        Ok(())
    }
}
