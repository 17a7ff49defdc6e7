use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;

use super::extract::ApiPath;
use super::auth::CurrentUser;
use super::validation::{validate_id, validate_length, validate_min, validate_optional_url, validate_url};
use super::{ApiError, ApiResponse, AppState, EpisodeDto, MessageResponse};
use crate::db::EpisodeInput;

#[derive(Debug, Deserialize)]
pub struct EpisodeRequest {
    /// Required on create, ignored on update.
    pub season_id: Option<i32>,
    pub episode_number: i32,
    pub title: String,
    pub video_url: String,
    /// Seconds.
    pub duration: i32,
    pub thumbnail_url: Option<String>,
    pub source_url: Option<String>,
}

impl EpisodeRequest {
    fn into_input(self) -> Result<EpisodeInput, ApiError> {
        Ok(EpisodeInput {
            episode_number: validate_min("Episode number", self.episode_number, 1)?,
            title: validate_length("Title", &self.title, 1, 255)?.to_string(),
            video_url: validate_url("Video URL", &self.video_url)?,
            duration: validate_min("Duration", self.duration, 1)?,
            thumbnail_url: validate_optional_url("Thumbnail URL", self.thumbnail_url.as_deref())?,
            source_url: validate_optional_url("Source URL", self.source_url.as_deref())?,
        })
    }
}

/// `GET /api/seasons/{id}/episodes`
pub async fn list_episodes(
    State(state): State<Arc<AppState>>,
    ApiPath(season_id): ApiPath<i32>,
) -> Result<Json<ApiResponse<Vec<EpisodeDto>>>, ApiError> {
    let season_id = validate_id("season", season_id)?;
    let episodes = state.catalog_service().list_episodes(season_id).await?;
    Ok(Json(ApiResponse::success(episodes)))
}

pub async fn get_episode(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<ApiResponse<EpisodeDto>>, ApiError> {
    let id = validate_id("episode", id)?;
    let episode = state.catalog_service().get_episode(id).await?;
    Ok(Json(ApiResponse::success(episode)))
}

pub async fn create_episode(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<EpisodeRequest>,
) -> Result<(StatusCode, Json<ApiResponse<EpisodeDto>>), ApiError> {
    let season_id = payload
        .season_id
        .ok_or_else(|| ApiError::validation("season_id is required"))
        .and_then(|id| validate_id("season", id))?;
    let input = payload.into_input()?;

    let episode = state
        .catalog_service()
        .create_episode(season_id, input, user.id)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(episode))))
}

pub async fn update_episode(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
    Json(payload): Json<EpisodeRequest>,
) -> Result<Json<ApiResponse<EpisodeDto>>, ApiError> {
    let id = validate_id("episode", id)?;
    let input = payload.into_input()?;

    let episode = state.catalog_service().update_episode(id, input).await?;
    Ok(Json(ApiResponse::success(episode)))
}

pub async fn delete_episode(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = validate_id("episode", id)?;
    state.catalog_service().delete_episode(id).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new("Episode deleted"))))
}
