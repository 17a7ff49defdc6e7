use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;

use super::extract::ApiPath;
use super::validation::{validate_id, validate_length, validate_min};
use super::{ApiError, ApiResponse, AppState, MessageResponse, SeasonDto};
use crate::domain::DramaId;

#[derive(Debug, Deserialize)]
pub struct CreateSeasonRequest {
    pub drama_id: i32,
    pub season_number: i32,
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSeasonRequest {
    pub season_number: i32,
    pub title: String,
}

/// `GET /api/dramas/{id}/seasons`
pub async fn list_seasons(
    State(state): State<Arc<AppState>>,
    ApiPath(drama_id): ApiPath<i32>,
) -> Result<Json<ApiResponse<Vec<SeasonDto>>>, ApiError> {
    let drama_id = DramaId::new(validate_id("drama", drama_id)?);
    let seasons = state.catalog_service().list_seasons(drama_id).await?;
    Ok(Json(ApiResponse::success(seasons)))
}

pub async fn get_season(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<ApiResponse<SeasonDto>>, ApiError> {
    let id = validate_id("season", id)?;
    let season = state.catalog_service().get_season(id).await?;
    Ok(Json(ApiResponse::success(season)))
}

pub async fn create_season(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateSeasonRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SeasonDto>>), ApiError> {
    let drama_id = DramaId::new(validate_id("drama", payload.drama_id)?);
    let number = validate_min("Season number", payload.season_number, 1)?;
    let title = validate_length("Title", &payload.title, 1, 255)?;

    let season = state
        .catalog_service()
        .create_season(drama_id, number, title)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(season))))
}

pub async fn update_season(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
    Json(payload): Json<UpdateSeasonRequest>,
) -> Result<Json<ApiResponse<SeasonDto>>, ApiError> {
    let id = validate_id("season", id)?;
    let number = validate_min("Season number", payload.season_number, 1)?;
    let title = validate_length("Title", &payload.title, 1, 255)?;

    let season = state
        .catalog_service()
        .update_season(id, number, title)
        .await?;
    Ok(Json(ApiResponse::success(season)))
}

pub async fn delete_season(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = validate_id("season", id)?;
    state.catalog_service().delete_season(id).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new("Season deleted"))))
}
