use axum::{
    Extension, Json,
    extract::{Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::extract::ApiPath;
use super::auth::CurrentUser;
use super::validation::validate_id;
use super::{
    ApiError, ApiResponse, AppState, MessageResponse, PageQuery, WatchlistItemDto,
    WatchlistStatusDto,
};
use crate::domain::{DramaId, Page};

#[derive(Debug, Deserialize)]
pub struct AddToWatchlistRequest {
    pub drama_id: i32,
}

pub async fn list_watchlist(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<PageQuery>,
) -> Result<Json<ApiResponse<Page<WatchlistItemDto>>>, ApiError> {
    let window = state.pagination(&params).await;
    let page = state
        .engagement_service()
        .list_watchlist(user.id, window)
        .await?;
    Ok(Json(ApiResponse::success(page)))
}

pub async fn add_to_watchlist(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<AddToWatchlistRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let drama_id = DramaId::new(validate_id("drama", payload.drama_id)?);
    state
        .engagement_service()
        .add_to_watchlist(user.id, drama_id)
        .await?;
    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Added to watchlist",
    ))))
}

pub async fn remove_from_watchlist(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    ApiPath(drama_id): ApiPath<i32>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let drama_id = DramaId::new(validate_id("drama", drama_id)?);
    state
        .engagement_service()
        .remove_from_watchlist(user.id, drama_id)
        .await?;
    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Removed from watchlist",
    ))))
}

pub async fn check_watchlist(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    ApiPath(drama_id): ApiPath<i32>,
) -> Result<Json<ApiResponse<WatchlistStatusDto>>, ApiError> {
    let drama_id = DramaId::new(validate_id("drama", drama_id)?);
    let is_watchlisted = state
        .engagement_service()
        .is_watchlisted(user.id, drama_id)
        .await?;
    Ok(Json(ApiResponse::success(WatchlistStatusDto { is_watchlisted })))
}
