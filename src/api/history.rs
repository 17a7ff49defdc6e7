use axum::{
    Extension, Json,
    extract::{Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::extract::ApiPath;
use super::auth::CurrentUser;
use super::validation::{validate_id, validate_min};
use super::{ApiError, ApiResponse, AppState, HistoryItemDto, PageQuery, WatchProgressDto};
use crate::domain::Page;
use crate::services::EngagementError;

impl From<EngagementError> for ApiError {
    fn from(err: EngagementError) -> Self {
        match err {
            EngagementError::NotFound(what) => Self::NotFound(format!("{what} not found")),
            EngagementError::Forbidden(msg) => Self::Forbidden(msg),
            EngagementError::Conflict(msg) => Self::Conflict(msg),
            EngagementError::Unavailable(msg) => Self::Unavailable(msg),
            EngagementError::Database(msg) => Self::DatabaseError(msg),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RecordProgressRequest {
    pub episode_id: i32,
    pub progress_seconds: i32,
    #[serde(default)]
    pub completed: bool,
}

/// `POST /api/history`
/// Saves how far the caller got in an episode. The first save for an
/// episode counts as a view.
pub async fn record_progress(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<RecordProgressRequest>,
) -> Result<Json<ApiResponse<WatchProgressDto>>, ApiError> {
    let episode_id = validate_id("episode", payload.episode_id)?;
    let progress = validate_min("Progress", payload.progress_seconds, 0)?;

    let row = state
        .engagement_service()
        .record_progress(user.id, episode_id, progress, payload.completed)
        .await?;
    Ok(Json(ApiResponse::success(row)))
}

/// `GET /api/history`
pub async fn list_history(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<PageQuery>,
) -> Result<Json<ApiResponse<Page<HistoryItemDto>>>, ApiError> {
    let window = state.pagination(&params).await;
    let page = state
        .engagement_service()
        .list_history(user.id, window)
        .await?;
    Ok(Json(ApiResponse::success(page)))
}

/// `GET /api/history/{episode_id}`; `data` is `null` when nothing was saved.
pub async fn get_progress(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    ApiPath(episode_id): ApiPath<i32>,
) -> Result<Json<ApiResponse<Option<WatchProgressDto>>>, ApiError> {
    let episode_id = validate_id("episode", episode_id)?;
    let progress = state
        .engagement_service()
        .get_progress(user.id, episode_id)
        .await?;
    Ok(Json(ApiResponse::success(progress)))
}
