use axum::{
    Extension, Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;

use super::extract::ApiPath;
use super::auth::CurrentUser;
use super::validation::{validate_id, validate_length};
use super::{ApiError, ApiResponse, AppState, CommentDto, MessageResponse, PageQuery};
use crate::domain::Page;

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub episode_id: i32,
    pub comment_text: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCommentRequest {
    pub comment_text: String,
}

/// `GET /api/episodes/{id}/comments`
pub async fn list_comments(
    State(state): State<Arc<AppState>>,
    ApiPath(episode_id): ApiPath<i32>,
    Query(params): Query<PageQuery>,
) -> Result<Json<ApiResponse<Page<CommentDto>>>, ApiError> {
    let episode_id = validate_id("episode", episode_id)?;
    let window = state.pagination(&params).await;
    let page = state
        .engagement_service()
        .list_comments(episode_id, window)
        .await?;
    Ok(Json(ApiResponse::success(page)))
}

pub async fn create_comment(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CommentDto>>), ApiError> {
    let episode_id = validate_id("episode", payload.episode_id)?;
    let text = validate_length("Comment", &payload.comment_text, 1, 1000)?;

    let comment = state
        .engagement_service()
        .create_comment(user.id, episode_id, text)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(comment))))
}

pub async fn update_comment(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    ApiPath(id): ApiPath<i32>,
    Json(payload): Json<UpdateCommentRequest>,
) -> Result<Json<ApiResponse<CommentDto>>, ApiError> {
    let id = validate_id("comment", id)?;
    let text = validate_length("Comment", &payload.comment_text, 1, 1000)?;

    let comment = state
        .engagement_service()
        .update_comment(user.id, id, text)
        .await?;
    Ok(Json(ApiResponse::success(comment)))
}

pub async fn delete_comment(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = validate_id("comment", id)?;
    state
        .engagement_service()
        .delete_comment(user.id, id, user.is_admin())
        .await?;
    Ok(Json(ApiResponse::success(MessageResponse::new("Comment deleted"))))
}
