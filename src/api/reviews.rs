use axum::{
    Extension, Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;

use super::extract::ApiPath;
use super::auth::CurrentUser;
use super::validation::{validate_id, validate_length, validate_rating};
use super::{ApiError, ApiResponse, AppState, MessageResponse, PageQuery, ReviewDto};
use crate::domain::{DramaId, Page};

#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub drama_id: i32,
    pub rating: i32,
    #[serde(default)]
    pub review_text: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateReviewRequest {
    pub rating: i32,
    #[serde(default)]
    pub review_text: String,
}

/// `GET /api/dramas/{id}/reviews`
pub async fn list_reviews(
    State(state): State<Arc<AppState>>,
    ApiPath(drama_id): ApiPath<i32>,
    Query(params): Query<PageQuery>,
) -> Result<Json<ApiResponse<Page<ReviewDto>>>, ApiError> {
    let drama_id = DramaId::new(validate_id("drama", drama_id)?);
    let window = state.pagination(&params).await;
    let page = state
        .engagement_service()
        .list_reviews(drama_id, window)
        .await?;
    Ok(Json(ApiResponse::success(page)))
}

/// `POST /api/reviews`
/// One review per user and drama; the drama's rating is recomputed.
pub async fn create_review(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ReviewDto>>), ApiError> {
    let drama_id = DramaId::new(validate_id("drama", payload.drama_id)?);
    let rating = validate_rating(payload.rating)?;
    let text = validate_length("Review text", &payload.review_text, 0, 1000)?;

    let review = state
        .engagement_service()
        .create_review(user.id, drama_id, rating, text)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(review))))
}

pub async fn update_review(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    ApiPath(id): ApiPath<i32>,
    Json(payload): Json<UpdateReviewRequest>,
) -> Result<Json<ApiResponse<ReviewDto>>, ApiError> {
    let id = validate_id("review", id)?;
    let rating = validate_rating(payload.rating)?;
    let text = validate_length("Review text", &payload.review_text, 0, 1000)?;

    let review = state
        .engagement_service()
        .update_review(user.id, id, rating, text)
        .await?;
    Ok(Json(ApiResponse::success(review)))
}

pub async fn delete_review(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = validate_id("review", id)?;
    state
        .engagement_service()
        .delete_review(user.id, id, user.is_admin())
        .await?;
    Ok(Json(ApiResponse::success(MessageResponse::new("Review deleted"))))
}
