use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;

use super::extract::ApiPath;
use super::validation::{validate_id, validate_length, validate_optional_url};
use super::{ActorDto, ApiError, ApiResponse, AppState, MessageResponse};
use crate::domain::{Page, Pagination};

/// Actor listings default to a larger page than dramas.
const ACTOR_PAGE_SIZE: u64 = 20;

#[derive(Debug, Default, Deserialize)]
pub struct ActorListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ActorRequest {
    pub name: String,
    pub photo_url: Option<String>,
}

pub async fn list_actors(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ActorListParams>,
) -> Result<Json<ApiResponse<Page<ActorDto>>>, ApiError> {
    let (_, max_limit) = state.page_limits().await;
    let window = Pagination::from_query(
        params.page.as_deref(),
        params.limit.as_deref(),
        ACTOR_PAGE_SIZE,
        max_limit,
    );

    let page = state
        .catalog_service()
        .list_actors(window, params.search.as_deref())
        .await?;
    Ok(Json(ApiResponse::success(page)))
}

pub async fn get_actor(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<ApiResponse<ActorDto>>, ApiError> {
    let id = validate_id("actor", id)?;
    let actor = state.catalog_service().get_actor(id).await?;
    Ok(Json(ApiResponse::success(actor)))
}

pub async fn create_actor(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ActorRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ActorDto>>), ApiError> {
    let name = validate_length("Name", &payload.name, 2, 100)?;
    let photo_url = validate_optional_url("Photo URL", payload.photo_url.as_deref())?;

    let actor = state.catalog_service().create_actor(name, photo_url).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(actor))))
}

pub async fn update_actor(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
    Json(payload): Json<ActorRequest>,
) -> Result<Json<ApiResponse<ActorDto>>, ApiError> {
    let id = validate_id("actor", id)?;
    let name = validate_length("Name", &payload.name, 2, 100)?;
    let photo_url = validate_optional_url("Photo URL", payload.photo_url.as_deref())?;

    let actor = state
        .catalog_service()
        .update_actor(id, name, photo_url)
        .await?;
    Ok(Json(ApiResponse::success(actor)))
}

pub async fn delete_actor(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = validate_id("actor", id)?;
    state.catalog_service().delete_actor(id).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new("Actor deleted"))))
}
