use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;

use super::extract::ApiPath;
use super::validation::{validate_id, validate_length};
use super::{ApiError, ApiResponse, AppState, GenreDto, MessageResponse};
use crate::services::CatalogError;

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(what) => Self::NotFound(format!("{what} not found")),
            CatalogError::Validation(msg) => Self::validation(msg),
            CatalogError::Conflict(msg) => Self::Conflict(msg),
            CatalogError::Unavailable(msg) => Self::Unavailable(msg),
            CatalogError::Database(msg) => Self::DatabaseError(msg),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GenreRequest {
    pub name: String,
    /// Derived from `name` when absent.
    pub slug: Option<String>,
}

pub async fn list_genres(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<GenreDto>>>, ApiError> {
    let genres = state.catalog_service().list_genres().await?;
    Ok(Json(ApiResponse::success(genres)))
}

pub async fn create_genre(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<GenreRequest>,
) -> Result<(StatusCode, Json<ApiResponse<GenreDto>>), ApiError> {
    let name = validate_length("Name", &payload.name, 2, 50)?;
    let genre = state
        .catalog_service()
        .create_genre(name, payload.slug.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(genre))))
}

pub async fn update_genre(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
    Json(payload): Json<GenreRequest>,
) -> Result<Json<ApiResponse<GenreDto>>, ApiError> {
    let id = validate_id("genre", id)?;
    let name = validate_length("Name", &payload.name, 2, 50)?;
    let genre = state
        .catalog_service()
        .update_genre(id, name, payload.slug.as_deref())
        .await?;
    Ok(Json(ApiResponse::success(genre)))
}

pub async fn delete_genre(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = validate_id("genre", id)?;
    state.catalog_service().delete_genre(id).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new("Genre deleted"))))
}
