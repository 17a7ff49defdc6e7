//! Drama catalog endpoints.
//!
//! Listing and detail reads are public. Writes are admin-only and always
//! submit the complete genre and cast sets, which replace whatever the drama
//! had before.

use axum::{
    Extension, Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;

use super::extract::ApiPath;
use super::auth::CurrentUser;
use super::validation::{validate_id, validate_min, validate_optional_url, validate_title, validate_year};
use super::{ApiError, ApiResponse, AppState, DramaDto, DramaSummaryDto, MessageResponse};
use crate::db::{DramaFilter, DramaInput, DramaListQuery, GenreRef};
use crate::domain::{ActorRole, DramaId, DramaSort, DramaStatus, Page, Pagination};
use crate::services::DramaError;

impl From<DramaError> for ApiError {
    fn from(err: DramaError) -> Self {
        match err {
            DramaError::NotFound(id) => Self::not_found("Drama", id),
            DramaError::MissingGenre(id) => Self::Conflict(format!("Genre {id} does not exist")),
            DramaError::MissingActor(id) => Self::Conflict(format!("Actor {id} does not exist")),
            DramaError::Unavailable(msg) => Self::Unavailable(msg),
            DramaError::Database(msg) => Self::DatabaseError(msg),
        }
    }
}

/// Query string of `GET /dramas`. Values stay raw strings so malformed
/// numbers fall back to defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct DramaListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub q: Option<String>,
    pub genre: Option<String>,
    pub status: Option<String>,
    pub sort: Option<String>,
}

impl DramaListParams {
    /// # Errors
    ///
    /// Returns a validation error for a `status` outside the known set.
    pub fn into_query(self, default_limit: u64, max_limit: u64) -> Result<DramaListQuery, ApiError> {
        let status = self
            .status
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse::<DramaStatus>)
            .transpose()
            .map_err(|e| ApiError::validation(e.to_string()))?;

        Ok(DramaListQuery {
            filter: DramaFilter {
                q: self.q,
                genre: self.genre.as_deref().and_then(GenreRef::parse),
                status,
            },
            sort: DramaSort::from_key(self.sort.as_deref()),
            window: Pagination::from_query(
                self.page.as_deref(),
                self.limit.as_deref(),
                default_limit,
                max_limit,
            ),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CastRequest {
    pub actor_id: i32,
    pub role: String,
}

/// Body of `POST /dramas` and `PUT /dramas/{id}`.
#[derive(Debug, Deserialize)]
pub struct DramaRequest {
    pub title: String,
    pub synopsis: Option<String>,
    pub poster_url: Option<String>,
    pub year: i32,
    pub total_seasons: Option<i32>,
    pub status: String,
    pub source_url: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<i32>,
    #[serde(default)]
    pub actors: Vec<CastRequest>,
}

impl DramaRequest {
    /// # Errors
    ///
    /// Returns a validation error describing the first invalid field.
    pub fn into_input(self) -> Result<DramaInput, ApiError> {
        let title = validate_title(&self.title)?.to_string();
        let year = validate_year(self.year)?;
        let total_seasons = validate_min("Total seasons", self.total_seasons.unwrap_or(1), 1)?;
        let status = self
            .status
            .trim()
            .parse::<DramaStatus>()
            .map_err(|e| ApiError::validation(e.to_string()))?;
        let poster_url = validate_optional_url("Poster URL", self.poster_url.as_deref())?;
        let source_url = validate_optional_url("Source URL", self.source_url.as_deref())?;

        if self.genre_ids.is_empty() {
            return Err(ApiError::validation("At least one genre is required"));
        }
        for id in &self.genre_ids {
            validate_id("genre", *id)?;
        }

        let actors = self
            .actors
            .into_iter()
            .map(|cast| {
                let actor_id = validate_id("actor", cast.actor_id)?;
                let role = cast
                    .role
                    .trim()
                    .parse::<ActorRole>()
                    .map_err(|e| ApiError::validation(e.to_string()))?;
                Ok((actor_id, role))
            })
            .collect::<Result<Vec<_>, ApiError>>()?;

        let synopsis = self
            .synopsis
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(DramaInput {
            title,
            synopsis,
            poster_url,
            year,
            total_seasons,
            status,
            source_url,
            genre_ids: self.genre_ids,
            actors,
        })
    }
}

/// Lists dramas.
///
/// # Endpoint
/// `GET /api/dramas?page=&limit=&q=&genre=&status=&sort=`
///
/// `genre` accepts a numeric id or a slug. `sort` is one of `popular`,
/// `rating`, `oldest` or `latest`; anything else means `latest`.
///
/// # Response
/// A page of [`DramaSummaryDto`] whose `total` counts the whole filtered set.
pub async fn list_dramas(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DramaListParams>,
) -> Result<Json<ApiResponse<Page<DramaSummaryDto>>>, ApiError> {
    let (default_limit, max_limit) = state.page_limits().await;
    let query = params.into_query(default_limit, max_limit)?;

    let page = state.drama_service().list(query).await?;
    Ok(Json(ApiResponse::success(page)))
}

/// Returns one drama with its genres and cast.
///
/// # Endpoint
/// `GET /api/dramas/{id}`
///
/// # Errors
/// - [`ApiError::NotFound`] if the drama does not exist
pub async fn get_drama(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<ApiResponse<DramaDto>>, ApiError> {
    let id = DramaId::new(validate_id("drama", id)?);
    let drama = state.drama_service().get(id).await?;
    Ok(Json(ApiResponse::success(drama)))
}

/// Creates a drama together with its genres and cast.
///
/// # Endpoint
/// `POST /api/dramas` (admin)
///
/// # Errors
/// - [`ApiError::ValidationError`] for malformed input
/// - [`ApiError::Conflict`] if a genre or actor id does not exist; nothing is stored
pub async fn create_drama(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<DramaRequest>,
) -> Result<(StatusCode, Json<ApiResponse<DramaDto>>), ApiError> {
    let input = payload.into_input()?;
    let drama = state.drama_service().create(input, user.id).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(drama))))
}

/// Replaces a drama's fields, genres and cast.
///
/// # Endpoint
/// `PUT /api/dramas/{id}` (admin)
///
/// # Errors
/// - [`ApiError::NotFound`] if the drama does not exist
/// - [`ApiError::Conflict`] if a genre or actor id does not exist; the drama is left unchanged
pub async fn update_drama(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
    Json(payload): Json<DramaRequest>,
) -> Result<Json<ApiResponse<DramaDto>>, ApiError> {
    let id = DramaId::new(validate_id("drama", id)?);
    let input = payload.into_input()?;
    let drama = state.drama_service().update(id, input).await?;
    Ok(Json(ApiResponse::success(drama)))
}

/// `DELETE /api/dramas/{id}` (admin)
pub async fn delete_drama(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = DramaId::new(validate_id("drama", id)?);
    state.drama_service().delete(id).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new("Drama deleted"))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> DramaRequest {
        DramaRequest {
            title: "Goblin".to_string(),
            synopsis: Some("  ".to_string()),
            poster_url: None,
            year: 2016,
            total_seasons: None,
            status: "ongoing".to_string(),
            source_url: Some(String::new()),
            genre_ids: vec![1],
            actors: vec![CastRequest {
                actor_id: 2,
                role: "main".to_string(),
            }],
        }
    }

    #[test]
    fn test_into_input_defaults() {
        let input = request().into_input().unwrap();
        assert_eq!(input.total_seasons, 1);
        assert_eq!(input.synopsis, None);
        assert_eq!(input.source_url, None);
        assert_eq!(input.actors, vec![(2, ActorRole::Main)]);
    }

    #[test]
    fn test_into_input_rejects_bad_fields() {
        let mut req = request();
        req.genre_ids.clear();
        assert!(req.into_input().is_err());

        let mut req = request();
        req.status = "airing".to_string();
        assert!(req.into_input().is_err());

        let mut req = request();
        req.actors[0].role = "cameo".to_string();
        assert!(req.into_input().is_err());

        let mut req = request();
        req.year = 1800;
        assert!(req.into_input().is_err());

        let mut req = request();
        req.poster_url = Some("not a url".to_string());
        assert!(req.into_input().is_err());
    }

    #[test]
    fn test_list_params_lenient_paging() {
        let params = DramaListParams {
            page: Some("abc".to_string()),
            limit: Some("0".to_string()),
            sort: Some("weird".to_string()),
            genre: Some("fantasy".to_string()),
            ..Default::default()
        };
        let query = params.into_query(10, 100).unwrap();
        assert_eq!(query.window.page(), 1);
        assert_eq!(query.window.limit(), 10);
        assert_eq!(query.sort, DramaSort::Latest);
        assert_eq!(query.filter.genre, Some(GenreRef::Slug("fantasy".to_string())));
    }

    #[test]
    fn test_list_params_limit_capped_and_status_checked() {
        let params = DramaListParams {
            limit: Some("500".to_string()),
            status: Some("completed".to_string()),
            ..Default::default()
        };
        let query = params.into_query(10, 100).unwrap();
        assert_eq!(query.window.limit(), 100);
        assert_eq!(query.filter.status, Some(DramaStatus::Completed));

        let params = DramaListParams {
            status: Some("paused".to_string()),
            ..Default::default()
        };
        assert!(params.into_query(10, 100).is_err());
    }
}
