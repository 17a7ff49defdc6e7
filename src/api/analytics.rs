//! Admin dashboard and user management.

use axum::{
    Extension, Json,
    extract::{Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::extract::ApiPath;
use super::auth::CurrentUser;
use super::validation::validate_id;
use super::{ApiError, ApiResponse, AppState, DashboardDto, MessageResponse, PageQuery, UserDto};
use crate::domain::{Page, UserRole};
use crate::services::AnalyticsError;

impl From<AnalyticsError> for ApiError {
    fn from(err: AnalyticsError) -> Self {
        match err {
            AnalyticsError::Unavailable(msg) => Self::Unavailable(msg),
            AnalyticsError::Database(msg) => Self::DatabaseError(msg),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SetRoleRequest {
    pub role: String,
}

/// `GET /api/analytics/dashboard`
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<DashboardDto>>, ApiError> {
    let stats = state.analytics_service().dashboard().await?;
    Ok(Json(ApiResponse::success(stats)))
}

/// `GET /api/analytics/users`, newest accounts first.
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageQuery>,
) -> Result<Json<ApiResponse<Page<UserDto>>>, ApiError> {
    let window = state.pagination(&params).await;
    let page = state.auth_service().list_users(window).await?;
    Ok(Json(ApiResponse::success(page)))
}

/// `PATCH /api/analytics/users/{id}/role`
pub async fn set_user_role(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
    Json(payload): Json<SetRoleRequest>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let id = validate_id("user", id)?;
    let role = payload
        .role
        .trim()
        .parse::<UserRole>()
        .map_err(|e| ApiError::validation(e.to_string()))?;

    let user = state.auth_service().set_role(id, role).await?;
    Ok(Json(ApiResponse::success(user)))
}

/// `DELETE /api/analytics/users/{id}`. Admins cannot delete themselves.
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<CurrentUser>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = validate_id("user", id)?;
    if id == caller.id {
        return Err(ApiError::validation("You cannot delete your own account"));
    }

    state.auth_service().delete_user(id).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new("User deleted"))))
}
