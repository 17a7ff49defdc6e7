use axum::{
    Extension, Json,
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_sessions::Session;

use super::validation::{validate_email, validate_length, validate_optional_url};
use super::{ApiError, ApiResponse, AppState, AuthTokenDto, MessageResponse, UserDto};
use crate::domain::UserRole;
use crate::services::AuthError;

const SESSION_USER_KEY: &str = "user_id";

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => Self::Unauthorized("Invalid credentials".to_string()),
            AuthError::UserNotFound(id) => Self::not_found("User", id),
            AuthError::EmailTaken => Self::Conflict("Email is already registered".to_string()),
            AuthError::Validation(msg) => Self::validation(msg),
            AuthError::Unavailable(msg) => Self::Unavailable(msg),
            AuthError::Database(msg) => Self::DatabaseError(msg),
        }
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub name: String,
    pub avatar_url: Option<String>,
}

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// The authenticated caller, placed in request extensions by
/// [`auth_middleware`].
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i32,
    pub email: String,
    pub role: UserRole,
}

impl CurrentUser {
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl From<&UserDto> for CurrentUser {
    fn from(user: &UserDto) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            role: user.role,
        }
    }
}

// ============================================================================
// Middleware
// ============================================================================

/// Authentication middleware that checks:
/// 1. Session cookie (from login)
/// 2. `X-Api-Key` header
/// 3. `Authorization: Bearer <token>` header
///
/// The resolved account is stored as a [`CurrentUser`] extension.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = match resolve_session_user(&state, &session).await? {
        Some(user) => Some(user),
        None => match extract_api_key(&headers) {
            Some(key) => state.auth_service().verify_api_key(&key).await?,
            None => None,
        },
    };

    let Some(user) = user else {
        return Err(ApiError::Unauthorized("Authentication required".to_string()));
    };

    tracing::Span::current().record("user_id", user.id);
    request.extensions_mut().insert(CurrentUser::from(&user));
    Ok(next.run(request).await)
}

/// Must run inside [`auth_middleware`].
pub async fn admin_middleware(request: Request, next: Next) -> Result<Response, ApiError> {
    let is_admin = request
        .extensions()
        .get::<CurrentUser>()
        .is_some_and(CurrentUser::is_admin);

    if !is_admin {
        return Err(ApiError::forbidden("Admin access required"));
    }

    Ok(next.run(request).await)
}

/// A session pointing at a deleted account is discarded.
async fn resolve_session_user(
    state: &AppState,
    session: &Session,
) -> Result<Option<UserDto>, ApiError> {
    let Ok(Some(user_id)) = session.get::<i32>(SESSION_USER_KEY).await else {
        return Ok(None);
    };

    match state.auth_service().get_user(user_id).await {
        Ok(user) => Ok(Some(user)),
        Err(AuthError::UserNotFound(_)) => {
            let _ = session.flush().await;
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

fn extract_api_key(headers: &HeaderMap) -> Option<String> {
    if let Some(api_key) = headers.get("X-Api-Key")
        && let Ok(key_str) = api_key.to_str()
        && !key_str.trim().is_empty()
    {
        return Some(key_str.trim().to_string());
    }

    if let Some(auth_header) = headers.get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
    {
        return Some(token.trim().to_string());
    }

    None
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AuthTokenDto>>), ApiError> {
    let name = validate_length("Name", &payload.name, 3, 100)?;
    let email = validate_email(&payload.email)?;
    if payload.password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }

    let auth = state
        .auth_service()
        .register(name, &email, &payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(auth))))
}

/// POST /auth/login
/// Authenticate with email and password; returns the API token and opens a
/// cookie session.
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AuthTokenDto>>, ApiError> {
    if payload.email.trim().is_empty() {
        return Err(ApiError::validation("Email is required"));
    }
    if payload.password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }

    let auth = state
        .auth_service()
        .login(&payload.email, &payload.password)
        .await?;

    session
        .insert(SESSION_USER_KEY, auth.user.id)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create session: {e}")))?;

    Ok(Json(ApiResponse::success(auth)))
}

/// POST /auth/logout
pub async fn logout(session: Session) -> impl IntoResponse {
    let _ = session.flush().await;
    Json(ApiResponse::success(MessageResponse::new("Logged out")))
}

/// GET /auth/me
pub async fn get_current_user(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let user = state.auth_service().get_user(user.id).await?;
    Ok(Json(ApiResponse::success(user)))
}

/// PUT /auth/profile
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let name = validate_length("Name", &payload.name, 3, 100)?;
    let avatar_url = validate_optional_url("Avatar URL", payload.avatar_url.as_deref())?;

    let user = state
        .auth_service()
        .update_profile(user.id, name, avatar_url)
        .await?;

    Ok(Json(ApiResponse::success(user)))
}

/// PUT /auth/password
/// Change password (requires current password verification)
pub async fn change_password(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .auth_service()
        .change_password(user.id, &payload.current_password, &payload.new_password)
        .await?;

    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Password updated successfully",
    ))))
}

/// POST /auth/token/regenerate
/// Invalidates the current API token and issues a new one.
pub async fn regenerate_token(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<ApiResponse<TokenResponse>>, ApiError> {
    let token = state.auth_service().regenerate_api_key(user.id).await?;
    Ok(Json(ApiResponse::success(TokenResponse { token })))
}
