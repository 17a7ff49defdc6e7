use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{delete, get, patch, post, put},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::Config;
use crate::domain::Pagination;
use crate::state::SharedState;

mod actors;
mod analytics;
pub mod auth;
mod comments;
mod dramas;
mod episodes;
mod error;
mod extract;
mod genres;
mod health;
mod history;
mod observability;
mod reviews;
mod seasons;
pub mod types;
mod validation;
mod watchlist;

pub use auth::CurrentUser;
pub use dramas::{DramaListParams, DramaRequest};
pub use error::ApiError;
pub use types::*;

use tokio::sync::RwLock;

use crate::services::{
    AnalyticsService, AuthService, CatalogService, DramaService, EngagementService,
};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Arc<RwLock<Config>> {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn auth_service(&self) -> &Arc<dyn AuthService> {
        &self.shared.auth_service
    }

    #[must_use]
    pub fn drama_service(&self) -> &Arc<dyn DramaService> {
        &self.shared.drama_service
    }

    #[must_use]
    pub fn catalog_service(&self) -> &Arc<dyn CatalogService> {
        &self.shared.catalog_service
    }

    #[must_use]
    pub fn engagement_service(&self) -> &Arc<dyn EngagementService> {
        &self.shared.engagement_service
    }

    #[must_use]
    pub fn analytics_service(&self) -> &Arc<dyn AnalyticsService> {
        &self.shared.analytics_service
    }

    /// `(default_page_size, max_page_size)` from the catalog config.
    pub async fn page_limits(&self) -> (u64, u64) {
        let config = self.config().read().await;
        (
            config.catalog.default_page_size,
            config.catalog.max_page_size,
        )
    }

    pub async fn pagination(&self, query: &PageQuery) -> Pagination {
        let (default_limit, max_limit) = self.page_limits().await;
        Pagination::from_query(
            query.page.as_deref(),
            query.limit.as_deref(),
            default_limit,
            max_limit,
        )
    }
}

pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub async fn router(state: Arc<AppState>) -> Router {
    let server = state.config().read().await.server.clone();

    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(server.secure_cookies)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            server.session_idle_minutes,
        )));

    let api_router = Router::new()
        .merge(create_public_router())
        .merge(create_protected_router(state.clone()))
        .merge(create_admin_router(state.clone()))
        .layer(session_layer)
        .with_state(state.clone());

    let cors_layer = if server.cors_allowed_origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = server
            .cors_allowed_origins
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .route("/health", get(health::health))
        .with_state(state)
        .nest("/api", api_router)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(middleware::from_fn(observability::security_headers_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
}

fn create_public_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(health::ping))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/dramas", get(dramas::list_dramas))
        .route("/dramas/{id}", get(dramas::get_drama))
        .route("/dramas/{id}/seasons", get(seasons::list_seasons))
        .route("/dramas/{id}/reviews", get(reviews::list_reviews))
        .route("/genres", get(genres::list_genres))
        .route("/actors", get(actors::list_actors))
        .route("/actors/{id}", get(actors::get_actor))
        .route("/seasons/{id}", get(seasons::get_season))
        .route("/seasons/{id}/episodes", get(episodes::list_episodes))
        .route("/episodes/{id}", get(episodes::get_episode))
        .route("/episodes/{id}/comments", get(comments::list_comments))
}

/// Any signed-in user.
fn create_protected_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/me", get(auth::get_current_user))
        .route("/auth/profile", put(auth::update_profile))
        .route("/auth/password", put(auth::change_password))
        .route("/auth/token/regenerate", post(auth::regenerate_token))
        .route(
            "/history",
            get(history::list_history).post(history::record_progress),
        )
        .route("/history/{episode_id}", get(history::get_progress))
        .route(
            "/watchlist",
            get(watchlist::list_watchlist).post(watchlist::add_to_watchlist),
        )
        .route(
            "/watchlist/{drama_id}",
            delete(watchlist::remove_from_watchlist),
        )
        .route(
            "/watchlist/{drama_id}/check",
            get(watchlist::check_watchlist),
        )
        .route("/reviews", post(reviews::create_review))
        .route(
            "/reviews/{id}",
            put(reviews::update_review).delete(reviews::delete_review),
        )
        .route("/comments", post(comments::create_comment))
        .route(
            "/comments/{id}",
            put(comments::update_comment).delete(comments::delete_comment),
        )
        .route_layer(middleware::from_fn_with_state(state, auth::auth_middleware))
}

/// Admin role required; authentication runs first.
fn create_admin_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/dramas", post(dramas::create_drama))
        .route(
            "/dramas/{id}",
            put(dramas::update_drama).delete(dramas::delete_drama),
        )
        .route("/genres", post(genres::create_genre))
        .route(
            "/genres/{id}",
            put(genres::update_genre).delete(genres::delete_genre),
        )
        .route("/actors", post(actors::create_actor))
        .route(
            "/actors/{id}",
            put(actors::update_actor).delete(actors::delete_actor),
        )
        .route("/seasons", post(seasons::create_season))
        .route(
            "/seasons/{id}",
            put(seasons::update_season).delete(seasons::delete_season),
        )
        .route("/episodes", post(episodes::create_episode))
        .route(
            "/episodes/{id}",
            put(episodes::update_episode).delete(episodes::delete_episode),
        )
        .route("/analytics/dashboard", get(analytics::dashboard))
        .route("/analytics/users", get(analytics::list_users))
        .route("/analytics/users/{id}/role", patch(analytics::set_user_role))
        .route(
            "/analytics/users/{id}",
            delete(analytics::delete_user),
        )
        .route("/metrics", get(observability::get_metrics))
        .route_layer(middleware::from_fn(auth::admin_middleware))
        .route_layer(middleware::from_fn_with_state(state, auth::auth_middleware))
}
