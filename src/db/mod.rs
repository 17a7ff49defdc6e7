use anyhow::Result;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, SqlErr, Statement,
};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::SecurityConfig;
use crate::domain::{DramaId, Pagination, UserRole};
use crate::entities::{
    actors, comments, dramas, episodes, genres, reviews, seasons, users, watch_history, watchlists,
};

pub mod migrator;
pub mod query;
pub mod repositories;

pub use query::{DramaFilter, DramaListQuery, GenreRef};
pub use repositories::analytics::CatalogTotals;
pub use repositories::drama::{DramaInput, DramaWriteError};
pub use repositories::episode::EpisodeInput;
pub use repositories::user::{NewUser, User};

/// Coarse classification of a storage failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbFailure {
    /// The database could not be reached or no connection could be acquired.
    Unavailable,
    UniqueViolation,
    ForeignKeyViolation,
    Other,
}

impl DbFailure {
    #[must_use]
    pub fn of(err: &DbErr) -> Self {
        match err {
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => Self::Unavailable,
            _ => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Self::UniqueViolation,
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => Self::ForeignKeyViolation,
                _ => Self::Other,
            },
        }
    }

    /// Looks through an `anyhow` chain for the underlying [`DbErr`].
    #[must_use]
    pub fn of_anyhow(err: &anyhow::Error) -> Self {
        err.chain()
            .find_map(|cause| cause.downcast_ref::<DbErr>())
            .map_or(Self::Other, Self::of)
    }
}

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url
                .trim_start_matches("sqlite://")
                .trim_start_matches("sqlite:");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent()
                && !parent.as_os_str().is_empty()
            {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn genre_repo(&self) -> repositories::genre::GenreRepository {
        repositories::genre::GenreRepository::new(self.conn.clone())
    }

    fn actor_repo(&self) -> repositories::actor::ActorRepository {
        repositories::actor::ActorRepository::new(self.conn.clone())
    }

    fn drama_repo(&self) -> repositories::drama::DramaRepository {
        repositories::drama::DramaRepository::new(self.conn.clone())
    }

    fn season_repo(&self) -> repositories::season::SeasonRepository {
        repositories::season::SeasonRepository::new(self.conn.clone())
    }

    fn episode_repo(&self) -> repositories::episode::EpisodeRepository {
        repositories::episode::EpisodeRepository::new(self.conn.clone())
    }

    fn history_repo(&self) -> repositories::history::HistoryRepository {
        repositories::history::HistoryRepository::new(self.conn.clone())
    }

    fn watchlist_repo(&self) -> repositories::watchlist::WatchlistRepository {
        repositories::watchlist::WatchlistRepository::new(self.conn.clone())
    }

    fn review_repo(&self) -> repositories::review::ReviewRepository {
        repositories::review::ReviewRepository::new(self.conn.clone())
    }

    fn comment_repo(&self) -> repositories::comment::CommentRepository {
        repositories::comment::CommentRepository::new(self.conn.clone())
    }

    fn analytics_repo(&self) -> repositories::analytics::AnalyticsRepository {
        repositories::analytics::AnalyticsRepository::new(self.conn.clone())
    }

    // ========== User Repository Methods ==========

    pub async fn create_user(&self, user: NewUser<'_>, security: &SecurityConfig) -> Result<User> {
        self.user_repo().create(user, security).await
    }

    pub async fn get_user(&self, id: i32) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.user_repo().get_by_email(email).await
    }

    pub async fn verify_user_credentials(&self, email: &str, password: &str) -> Result<Option<User>> {
        self.user_repo().verify_credentials(email, password).await
    }

    pub async fn verify_user_password(&self, id: i32, password: &str) -> Result<bool> {
        self.user_repo().verify_password(id, password).await
    }

    pub async fn verify_api_key(&self, api_key: &str) -> Result<Option<User>> {
        self.user_repo().verify_api_key(api_key).await
    }

    pub async fn update_user_profile(
        &self,
        id: i32,
        name: &str,
        avatar_url: Option<String>,
    ) -> Result<Option<User>> {
        self.user_repo().update_profile(id, name, avatar_url).await
    }

    pub async fn update_user_password(
        &self,
        id: i32,
        new_password: &str,
        security: &SecurityConfig,
    ) -> Result<()> {
        self.user_repo()
            .update_password(id, new_password, security)
            .await
    }

    pub async fn regenerate_user_api_key(&self, id: i32) -> Result<String> {
        self.user_repo().regenerate_api_key(id).await
    }

    pub async fn list_users(&self, window: Pagination) -> Result<(Vec<User>, u64)> {
        self.user_repo().list(window).await
    }

    pub async fn set_user_role(&self, id: i32, role: UserRole) -> Result<Option<User>> {
        self.user_repo().set_role(id, role).await
    }

    pub async fn delete_user(&self, id: i32) -> Result<bool> {
        self.user_repo().delete(id).await
    }

    // ========== Genre Repository Methods ==========

    pub async fn list_genres(&self) -> Result<Vec<genres::Model>> {
        self.genre_repo().list().await
    }

    pub async fn get_genre(&self, id: i32) -> Result<Option<genres::Model>> {
        self.genre_repo().get(id).await
    }

    pub async fn get_genre_by_slug(&self, slug: &str) -> Result<Option<genres::Model>> {
        self.genre_repo().get_by_slug(slug).await
    }

    pub async fn create_genre(&self, name: &str, slug: &str) -> Result<genres::Model> {
        self.genre_repo().create(name, slug).await
    }

    pub async fn update_genre(&self, id: i32, name: &str, slug: &str) -> Result<Option<genres::Model>> {
        self.genre_repo().update(id, name, slug).await
    }

    pub async fn delete_genre(&self, id: i32) -> Result<bool> {
        self.genre_repo().delete(id).await
    }

    // ========== Actor Repository Methods ==========

    pub async fn list_actors(
        &self,
        window: Pagination,
        search: Option<&str>,
    ) -> Result<(Vec<actors::Model>, u64)> {
        self.actor_repo().list(window, search).await
    }

    pub async fn get_actor(&self, id: i32) -> Result<Option<actors::Model>> {
        self.actor_repo().get(id).await
    }

    pub async fn create_actor(&self, name: &str, photo_url: Option<String>) -> Result<actors::Model> {
        self.actor_repo().create(name, photo_url).await
    }

    pub async fn update_actor(
        &self,
        id: i32,
        name: &str,
        photo_url: Option<String>,
    ) -> Result<Option<actors::Model>> {
        self.actor_repo().update(id, name, photo_url).await
    }

    pub async fn delete_actor(&self, id: i32) -> Result<bool> {
        self.actor_repo().delete(id).await
    }

    // ========== Drama Repository Methods ==========

    pub async fn list_dramas(&self, query: &DramaListQuery) -> Result<(Vec<dramas::Model>, u64)> {
        self.drama_repo().list(query).await
    }

    pub async fn get_drama(&self, id: DramaId) -> Result<Option<dramas::Model>> {
        self.drama_repo().get(id).await
    }

    pub async fn drama_exists(&self, id: DramaId) -> Result<bool> {
        self.drama_repo().exists(id).await
    }

    pub async fn get_drama_genres(&self, id: DramaId) -> Result<Vec<genres::Model>> {
        self.drama_repo().genres(id).await
    }

    pub async fn get_drama_cast(
        &self,
        id: DramaId,
    ) -> Result<Vec<(actors::Model, crate::domain::ActorRole)>> {
        self.drama_repo().cast(id).await
    }

    pub async fn create_drama(
        &self,
        input: &DramaInput,
        added_by: Option<i32>,
    ) -> Result<DramaId, DramaWriteError> {
        self.drama_repo().create(input, added_by).await
    }

    pub async fn update_drama(&self, id: DramaId, input: &DramaInput) -> Result<(), DramaWriteError> {
        self.drama_repo().update(id, input).await
    }

    pub async fn delete_drama(&self, id: DramaId) -> Result<bool> {
        self.drama_repo().delete(id).await
    }

    // ========== Season Repository Methods ==========

    pub async fn list_seasons(&self, drama_id: DramaId) -> Result<Vec<seasons::Model>> {
        self.season_repo().list_for_drama(drama_id).await
    }

    pub async fn get_season(&self, id: i32) -> Result<Option<seasons::Model>> {
        self.season_repo().get(id).await
    }

    pub async fn create_season(
        &self,
        drama_id: DramaId,
        season_number: i32,
        title: &str,
    ) -> Result<seasons::Model> {
        self.season_repo()
            .create(drama_id, season_number, title)
            .await
    }

    pub async fn update_season(
        &self,
        id: i32,
        season_number: i32,
        title: &str,
    ) -> Result<Option<seasons::Model>> {
        self.season_repo().update(id, season_number, title).await
    }

    pub async fn delete_season(&self, id: i32) -> Result<bool> {
        self.season_repo().delete(id).await
    }

    // ========== Episode Repository Methods ==========

    pub async fn list_episodes(&self, season_id: i32) -> Result<Vec<episodes::Model>> {
        self.episode_repo().list_for_season(season_id).await
    }

    pub async fn get_episode(&self, id: i32) -> Result<Option<episodes::Model>> {
        self.episode_repo().get(id).await
    }

    pub async fn get_episode_with_season(
        &self,
        id: i32,
    ) -> Result<Option<(episodes::Model, Option<seasons::Model>)>> {
        self.episode_repo().get_with_season(id).await
    }

    pub async fn create_episode(
        &self,
        season_id: i32,
        input: EpisodeInput,
        added_by: Option<i32>,
    ) -> Result<episodes::Model> {
        self.episode_repo()
            .create(season_id, input, added_by)
            .await
    }

    pub async fn update_episode(&self, id: i32, input: EpisodeInput) -> Result<Option<episodes::Model>> {
        self.episode_repo().update(id, input).await
    }

    pub async fn delete_episode(&self, id: i32) -> Result<bool> {
        self.episode_repo().delete(id).await
    }

    // ========== Watch History Repository Methods ==========

    pub async fn record_watch_progress(
        &self,
        user_id: i32,
        episode_id: i32,
        progress_seconds: i32,
        completed: bool,
    ) -> Result<watch_history::Model> {
        self.history_repo()
            .record(user_id, episode_id, progress_seconds, completed)
            .await
    }

    pub async fn list_watch_history(
        &self,
        user_id: i32,
        window: Pagination,
    ) -> Result<(Vec<(watch_history::Model, Option<episodes::Model>)>, u64)> {
        self.history_repo().list(user_id, window).await
    }

    pub async fn get_watch_progress(
        &self,
        user_id: i32,
        episode_id: i32,
    ) -> Result<Option<watch_history::Model>> {
        self.history_repo().get(user_id, episode_id).await
    }

    // ========== Watchlist Repository Methods ==========

    pub async fn list_watchlist(
        &self,
        user_id: i32,
        window: Pagination,
    ) -> Result<(Vec<(watchlists::Model, Option<dramas::Model>)>, u64)> {
        self.watchlist_repo().list(user_id, window).await
    }

    pub async fn add_to_watchlist(&self, user_id: i32, drama_id: DramaId) -> Result<bool> {
        self.watchlist_repo().add(user_id, drama_id).await
    }

    pub async fn remove_from_watchlist(&self, user_id: i32, drama_id: DramaId) -> Result<bool> {
        self.watchlist_repo().remove(user_id, drama_id).await
    }

    pub async fn is_watchlisted(&self, user_id: i32, drama_id: DramaId) -> Result<bool> {
        self.watchlist_repo().contains(user_id, drama_id).await
    }

    // ========== Review Repository Methods ==========

    pub async fn list_reviews(
        &self,
        drama_id: DramaId,
        window: Pagination,
    ) -> Result<(Vec<(reviews::Model, Option<users::Model>)>, u64)> {
        self.review_repo().list_for_drama(drama_id, window).await
    }

    pub async fn get_review(&self, id: i32) -> Result<Option<reviews::Model>> {
        self.review_repo().get(id).await
    }

    pub async fn create_review(
        &self,
        user_id: i32,
        drama_id: DramaId,
        rating: i32,
        review_text: &str,
    ) -> Result<reviews::Model> {
        self.review_repo()
            .create(user_id, drama_id, rating, review_text)
            .await
    }

    pub async fn update_review(
        &self,
        id: i32,
        rating: i32,
        review_text: &str,
    ) -> Result<Option<reviews::Model>> {
        self.review_repo().update(id, rating, review_text).await
    }

    pub async fn delete_review(&self, id: i32) -> Result<bool> {
        self.review_repo().delete(id).await
    }

    // ========== Comment Repository Methods ==========

    pub async fn list_comments(
        &self,
        episode_id: i32,
        window: Pagination,
    ) -> Result<(Vec<(comments::Model, Option<users::Model>)>, u64)> {
        self.comment_repo()
            .list_for_episode(episode_id, window)
            .await
    }

    pub async fn get_comment(&self, id: i32) -> Result<Option<comments::Model>> {
        self.comment_repo().get(id).await
    }

    pub async fn create_comment(
        &self,
        user_id: i32,
        episode_id: i32,
        comment_text: &str,
    ) -> Result<comments::Model> {
        self.comment_repo()
            .create(user_id, episode_id, comment_text)
            .await
    }

    pub async fn update_comment(&self, id: i32, comment_text: &str) -> Result<Option<comments::Model>> {
        self.comment_repo().update(id, comment_text).await
    }

    pub async fn delete_comment(&self, id: i32) -> Result<bool> {
        self.comment_repo().delete(id).await
    }

    // ========== Analytics Repository Methods ==========

    pub async fn catalog_totals(&self) -> Result<CatalogTotals> {
        self.analytics_repo().totals().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_failure_classification() {
        let conn = DbErr::Conn(sea_orm::RuntimeErr::Internal("refused".to_string()));
        assert_eq!(DbFailure::of(&conn), DbFailure::Unavailable);

        let other = DbErr::Custom("boom".to_string());
        assert_eq!(DbFailure::of(&other), DbFailure::Other);

        let wrapped = anyhow::Error::new(conn).context("Failed to list dramas");
        assert_eq!(DbFailure::of_anyhow(&wrapped), DbFailure::Unavailable);

        let plain = anyhow::anyhow!("not a db error");
        assert_eq!(DbFailure::of_anyhow(&plain), DbFailure::Other);
    }
}
