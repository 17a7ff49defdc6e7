//! Domain service for per-user activity: watch history, watchlists,
//! reviews and comments.

use thiserror::Error;

use crate::api::types::{
    CommentDto, HistoryItemDto, ReviewDto, WatchProgressDto, WatchlistItemDto,
};
use crate::db::DbFailure;
use crate::domain::{DramaId, Page, Pagination};

/// Errors specific to engagement operations.
#[derive(Debug, Error)]
pub enum EngagementError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl EngagementError {
    pub(crate) fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("{resource} {id}"))
    }
}

impl From<sea_orm::DbErr> for EngagementError {
    fn from(err: sea_orm::DbErr) -> Self {
        match DbFailure::of(&err) {
            DbFailure::Unavailable => Self::Unavailable(err.to_string()),
            _ => Self::Database(err.to_string()),
        }
    }
}

impl From<anyhow::Error> for EngagementError {
    fn from(err: anyhow::Error) -> Self {
        match DbFailure::of_anyhow(&err) {
            DbFailure::Unavailable => Self::Unavailable(format!("{err:#}")),
            _ => Self::Database(format!("{err:#}")),
        }
    }
}

/// Domain service trait for user engagement.
#[async_trait::async_trait]
pub trait EngagementService: Send + Sync {
    // Watch history

    /// Upserts the caller's progress on an episode.
    ///
    /// # Errors
    ///
    /// Returns [`EngagementError::NotFound`] if the episode does not exist.
    async fn record_progress(
        &self,
        user_id: i32,
        episode_id: i32,
        progress_seconds: i32,
        completed: bool,
    ) -> Result<WatchProgressDto, EngagementError>;

    async fn list_history(
        &self,
        user_id: i32,
        window: Pagination,
    ) -> Result<Page<HistoryItemDto>, EngagementError>;

    async fn get_progress(
        &self,
        user_id: i32,
        episode_id: i32,
    ) -> Result<Option<WatchProgressDto>, EngagementError>;

    // Watchlist

    async fn list_watchlist(
        &self,
        user_id: i32,
        window: Pagination,
    ) -> Result<Page<WatchlistItemDto>, EngagementError>;

    /// Adds a drama to the watchlist. Adding it twice is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`EngagementError::NotFound`] if the drama does not exist.
    async fn add_to_watchlist(&self, user_id: i32, drama_id: DramaId)
    -> Result<(), EngagementError>;

    async fn remove_from_watchlist(
        &self,
        user_id: i32,
        drama_id: DramaId,
    ) -> Result<(), EngagementError>;

    async fn is_watchlisted(&self, user_id: i32, drama_id: DramaId)
    -> Result<bool, EngagementError>;

    // Reviews

    async fn list_reviews(
        &self,
        drama_id: DramaId,
        window: Pagination,
    ) -> Result<Page<ReviewDto>, EngagementError>;

    /// Creates the caller's review of a drama and refreshes its rating.
    ///
    /// # Errors
    ///
    /// Returns [`EngagementError::Conflict`] if the caller already reviewed
    /// this drama.
    async fn create_review(
        &self,
        user_id: i32,
        drama_id: DramaId,
        rating: i32,
        review_text: &str,
    ) -> Result<ReviewDto, EngagementError>;

    /// # Errors
    ///
    /// Returns [`EngagementError::Forbidden`] unless the caller wrote the review.
    async fn update_review(
        &self,
        user_id: i32,
        review_id: i32,
        rating: i32,
        review_text: &str,
    ) -> Result<ReviewDto, EngagementError>;

    /// Deletes a review; allowed for its author or an admin.
    async fn delete_review(
        &self,
        user_id: i32,
        review_id: i32,
        is_admin: bool,
    ) -> Result<(), EngagementError>;

    // Comments

    async fn list_comments(
        &self,
        episode_id: i32,
        window: Pagination,
    ) -> Result<Page<CommentDto>, EngagementError>;

    async fn create_comment(
        &self,
        user_id: i32,
        episode_id: i32,
        comment_text: &str,
    ) -> Result<CommentDto, EngagementError>;

    async fn update_comment(
        &self,
        user_id: i32,
        comment_id: i32,
        comment_text: &str,
    ) -> Result<CommentDto, EngagementError>;

    async fn delete_comment(
        &self,
        user_id: i32,
        comment_id: i32,
        is_admin: bool,
    ) -> Result<(), EngagementError>;
}
