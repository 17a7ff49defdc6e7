//! `SeaORM` implementation of the `EngagementService` trait.

use crate::api::types::{
    AuthorDto, CommentDto, DramaSummaryDto, EpisodeDto, HistoryItemDto, ReviewDto,
    WatchProgressDto, WatchlistItemDto,
};
use crate::db::{DbFailure, Store};
use crate::domain::{DramaId, Page, Pagination};
use crate::services::engagement_service::{EngagementError, EngagementService};
use async_trait::async_trait;
use tracing::{debug, info};

pub struct SeaOrmEngagementService {
    store: Store,
}

impl SeaOrmEngagementService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    async fn author(&self, user_id: i32) -> Result<Option<AuthorDto>, EngagementError> {
        Ok(self.store.get_user(user_id).await?.as_ref().map(AuthorDto::from))
    }

    async fn ensure_drama(&self, drama_id: DramaId) -> Result<(), EngagementError> {
        if self.store.drama_exists(drama_id).await? {
            Ok(())
        } else {
            Err(EngagementError::not_found("Drama", drama_id))
        }
    }

    async fn ensure_episode(&self, episode_id: i32) -> Result<(), EngagementError> {
        if self.store.get_episode(episode_id).await?.is_some() {
            Ok(())
        } else {
            Err(EngagementError::not_found("Episode", episode_id))
        }
    }
}

#[async_trait]
impl EngagementService for SeaOrmEngagementService {
    async fn record_progress(
        &self,
        user_id: i32,
        episode_id: i32,
        progress_seconds: i32,
        completed: bool,
    ) -> Result<WatchProgressDto, EngagementError> {
        self.ensure_episode(episode_id).await?;

        let row = self
            .store
            .record_watch_progress(user_id, episode_id, progress_seconds, completed)
            .await?;

        debug!(user_id, episode_id, progress_seconds, completed, "Watch progress recorded");
        Ok(WatchProgressDto::from(row))
    }

    async fn list_history(
        &self,
        user_id: i32,
        window: Pagination,
    ) -> Result<Page<HistoryItemDto>, EngagementError> {
        let (rows, total) = self.store.list_watch_history(user_id, window).await?;
        Ok(Page::new(rows, total, window).map(|(progress, episode)| HistoryItemDto {
            progress: WatchProgressDto::from(progress),
            episode: episode.map(EpisodeDto::from),
        }))
    }

    async fn get_progress(
        &self,
        user_id: i32,
        episode_id: i32,
    ) -> Result<Option<WatchProgressDto>, EngagementError> {
        let row = self.store.get_watch_progress(user_id, episode_id).await?;
        Ok(row.map(WatchProgressDto::from))
    }

    async fn list_watchlist(
        &self,
        user_id: i32,
        window: Pagination,
    ) -> Result<Page<WatchlistItemDto>, EngagementError> {
        let (rows, total) = self.store.list_watchlist(user_id, window).await?;

        // Watchlist rows cascade with their drama, so the join always matches.
        let items = rows
            .into_iter()
            .filter_map(|(entry, drama)| {
                drama.map(|drama| WatchlistItemDto {
                    added_at: entry.created_at,
                    drama: DramaSummaryDto::from(drama),
                })
            })
            .collect();

        Ok(Page::new(items, total, window))
    }

    async fn add_to_watchlist(
        &self,
        user_id: i32,
        drama_id: DramaId,
    ) -> Result<(), EngagementError> {
        self.ensure_drama(drama_id).await?;

        if self.store.add_to_watchlist(user_id, drama_id).await? {
            info!(user_id, drama_id = %drama_id, "Added to watchlist");
        }
        Ok(())
    }

    async fn remove_from_watchlist(
        &self,
        user_id: i32,
        drama_id: DramaId,
    ) -> Result<(), EngagementError> {
        if self.store.remove_from_watchlist(user_id, drama_id).await? {
            info!(user_id, drama_id = %drama_id, "Removed from watchlist");
        }
        Ok(())
    }

    async fn is_watchlisted(
        &self,
        user_id: i32,
        drama_id: DramaId,
    ) -> Result<bool, EngagementError> {
        Ok(self.store.is_watchlisted(user_id, drama_id).await?)
    }

    async fn list_reviews(
        &self,
        drama_id: DramaId,
        window: Pagination,
    ) -> Result<Page<ReviewDto>, EngagementError> {
        self.ensure_drama(drama_id).await?;

        let (rows, total) = self.store.list_reviews(drama_id, window).await?;
        Ok(Page::new(rows, total, window).map(ReviewDto::from))
    }

    async fn create_review(
        &self,
        user_id: i32,
        drama_id: DramaId,
        rating: i32,
        review_text: &str,
    ) -> Result<ReviewDto, EngagementError> {
        self.ensure_drama(drama_id).await?;

        let review = self
            .store
            .create_review(user_id, drama_id, rating, review_text)
            .await
            .map_err(|e| match DbFailure::of_anyhow(&e) {
                DbFailure::UniqueViolation => EngagementError::Conflict(
                    "You have already reviewed this drama".to_string(),
                ),
                _ => EngagementError::from(e),
            })?;

        info!(review_id = review.id, user_id, drama_id = %drama_id, rating, "Review created");

        let mut dto = ReviewDto::from((review, None));
        if let Some(author) = self.author(user_id).await? {
            dto.author = author;
        }
        Ok(dto)
    }

    async fn update_review(
        &self,
        user_id: i32,
        review_id: i32,
        rating: i32,
        review_text: &str,
    ) -> Result<ReviewDto, EngagementError> {
        let review = self
            .store
            .get_review(review_id)
            .await?
            .ok_or_else(|| EngagementError::not_found("Review", review_id))?;

        if review.user_id != user_id {
            return Err(EngagementError::Forbidden(
                "Only the author can edit this review".to_string(),
            ));
        }

        let review = self
            .store
            .update_review(review_id, rating, review_text)
            .await?
            .ok_or_else(|| EngagementError::not_found("Review", review_id))?;

        let mut dto = ReviewDto::from((review, None));
        if let Some(author) = self.author(user_id).await? {
            dto.author = author;
        }
        Ok(dto)
    }

    async fn delete_review(
        &self,
        user_id: i32,
        review_id: i32,
        is_admin: bool,
    ) -> Result<(), EngagementError> {
        let review = self
            .store
            .get_review(review_id)
            .await?
            .ok_or_else(|| EngagementError::not_found("Review", review_id))?;

        if !is_admin && review.user_id != user_id {
            return Err(EngagementError::Forbidden(
                "Only the author or an admin can delete this review".to_string(),
            ));
        }

        if !self.store.delete_review(review_id).await? {
            return Err(EngagementError::not_found("Review", review_id));
        }

        info!(review_id, deleted_by = user_id, "Review deleted");
        Ok(())
    }

    async fn list_comments(
        &self,
        episode_id: i32,
        window: Pagination,
    ) -> Result<Page<CommentDto>, EngagementError> {
        self.ensure_episode(episode_id).await?;

        let (rows, total) = self.store.list_comments(episode_id, window).await?;
        Ok(Page::new(rows, total, window).map(CommentDto::from))
    }

    async fn create_comment(
        &self,
        user_id: i32,
        episode_id: i32,
        comment_text: &str,
    ) -> Result<CommentDto, EngagementError> {
        self.ensure_episode(episode_id).await?;

        let comment = self
            .store
            .create_comment(user_id, episode_id, comment_text)
            .await?;

        let mut dto = CommentDto::from((comment, None));
        if let Some(author) = self.author(user_id).await? {
            dto.author = author;
        }
        Ok(dto)
    }

    async fn update_comment(
        &self,
        user_id: i32,
        comment_id: i32,
        comment_text: &str,
    ) -> Result<CommentDto, EngagementError> {
        let comment = self
            .store
            .get_comment(comment_id)
            .await?
            .ok_or_else(|| EngagementError::not_found("Comment", comment_id))?;

        if comment.user_id != user_id {
            return Err(EngagementError::Forbidden(
                "Only the author can edit this comment".to_string(),
            ));
        }

        let comment = self
            .store
            .update_comment(comment_id, comment_text)
            .await?
            .ok_or_else(|| EngagementError::not_found("Comment", comment_id))?;

        let mut dto = CommentDto::from((comment, None));
        if let Some(author) = self.author(user_id).await? {
            dto.author = author;
        }
        Ok(dto)
    }

    async fn delete_comment(
        &self,
        user_id: i32,
        comment_id: i32,
        is_admin: bool,
    ) -> Result<(), EngagementError> {
        let comment = self
            .store
            .get_comment(comment_id)
            .await?
            .ok_or_else(|| EngagementError::not_found("Comment", comment_id))?;

        if !is_admin && comment.user_id != user_id {
            return Err(EngagementError::Forbidden(
                "Only the author or an admin can delete this comment".to_string(),
            ));
        }

        if !self.store.delete_comment(comment_id).await? {
            return Err(EngagementError::not_found("Comment", comment_id));
        }

        info!(comment_id, deleted_by = user_id, "Comment deleted");
        Ok(())
    }
}
