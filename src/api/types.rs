use serde::{Deserialize, Serialize};

use crate::db::User;
use crate::domain::{ActorRole, UserRole};
use crate::entities::{actors, comments, dramas, episodes, genres, reviews, seasons, users, watch_history};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Raw `page`/`limit` query values; parsing is lenient so bad input falls
/// back to defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// Accounts
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct UserDto {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub avatar_url: Option<String>,
    pub created_at: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
            avatar_url: user.avatar_url,
            created_at: user.created_at,
        }
    }
}

/// Returned by register and login.
#[derive(Debug, Clone, Serialize)]
pub struct AuthTokenDto {
    pub token: String,
    pub user: UserDto,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthorDto {
    pub id: i32,
    pub name: String,
    pub avatar_url: Option<String>,
}

impl From<&User> for AuthorDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            avatar_url: user.avatar_url.clone(),
        }
    }
}

impl AuthorDto {
    fn from_row(user_id: i32, user: Option<users::Model>) -> Self {
        user.map_or_else(
            || Self {
                id: user_id,
                name: String::new(),
                avatar_url: None,
            },
            |u| Self {
                id: u.id,
                name: u.name,
                avatar_url: u.avatar_url,
            },
        )
    }
}

// ============================================================================
// Catalog
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct GenreDto {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

impl From<genres::Model> for GenreDto {
    fn from(model: genres::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            slug: model.slug,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ActorDto {
    pub id: i32,
    pub name: String,
    pub photo_url: Option<String>,
    pub created_at: String,
}

impl From<actors::Model> for ActorDto {
    fn from(model: actors::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            photo_url: model.photo_url,
            created_at: model.created_at,
        }
    }
}

/// An actor as billed in one drama.
#[derive(Debug, Clone, Serialize)]
pub struct CastMemberDto {
    pub id: i32,
    pub name: String,
    pub photo_url: Option<String>,
    pub role: ActorRole,
}

impl From<(actors::Model, ActorRole)> for CastMemberDto {
    fn from((actor, role): (actors::Model, ActorRole)) -> Self {
        Self {
            id: actor.id,
            name: actor.name,
            photo_url: actor.photo_url,
            role,
        }
    }
}

/// Listing row for a drama, without associations.
#[derive(Debug, Clone, Serialize)]
pub struct DramaSummaryDto {
    pub id: i32,
    pub title: String,
    pub poster_url: Option<String>,
    pub year: i32,
    pub rating: f64,
    pub status: String,
    pub view_count: i64,
    pub created_at: String,
}

impl From<dramas::Model> for DramaSummaryDto {
    fn from(model: dramas::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            poster_url: model.poster_url,
            year: model.year,
            rating: model.rating,
            status: model.status,
            view_count: model.view_count,
            created_at: model.created_at,
        }
    }
}

/// A drama with its genres and cast attached.
#[derive(Debug, Clone, Serialize)]
pub struct DramaDto {
    pub id: i32,
    pub title: String,
    pub synopsis: Option<String>,
    pub poster_url: Option<String>,
    pub year: i32,
    pub rating: f64,
    pub total_seasons: i32,
    pub status: String,
    pub view_count: i64,
    pub source_url: Option<String>,
    pub added_by: Option<i32>,
    pub created_at: String,
    pub updated_at: String,
    pub genres: Vec<GenreDto>,
    pub actors: Vec<CastMemberDto>,
}

impl DramaDto {
    #[must_use]
    pub fn assemble(
        model: dramas::Model,
        genres: Vec<genres::Model>,
        cast: Vec<(actors::Model, ActorRole)>,
    ) -> Self {
        Self {
            id: model.id,
            title: model.title,
            synopsis: model.synopsis,
            poster_url: model.poster_url,
            year: model.year,
            rating: model.rating,
            total_seasons: model.total_seasons,
            status: model.status,
            view_count: model.view_count,
            source_url: model.source_url,
            added_by: model.added_by,
            created_at: model.created_at,
            updated_at: model.updated_at,
            genres: genres.into_iter().map(GenreDto::from).collect(),
            actors: cast.into_iter().map(CastMemberDto::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SeasonDto {
    pub id: i32,
    pub drama_id: i32,
    pub season_number: i32,
    pub title: String,
    pub created_at: String,
}

impl From<seasons::Model> for SeasonDto {
    fn from(model: seasons::Model) -> Self {
        Self {
            id: model.id,
            drama_id: model.drama_id,
            season_number: model.season_number,
            title: model.title,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EpisodeDto {
    pub id: i32,
    pub season_id: i32,
    pub episode_number: i32,
    pub title: String,
    pub video_url: String,
    /// Seconds.
    pub duration: i32,
    pub thumbnail_url: Option<String>,
    pub view_count: i64,
    pub source_url: Option<String>,
    pub added_by: Option<i32>,
    pub created_at: String,
}

impl From<episodes::Model> for EpisodeDto {
    fn from(model: episodes::Model) -> Self {
        Self {
            id: model.id,
            season_id: model.season_id,
            episode_number: model.episode_number,
            title: model.title,
            video_url: model.video_url,
            duration: model.duration,
            thumbnail_url: model.thumbnail_url,
            view_count: model.view_count,
            source_url: model.source_url,
            added_by: model.added_by,
            created_at: model.created_at,
        }
    }
}

// ============================================================================
// Engagement
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct WatchProgressDto {
    pub episode_id: i32,
    pub progress_seconds: i32,
    pub completed: bool,
    pub last_watched_at: String,
}

impl From<watch_history::Model> for WatchProgressDto {
    fn from(model: watch_history::Model) -> Self {
        Self {
            episode_id: model.episode_id,
            progress_seconds: model.progress_seconds,
            completed: model.completed,
            last_watched_at: model.last_watched_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryItemDto {
    #[serde(flatten)]
    pub progress: WatchProgressDto,
    pub episode: Option<EpisodeDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WatchlistItemDto {
    pub added_at: String,
    pub drama: DramaSummaryDto,
}

#[derive(Debug, Clone, Serialize)]
pub struct WatchlistStatusDto {
    pub is_watchlisted: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewDto {
    pub id: i32,
    pub drama_id: i32,
    pub rating: i32,
    pub review_text: String,
    pub created_at: String,
    pub updated_at: String,
    pub author: AuthorDto,
}

impl From<(reviews::Model, Option<users::Model>)> for ReviewDto {
    fn from((review, user): (reviews::Model, Option<users::Model>)) -> Self {
        Self {
            author: AuthorDto::from_row(review.user_id, user),
            id: review.id,
            drama_id: review.drama_id,
            rating: review.rating,
            review_text: review.review_text,
            created_at: review.created_at,
            updated_at: review.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentDto {
    pub id: i32,
    pub episode_id: i32,
    pub comment_text: String,
    pub created_at: String,
    pub updated_at: String,
    pub author: AuthorDto,
}

impl From<(comments::Model, Option<users::Model>)> for CommentDto {
    fn from((comment, user): (comments::Model, Option<users::Model>)) -> Self {
        Self {
            author: AuthorDto::from_row(comment.user_id, user),
            id: comment.id,
            episode_id: comment.episode_id,
            comment_text: comment.comment_text,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

// ============================================================================
// Analytics
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct DashboardDto {
    pub total_users: u64,
    pub total_dramas: u64,
    pub total_episodes: u64,
    pub total_views: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Page, Pagination};

    #[test]
    fn test_envelope_omits_empty_fields() {
        let ok = serde_json::to_value(ApiResponse::success(1)).unwrap();
        assert_eq!(ok, serde_json::json!({"success": true, "data": 1}));

        let err = serde_json::to_value(ApiResponse::<()>::error("nope")).unwrap();
        assert_eq!(err, serde_json::json!({"success": false, "error": "nope"}));
    }

    #[test]
    fn test_paginated_shape() {
        let window = Pagination::new(Some(2), Some(2), 10, 100);
        let page = Page::new(vec!["c"], 3, window);
        let value = serde_json::to_value(ApiResponse::success(page)).unwrap();
        assert_eq!(
            value["data"],
            serde_json::json!({"items": ["c"], "total": 3, "page": 2, "limit": 2, "total_pages": 2})
        );
    }

    #[test]
    fn test_cast_role_serializes_lowercase() {
        let dto = CastMemberDto {
            id: 1,
            name: "Gong Yoo".to_string(),
            photo_url: None,
            role: ActorRole::Main,
        };
        let value = serde_json::to_value(dto).unwrap();
        assert_eq!(value["role"], "main");
    }
}
