//! Domain service for accounts and authentication.
//!
//! Covers registration, login, API token management, profile edits, and the
//! admin-only user management operations.

use thiserror::Error;

use crate::api::types::{AuthTokenDto, UserDto};
use crate::db::DbFailure;
use crate::domain::{Page, Pagination, UserRole};

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User {0} not found")]
    UserNotFound(i32),

    #[error("Email is already registered")]
    EmailTaken,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        match DbFailure::of(&err) {
            DbFailure::Unavailable => Self::Unavailable(err.to_string()),
            _ => Self::Database(err.to_string()),
        }
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        match DbFailure::of_anyhow(&err) {
            DbFailure::Unavailable => Self::Unavailable(format!("{err:#}")),
            _ => Self::Database(format!("{err:#}")),
        }
    }
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Creates a `user`-role account and returns its token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::EmailTaken`] if the email is already registered.
    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthTokenDto, AuthError>;

    /// Verifies credentials and returns the account token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if login fails.
    async fn login(&self, email: &str, password: &str) -> Result<AuthTokenDto, AuthError>;

    /// Resolves an API token to its account, if any.
    async fn verify_api_key(&self, api_key: &str) -> Result<Option<UserDto>, AuthError>;

    async fn get_user(&self, id: i32) -> Result<UserDto, AuthError>;

    async fn update_profile(
        &self,
        id: i32,
        name: &str,
        avatar_url: Option<String>,
    ) -> Result<UserDto, AuthError>;

    /// Changes a user's password.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] if current password is incorrect or new password invalid.
    async fn change_password(
        &self,
        id: i32,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError>;

    /// Replaces the user's API token and returns the new one.
    async fn regenerate_api_key(&self, id: i32) -> Result<String, AuthError>;

    /// Accounts, newest first.
    async fn list_users(&self, window: Pagination) -> Result<Page<UserDto>, AuthError>;

    async fn set_role(&self, id: i32, role: UserRole) -> Result<UserDto, AuthError>;

    async fn delete_user(&self, id: i32) -> Result<(), AuthError>;
}
