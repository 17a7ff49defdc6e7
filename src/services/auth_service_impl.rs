//! `SeaORM` implementation of the `AuthService` trait.

use crate::api::types::{AuthTokenDto, UserDto};
use crate::config::SecurityConfig;
use crate::db::{DbFailure, NewUser, Store};
use crate::domain::{Page, Pagination, UserRole};
use crate::services::auth_service::{AuthError, AuthService};
use async_trait::async_trait;

pub struct SeaOrmAuthService {
    store: Store,
    security: SecurityConfig,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }

    fn check_password_length(&self, password: &str) -> Result<(), AuthError> {
        if password.chars().count() < self.security.min_password_length {
            return Err(AuthError::Validation(format!(
                "Password must be at least {} characters",
                self.security.min_password_length
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthTokenDto, AuthError> {
        self.check_password_length(password)?;

        if self.store.get_user_by_email(email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let user = self
            .store
            .create_user(
                NewUser {
                    email,
                    name,
                    password,
                    role: UserRole::User,
                },
                &self.security,
            )
            .await
            .map_err(|e| match DbFailure::of_anyhow(&e) {
                DbFailure::UniqueViolation => AuthError::EmailTaken,
                _ => AuthError::from(e),
            })?;

        tracing::info!(user_id = user.id, "Registered new account");

        Ok(AuthTokenDto {
            token: user.api_key.clone(),
            user: UserDto::from(user),
        })
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthTokenDto, AuthError> {
        let user = self
            .store
            .verify_user_credentials(email, password)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        Ok(AuthTokenDto {
            token: user.api_key.clone(),
            user: UserDto::from(user),
        })
    }

    async fn verify_api_key(&self, api_key: &str) -> Result<Option<UserDto>, AuthError> {
        let user = self.store.verify_api_key(api_key).await?;
        Ok(user.map(UserDto::from))
    }

    async fn get_user(&self, id: i32) -> Result<UserDto, AuthError> {
        self.store
            .get_user(id)
            .await?
            .map(UserDto::from)
            .ok_or(AuthError::UserNotFound(id))
    }

    async fn update_profile(
        &self,
        id: i32,
        name: &str,
        avatar_url: Option<String>,
    ) -> Result<UserDto, AuthError> {
        self.store
            .update_user_profile(id, name, avatar_url)
            .await?
            .map(UserDto::from)
            .ok_or(AuthError::UserNotFound(id))
    }

    async fn change_password(
        &self,
        id: i32,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        self.check_password_length(new_password)?;

        if current_password == new_password {
            return Err(AuthError::Validation(
                "New password must be different from current password".to_string(),
            ));
        }

        let is_valid = self
            .store
            .verify_user_password(id, current_password)
            .await?;

        if !is_valid {
            return Err(AuthError::Validation(
                "Current password is incorrect".to_string(),
            ));
        }

        self.store
            .update_user_password(id, new_password, &self.security)
            .await?;

        tracing::info!(user_id = id, "Password changed");
        Ok(())
    }

    async fn regenerate_api_key(&self, id: i32) -> Result<String, AuthError> {
        if self.store.get_user(id).await?.is_none() {
            return Err(AuthError::UserNotFound(id));
        }

        let key = self.store.regenerate_user_api_key(id).await?;
        tracing::info!(user_id = id, "API key regenerated");
        Ok(key)
    }

    async fn list_users(&self, window: Pagination) -> Result<Page<UserDto>, AuthError> {
        let (users, total) = self.store.list_users(window).await?;
        Ok(Page::new(users, total, window).map(UserDto::from))
    }

    async fn set_role(&self, id: i32, role: UserRole) -> Result<UserDto, AuthError> {
        let user = self
            .store
            .set_user_role(id, role)
            .await?
            .ok_or(AuthError::UserNotFound(id))?;

        tracing::info!(user_id = id, role = role.as_str(), "User role changed");
        Ok(UserDto::from(user))
    }

    async fn delete_user(&self, id: i32) -> Result<(), AuthError> {
        if !self.store.delete_user(id).await? {
            return Err(AuthError::UserNotFound(id));
        }

        tracing::info!(user_id = id, "User deleted");
        Ok(())
    }
}
