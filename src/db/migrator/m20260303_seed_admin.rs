use crate::domain::UserRole;
use crate::entities::prelude::*;
use crate::entities::users;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// API key of the seeded admin account. Regenerate it after first login.
pub const DEFAULT_API_KEY: &str = "drakor_default_api_key_please_regenerate";

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@drakor.local";

fn hash_default_password() -> Result<String, DbErr> {
    use argon2::{
        Argon2,
        password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
    };

    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(b"password", &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| DbErr::Custom(format!("Failed to hash default password: {e}")))
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let now = crate::domain::timestamp_now();
        let password_hash = hash_default_password()?;

        let insert = Query::insert()
            .into_table(Users)
            .columns([
                users::Column::Email,
                users::Column::Name,
                users::Column::PasswordHash,
                users::Column::ApiKey,
                users::Column::Role,
                users::Column::CreatedAt,
                users::Column::UpdatedAt,
            ])
            .values_panic([
                DEFAULT_ADMIN_EMAIL.into(),
                "Administrator".into(),
                password_hash.into(),
                DEFAULT_API_KEY.into(),
                UserRole::Admin.as_str().into(),
                now.clone().into(),
                now.into(),
            ])
            .on_conflict(OnConflict::column(users::Column::Email).do_nothing().to_owned())
            .to_owned();

        manager.exec_stmt(insert).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let delete = Query::delete()
            .from_table(Users)
            .and_where(Expr::col(users::Column::Email).eq(DEFAULT_ADMIN_EMAIL))
            .to_owned();

        manager.exec_stmt(delete).await?;

        Ok(())
    }
}
