//! User management flows.

use sqlx::PgPool;
use tracing::info;

use relato_core::auth::password::hash_password;
use relato_core::models::user::{Identity, Role};
use relato_core::store;

use crate::error::{AppError, AppResult};

/// Create a new account with the default role.
///
/// Every registration gets [`Role::User`]; roles are only elevated through
/// the admin update endpoint, so the public endpoint cannot mint admins.
/// The taken-username check discloses existence here, unlike login.
pub async fn register(pool: &PgPool, username: &str, password: &str) -> AppResult<Identity> {
    if store::users::username_exists(pool, username).await? {
        return Err(AppError::Conflict("Username already taken".into()));
    }

    let password_hash = hash_password(password)?;
    let id = store::users::create_user(pool, username, &password_hash, Role::User).await?;

    info!(username, id, "user registered");
    Ok(Identity {
        id,
        username: username.to_string(),
        role: Role::User,
    })
}

pub async fn get(pool: &PgPool, id: i64) -> AppResult<Identity> {
    store::users::find_identity(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".into()))
}

pub async fn list(pool: &PgPool) -> AppResult<Vec<Identity>> {
    Ok(store::users::list_identities(pool).await?)
}

/// Update a user's username and role. Route-gated to admins.
pub async fn update(pool: &PgPool, id: i64, username: &str, role: Role) -> AppResult<Identity> {
    store::users::update_user(pool, id, username, role)
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".into()))
}

pub async fn delete(pool: &PgPool, id: i64) -> AppResult<()> {
    if !store::users::delete_user(pool, id).await? {
        return Err(AppError::NotFound("user not found".into()));
    }
    Ok(())
}
