//! User storage queries and the SQL-backed user directory.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::auth::AuthError;
use crate::auth::directory::UserDirectory;
use crate::models::user::{Identity, Role, UserRecord};

/// [`UserDirectory`] backed by the `users` table.
#[derive(Clone)]
pub struct PgUserDirectory {
    pool: PgPool,
}

impl PgUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, AuthError> {
        let row = sqlx::query_as::<_, (i64, String, String, Role)>(
            "SELECT id, username, password_hash, role FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(into_record))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UserRecord>, AuthError> {
        let row = sqlx::query_as::<_, (i64, String, String, Role)>(
            "SELECT id, username, password_hash, role FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(into_record))
    }

    async fn save(&self, record: &UserRecord) -> Result<(), AuthError> {
        sqlx::query("UPDATE users SET username = $2, password_hash = $3, role = $4 WHERE id = $1")
            .bind(record.identity.id)
            .bind(&record.identity.username)
            .bind(&record.password_hash)
            .bind(record.identity.role)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

fn into_record((id, username, password_hash, role): (i64, String, String, Role)) -> UserRecord {
    UserRecord {
        identity: Identity { id, username, role },
        password_hash,
    }
}

/// Insert a new user, returning the assigned ID.
pub async fn create_user(
    pool: &PgPool,
    username: &str,
    password_hash: &str,
    role: Role,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO users (username, password_hash, role) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(username)
    .bind(password_hash)
    .bind(role)
    .fetch_one(pool)
    .await
}

/// Check whether a username is already registered.
pub async fn username_exists(pool: &PgPool, username: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
        .bind(username)
        .fetch_one(pool)
        .await
}

/// Fetch a user's public identity by ID.
pub async fn find_identity(pool: &PgPool, id: i64) -> Result<Option<Identity>, sqlx::Error> {
    let row = sqlx::query_as::<_, (i64, String, Role)>(
        "SELECT id, username, role FROM users WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(|(id, username, role)| Identity { id, username, role }))
}

/// List all users, oldest first.
pub async fn list_identities(pool: &PgPool) -> Result<Vec<Identity>, sqlx::Error> {
    let rows =
        sqlx::query_as::<_, (i64, String, Role)>("SELECT id, username, role FROM users ORDER BY id")
            .fetch_all(pool)
            .await?;
    Ok(rows
        .into_iter()
        .map(|(id, username, role)| Identity { id, username, role })
        .collect())
}

/// Update a user's username and role, returning the new identity if the
/// user exists.
pub async fn update_user(
    pool: &PgPool,
    id: i64,
    username: &str,
    role: Role,
) -> Result<Option<Identity>, sqlx::Error> {
    let row = sqlx::query_as::<_, (i64, String, Role)>(
        "UPDATE users SET username = $2, role = $3 WHERE id = $1 RETURNING id, username, role",
    )
    .bind(id)
    .bind(username)
    .bind(role)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(|(id, username, role)| Identity { id, username, role }))
}

/// Delete a user. Returns whether a row was removed.
pub async fn delete_user(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
