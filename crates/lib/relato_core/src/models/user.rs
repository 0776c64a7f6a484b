//! User and identity domain models.

use serde::{Deserialize, Serialize};

/// Account role. `Admin` overrides every narrower check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

/// Identity resolved for a single request. Never carries password material.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub id: i64,
    pub username: String,
    pub role: Role,
}

/// Identity plus the stored credential hash, as read from the user directory.
///
/// The hash is an opaque verifiable blob; plaintext passwords are never
/// stored.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub identity: Identity,
    pub password_hash: String,
}
