//! Authentication and authorization logic.
//!
//! Password hashing, signed identity tokens, the user-directory seam, and
//! the pure access-decision functions. This module never logs and never
//! formats user-facing messages; callers translate errors to transport
//! responses.

pub mod access;
pub mod authenticator;
pub mod directory;
pub mod password;
pub mod token;

use thiserror::Error;

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Login or password change with a wrong username/password pair. Unknown
    /// username and wrong password both map here, so callers cannot probe
    /// which usernames exist.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No usable credential: missing, malformed, expired or forged token, or
    /// the token's subject no longer exists.
    #[error("authentication required")]
    Unauthenticated,

    #[error("user not found")]
    NotFound,

    /// Hashing primitive failure. Fatal to the enclosing operation; never
    /// retried.
    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error("token error: {0}")]
    Token(#[from] token::TokenError),

    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}
