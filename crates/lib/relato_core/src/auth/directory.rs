//! User directory seam.

use async_trait::async_trait;

use super::AuthError;
use crate::models::user::UserRecord;

/// Authoritative store of user identities and credentials.
///
/// `find_by_id` must observe writes made through `save` (read-after-write
/// consistency), otherwise the fresh re-read during token resolution is
/// meaningless.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, AuthError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<UserRecord>, AuthError>;

    /// Persist an updated record (username, role, or password hash).
    async fn save(&self, record: &UserRecord) -> Result<(), AuthError>;
}
