//! Login and token-to-identity resolution.

use chrono::Utc;

use super::AuthError;
use super::directory::UserDirectory;
use super::password::{hash_password, verify_password};
use super::token::TokenCodec;
use crate::models::user::Identity;

/// Orchestrates credential checks and token issuance/resolution over a
/// [`UserDirectory`]. Stateless apart from the injected codec and directory;
/// one instance serves all requests concurrently.
#[derive(Clone)]
pub struct Authenticator<D> {
    directory: D,
    codec: TokenCodec,
}

impl<D: UserDirectory> Authenticator<D> {
    pub fn new(directory: D, codec: TokenCodec) -> Self {
        Self { directory, codec }
    }

    /// Authenticate with username + password, returning a signed token and
    /// the resolved identity.
    ///
    /// An unknown username and a wrong password both report
    /// [`AuthError::InvalidCredentials`]; the distinction is deliberately
    /// not observable. The token carries the role stored at login time.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(String, Identity), AuthError> {
        let record = self
            .directory
            .find_by_username(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &record.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.codec.issue(&record.identity, Utc::now())?;
        Ok((token, record.identity))
    }

    /// Resolve a bearer token to a live identity.
    ///
    /// The subject's record is re-read from the directory, so role changes
    /// and account deletion take effect immediately; the token's embedded
    /// claims only locate the record. Decode failures and a missing subject
    /// all collapse to [`AuthError::Unauthenticated`].
    pub async fn resolve(&self, token: &str) -> Result<Identity, AuthError> {
        let claims = self
            .codec
            .decode(token, Utc::now())
            .map_err(|_| AuthError::Unauthenticated)?;

        let record = self
            .directory
            .find_by_id(claims.sub)
            .await?
            .ok_or(AuthError::Unauthenticated)?;

        Ok(record.identity)
    }

    /// Change a user's password after verifying the old one against the
    /// stored hash.
    pub async fn change_password(
        &self,
        subject: i64,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        let mut record = self
            .directory
            .find_by_id(subject)
            .await?
            .ok_or(AuthError::NotFound)?;

        if !verify_password(old_password, &record.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        record.password_hash = hash_password(new_password)?;
        self.directory.save(&record).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::*;
    use crate::auth::password::hash_password;
    use crate::models::user::{Role, UserRecord};

    /// In-memory directory for deterministic tests. Cloning shares the map,
    /// so tests can mutate records behind the authenticator's back.
    #[derive(Clone, Default)]
    struct MemoryDirectory {
        users: Arc<Mutex<HashMap<i64, UserRecord>>>,
    }

    impl MemoryDirectory {
        fn with_user(self, id: i64, username: &str, password: &str, role: Role) -> Self {
            let record = UserRecord {
                identity: Identity {
                    id,
                    username: username.into(),
                    role,
                },
                password_hash: hash_password(password).expect("hash"),
            };
            self.users.lock().unwrap().insert(id, record);
            self
        }

        fn set_role(&self, id: i64, role: Role) {
            self.users.lock().unwrap().get_mut(&id).unwrap().identity.role = role;
        }

        fn remove(&self, id: i64) {
            self.users.lock().unwrap().remove(&id);
        }
    }

    #[async_trait]
    impl UserDirectory for MemoryDirectory {
        async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, AuthError> {
            let users = self.users.lock().unwrap();
            Ok(users
                .values()
                .find(|r| r.identity.username == username)
                .cloned())
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<UserRecord>, AuthError> {
            Ok(self.users.lock().unwrap().get(&id).cloned())
        }

        async fn save(&self, record: &UserRecord) -> Result<(), AuthError> {
            self.users
                .lock()
                .unwrap()
                .insert(record.identity.id, record.clone());
            Ok(())
        }
    }

    fn authenticator(directory: &MemoryDirectory) -> Authenticator<MemoryDirectory> {
        Authenticator::new(directory.clone(), TokenCodec::new(b"test-secret"))
    }

    #[tokio::test]
    async fn login_issues_token_for_stored_role() {
        let dir = MemoryDirectory::default().with_user(5, "alice", "hunter2", Role::User);
        let auth = authenticator(&dir);

        let (token, identity) = auth.login("alice", "hunter2").await.expect("login");
        assert_eq!(identity.id, 5);
        assert_eq!(identity.role, Role::User);

        let resolved = auth.resolve(&token).await.expect("resolve");
        assert_eq!(resolved.username, "alice");
        assert_eq!(resolved.role, Role::User);
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_username_are_indistinguishable() {
        let dir = MemoryDirectory::default().with_user(5, "alice", "hunter2", Role::User);
        let auth = authenticator(&dir);

        let wrong_password = auth.login("alice", "wrong").await.unwrap_err();
        let unknown_user = auth.login("nobody", "hunter2").await.unwrap_err();
        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert!(matches!(unknown_user, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn resolve_reads_fresh_role_not_token_claim() {
        let dir = MemoryDirectory::default().with_user(5, "alice", "hunter2", Role::User);
        let auth = authenticator(&dir);

        let (token, _) = auth.login("alice", "hunter2").await.expect("login");
        dir.set_role(5, Role::Admin);

        // The token still embeds User, but the directory is authoritative.
        let resolved = auth.resolve(&token).await.expect("resolve");
        assert_eq!(resolved.role, Role::Admin);
    }

    #[tokio::test]
    async fn resolve_rejects_deleted_subject() {
        let dir = MemoryDirectory::default().with_user(5, "alice", "hunter2", Role::User);
        let auth = authenticator(&dir);

        let (token, _) = auth.login("alice", "hunter2").await.expect("login");
        dir.remove(5);

        let err = auth.resolve(&token).await.unwrap_err();
        assert!(matches!(err, AuthError::Unauthenticated));
    }

    #[tokio::test]
    async fn resolve_rejects_garbage_token() {
        let dir = MemoryDirectory::default();
        let auth = authenticator(&dir);

        let err = auth.resolve("not-a-token").await.unwrap_err();
        assert!(matches!(err, AuthError::Unauthenticated));
    }

    #[tokio::test]
    async fn change_password_verifies_old_before_accepting_new() {
        let dir = MemoryDirectory::default().with_user(5, "alice", "hunter2", Role::User);
        let auth = authenticator(&dir);

        let err = auth.change_password(5, "wrong", "correct-horse").await;
        assert!(matches!(err, Err(AuthError::InvalidCredentials)));

        auth.change_password(5, "hunter2", "correct-horse")
            .await
            .expect("change password");

        assert!(auth.login("alice", "hunter2").await.is_err());
        auth.login("alice", "correct-horse").await.expect("login");
    }

    #[tokio::test]
    async fn change_password_for_missing_user_is_not_found() {
        let dir = MemoryDirectory::default();
        let auth = authenticator(&dir);

        let err = auth.change_password(42, "old", "new").await.unwrap_err();
        assert!(matches!(err, AuthError::NotFound));
    }
}
