//! Password hashing via bcrypt.

use super::AuthError;

/// bcrypt cost factor. Raising it only affects newly stored hashes; existing
/// hashes keep verifying at the cost they were created with.
const BCRYPT_COST: u32 = 10;

/// Hash a password with bcrypt. A fresh salt is drawn per call, so two
/// hashes of the same password never compare equal.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    bcrypt::hash(password, BCRYPT_COST).map_err(|e| AuthError::Hashing(format!("bcrypt hash: {e}")))
}

/// Verify a password against a bcrypt hash. A mismatch is `Ok(false)`, not
/// an error; only an undecodable hash or primitive failure errors.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    bcrypt::verify(password, hash).map_err(|e| AuthError::Hashing(format!("bcrypt verify: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trips() {
        let hash = hash_password("hunter2").expect("hash");
        assert!(verify_password("hunter2", &hash).expect("verify"));
    }

    #[test]
    fn wrong_password_is_false_not_error() {
        let hash = hash_password("hunter2").expect("hash");
        assert!(!verify_password("hunter3", &hash).expect("verify"));
    }

    #[test]
    fn same_password_hashes_differently() {
        let a = hash_password("hunter2").expect("hash");
        let b = hash_password("hunter2").expect("hash");
        assert_ne!(a, b);
        assert!(verify_password("hunter2", &a).expect("verify"));
        assert!(verify_password("hunter2", &b).expect("verify"));
    }

    #[test]
    fn undecodable_hash_is_an_error() {
        assert!(verify_password("hunter2", "not-a-bcrypt-hash").is_err());
    }
}
