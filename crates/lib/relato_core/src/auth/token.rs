//! Signed identity tokens (JWT, HS256, 24 h lifetime).

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::user::{Identity, Role};

/// Token lifetime, fixed at issuance.
const TOKEN_TTL_HOURS: i64 = 24;

/// Claims embedded in an identity token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — user ID.
    pub sub: i64,
    pub username: String,
    pub role: Role,
    /// Issued at (unix timestamp).
    pub iat: i64,
    /// Not valid before (unix timestamp).
    pub nbf: i64,
    /// Expiry (unix timestamp).
    pub exp: i64,
}

/// Token codec failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,

    #[error("signature mismatch")]
    SignatureMismatch,

    #[error("token expired")]
    Expired,

    #[error("token not yet valid")]
    NotYetValid,

    /// Signing failed while issuing. Never returned by [`TokenCodec::decode`].
    #[error("token signing failed: {0}")]
    Signing(String),
}

/// Issues and verifies signed identity tokens.
///
/// Holds the key pair derived from the process-wide HS256 secret; constructed
/// once at startup and read-only afterwards.
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenCodec {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    /// Sign a token for `identity`, valid from `now` until `now + 24h`.
    /// Deterministic for a fixed `now`.
    pub fn issue(&self, identity: &Identity, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims {
            sub: identity.id,
            username: identity.username.clone(),
            role: identity.role,
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Decode and verify a token against the caller-supplied `now`.
    ///
    /// Only HS256 is accepted; a token signed with any other algorithm fails
    /// regardless of its signature. The validity window is strict with zero
    /// leeway: a token is live iff `nbf <= now < exp`.
    pub fn decode(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // exp and nbf are checked below against `now`, not the system clock.
        validation.validate_exp = false;
        validation.validate_nbf = false;

        let data =
            decode::<Claims>(token, &self.decoding, &validation).map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature
                | ErrorKind::InvalidAlgorithm
                | ErrorKind::InvalidAlgorithmName => TokenError::SignatureMismatch,
                _ => TokenError::Malformed,
            })?;

        let claims = data.claims;
        let ts = now.timestamp();
        if ts < claims.nbf {
            return Err(TokenError::NotYetValid);
        }
        if ts >= claims.exp {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> TokenCodec {
        TokenCodec::new(b"test-secret")
    }

    fn identity() -> Identity {
        Identity {
            id: 5,
            username: "alice".into(),
            role: Role::User,
        }
    }

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp")
    }

    #[test]
    fn round_trip_preserves_identity() {
        let codec = codec();
        let token = codec.issue(&identity(), now()).expect("issue");
        let claims = codec.decode(&token, now()).expect("decode");
        assert_eq!(claims.sub, 5);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.role, Role::User);
        assert_eq!(claims.exp, claims.iat + 24 * 60 * 60);
    }

    #[test]
    fn valid_until_just_before_expiry() {
        let codec = codec();
        let token = codec.issue(&identity(), now()).expect("issue");
        let last_valid = now() + Duration::hours(24) - Duration::seconds(1);
        assert!(codec.decode(&token, last_valid).is_ok());
    }

    #[test]
    fn expired_exactly_at_expiry() {
        let codec = codec();
        let token = codec.issue(&identity(), now()).expect("issue");
        let at_expiry = now() + Duration::hours(24);
        assert_eq!(codec.decode(&token, at_expiry), Err(TokenError::Expired));
        let later = now() + Duration::hours(48);
        assert_eq!(codec.decode(&token, later), Err(TokenError::Expired));
    }

    #[test]
    fn not_yet_valid_before_issuance() {
        let codec = codec();
        let token = codec.issue(&identity(), now()).expect("issue");
        let earlier = now() - Duration::seconds(1);
        assert_eq!(codec.decode(&token, earlier), Err(TokenError::NotYetValid));
    }

    #[test]
    fn tampered_payload_fails_signature_check() {
        let codec = codec();
        let token = codec.issue(&identity(), now()).expect("issue");
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        assert_eq!(parts.len(), 3);
        // Flip one character of the payload; the HMAC covers the raw segment.
        let payload = &mut parts[1];
        let flipped = if payload.ends_with('A') { "B" } else { "A" };
        payload.replace_range(payload.len() - 1.., flipped);
        let tampered = parts.join(".");
        assert_eq!(
            codec.decode(&tampered, now()),
            Err(TokenError::SignatureMismatch)
        );
    }

    #[test]
    fn wrong_secret_fails_signature_check() {
        let token = codec().issue(&identity(), now()).expect("issue");
        let other = TokenCodec::new(b"another-secret");
        assert_eq!(
            other.decode(&token, now()),
            Err(TokenError::SignatureMismatch)
        );
    }

    #[test]
    fn garbage_is_malformed() {
        assert_eq!(
            codec().decode("not-a-token", now()),
            Err(TokenError::Malformed)
        );
        assert_eq!(codec().decode("", now()), Err(TokenError::Malformed));
    }

    #[test]
    fn foreign_algorithm_is_rejected() {
        // Same secret, but signed with HS384: must be refused outright.
        let claims = Claims {
            sub: 5,
            username: "alice".into(),
            role: Role::User,
            iat: now().timestamp(),
            nbf: now().timestamp(),
            exp: (now() + Duration::hours(24)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS384),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .expect("encode");
        assert_eq!(
            codec().decode(&token, now()),
            Err(TokenError::SignatureMismatch)
        );
    }
}
