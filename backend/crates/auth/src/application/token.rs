//! Session Token Service
//!
//! Issues and verifies HS256 JWTs carrying the user id.
//! Tokens are stateless; nothing is stored server-side.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use kernel::id::UserId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::config::AuthConfig;
use crate::error::{AuthError, AuthResult};

/// JWT claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub user_id: i64,
    /// Issued at (Unix seconds)
    pub iat: i64,
    /// Expiry (Unix seconds)
    pub exp: i64,
}

/// Reasons a token is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token signature does not match")]
    InvalidSignature,

    #[error("token has expired")]
    Expired,

    #[error("token is malformed")]
    Malformed,
}

/// Signs and verifies session tokens with the configured secret
#[derive(Clone)]
pub struct SessionTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl SessionTokenService {
    pub fn new(config: &AuthConfig) -> AuthResult<Self> {
        let ttl = Duration::from_std(config.token_ttl)
            .map_err(|e| AuthError::Internal(format!("token ttl out of range: {e}")))?;

        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against the caller's clock in `verify`
        validation.validate_exp = false;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(&config.token_secret),
            decoding_key: DecodingKey::from_secret(&config.token_secret),
            validation,
            ttl,
        })
    }

    /// Issue a token for `user_id` valid until `now + ttl`
    pub fn issue(&self, user_id: UserId, now: DateTime<Utc>) -> AuthResult<String> {
        let claims = SessionClaims {
            user_id: user_id.value(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("token signing failed: {e}")))
    }

    /// Verify signature and expiry, returning the embedded user id
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<UserId, TokenError> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            },
        )?;

        if now.timestamp() >= data.claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(UserId::new(data.claims.user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(secret: &str) -> SessionTokenService {
        SessionTokenService::new(&AuthConfig::with_secret(secret)).unwrap()
    }

    #[test]
    fn test_issue_then_verify() {
        let tokens = service("test-secret");
        let now = Utc::now();
        let token = tokens.issue(UserId::new(7), now).unwrap();

        assert_eq!(tokens.verify(&token, now).unwrap(), UserId::new(7));
        assert_eq!(
            tokens.verify(&token, now + Duration::hours(11)).unwrap(),
            UserId::new(7)
        );
    }

    #[test]
    fn test_claims_carry_twelve_hour_expiry() {
        let tokens = service("test-secret");
        let now = Utc::now();
        let token = tokens.issue(UserId::new(1), now).unwrap();

        let data = decode::<SessionClaims>(
            &token,
            &DecodingKey::from_secret(b"test-secret"),
            &tokens.validation,
        )
        .unwrap();
        assert_eq!(data.claims.user_id, 1);
        assert_eq!(data.claims.iat, now.timestamp());
        assert_eq!(data.claims.exp - data.claims.iat, 12 * 3600);
    }

    #[test]
    fn test_expired_at_and_after_exp() {
        let tokens = service("test-secret");
        let now = Utc::now();
        let token = tokens.issue(UserId::new(1), now).unwrap();

        assert_eq!(
            tokens.verify(&token, now + Duration::hours(12)),
            Err(TokenError::Expired)
        );
        assert_eq!(
            tokens.verify(&token, now + Duration::days(2)),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_foreign_secret_is_invalid_signature() {
        let now = Utc::now();
        let token = service("other-secret").issue(UserId::new(1), now).unwrap();

        assert_eq!(
            service("test-secret").verify(&token, now),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_tampered_signature() {
        let tokens = service("test-secret");
        let now = Utc::now();
        let token = tokens.issue(UserId::new(1), now).unwrap();

        let (head, sig) = token.rsplit_once('.').unwrap();
        let flipped = if sig.starts_with('A') { "B" } else { "A" };
        let tampered = format!("{head}.{flipped}{}", &sig[1..]);

        assert_eq!(
            tokens.verify(&tampered, now),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_malformed_tokens() {
        let tokens = service("test-secret");
        let now = Utc::now();

        for bad in ["", "not-a-jwt", "a.b", "a.b.c"] {
            assert_eq!(tokens.verify(bad, now), Err(TokenError::Malformed), "{bad}");
        }
    }

    #[test]
    fn test_missing_claims_are_malformed() {
        #[derive(Serialize)]
        struct Partial {
            user_id: i64,
        }

        let token = encode(
            &Header::new(Algorithm::HS256),
            &Partial { user_id: 1 },
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert_eq!(
            service("test-secret").verify(&token, Utc::now()),
            Err(TokenError::Malformed)
        );
    }
}
