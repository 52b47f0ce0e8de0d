//! HS256 token issuing and verification.
//!
//! # Responsibility
//! - Produce signed assertions binding an account ID to an issuance time.
//! - Validate presented tokens and recover the bound account ID.
//!
//! # Invariants
//! - Tokens are never persisted; validity is bounded by `exp` alone.
//! - Verification applies zero expiry leeway.
//! - There is no revocation: a valid token stays valid until it expires.

use crate::model::account::AccountId;
use jsonwebtoken::{
    decode, encode, get_current_timestamp, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use uuid::Uuid;

/// Default validity window for issued tokens.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Claim set carried by every issued token.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Bound account ID.
    sub: String,
    /// Issuance time, seconds since epoch.
    iat: u64,
    /// Expiry time, seconds since epoch.
    exp: u64,
}

/// Error from issuing or verifying a token.
#[derive(Debug)]
pub enum TokenError {
    /// Signing the claim set failed.
    Issue(jsonwebtoken::errors::Error),
    /// The presented token is expired, tampered with, malformed, or does not
    /// carry a well-formed account ID.
    Invalid,
}

impl Display for TokenError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Issue(err) => write!(f, "token issuance failed: {err}"),
            Self::Invalid => write!(f, "token is invalid or expired"),
        }
    }
}

impl Error for TokenError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Issue(err) => Some(err),
            Self::Invalid => None,
        }
    }
}

/// Issues and verifies HS256-signed account assertions.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
    validation: Validation,
}

impl TokenIssuer {
    /// Creates an issuer with the default validity window.
    pub fn new(secret: &[u8]) -> Self {
        Self::with_ttl(secret, DEFAULT_TOKEN_TTL)
    }

    /// Creates an issuer with a caller-chosen validity window.
    pub fn with_ttl(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::default();
        validation.leeway = 0;
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl,
            validation,
        }
    }

    /// Issues a token bound to the given account ID, valid from now until
    /// now + TTL.
    pub fn issue(&self, account_id: AccountId) -> Result<String, TokenError> {
        let now = get_current_timestamp();
        let claims = Claims {
            sub: account_id.to_string(),
            iat: now,
            exp: now + self.ttl.as_secs(),
        };
        encode(&Header::default(), &claims, &self.encoding_key).map_err(TokenError::Issue)
    }

    /// Verifies a presented token and returns the bound account ID.
    pub fn verify(&self, token: &str) -> Result<AccountId, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|_| TokenError::Invalid)?;
        Uuid::parse_str(&data.claims.sub).map_err(|_| TokenError::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::{Claims, TokenError, TokenIssuer};
    use jsonwebtoken::{encode, get_current_timestamp, EncodingKey, Header};
    use std::time::Duration;
    use uuid::Uuid;

    const SECRET: &[u8] = b"unit-test-secret-at-least-32-bytes!!";

    #[test]
    fn issue_verify_roundtrip_returns_bound_account() {
        let issuer = TokenIssuer::new(SECRET);
        let account_id = Uuid::new_v4();
        let token = issuer.issue(account_id).unwrap();
        assert_eq!(issuer.verify(&token).unwrap(), account_id);
    }

    #[test]
    fn verify_rejects_token_signed_with_other_secret() {
        let issuer = TokenIssuer::new(SECRET);
        let other = TokenIssuer::new(b"a-completely-different-signing-key!!");
        let token = other.issue(Uuid::new_v4()).unwrap();
        assert!(matches!(issuer.verify(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn verify_rejects_expired_token() {
        let issuer = TokenIssuer::with_ttl(SECRET, Duration::from_secs(600));
        let now = get_current_timestamp();
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            iat: now - 1200,
            exp: now - 600,
        };
        let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET)).unwrap();
        assert!(matches!(issuer.verify(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn verify_rejects_garbage() {
        let issuer = TokenIssuer::new(SECRET);
        assert!(matches!(
            issuer.verify("not.a.token"),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn verify_rejects_non_uuid_subject() {
        let issuer = TokenIssuer::new(SECRET);
        let now = get_current_timestamp();
        let claims = Claims {
            sub: "account-7".to_string(),
            iat: now,
            exp: now + 600,
        };
        let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET)).unwrap();
        assert!(matches!(issuer.verify(&token), Err(TokenError::Invalid)));
    }
}
