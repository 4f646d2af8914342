//! Bearer token verification
//!
//! Tokens are minted by the external auth provider; this side only checks
//! the HS256 signature, expiry and (optionally) the issuer, then reads the
//! subject as the caller's user id.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use vivah_core::UserId;

use crate::config::AuthConfig;
use crate::error::AppError;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

impl Claims {
    /// Claims for `user_id` valid for `ttl_secs` from now
    #[must_use]
    pub fn for_user(user_id: &UserId, ttl_secs: i64) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id.as_str().to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ttl_secs)).timestamp(),
            iss: None,
        }
    }

    /// Get the subject as a user id
    ///
    /// # Errors
    /// Returns an error if the subject is blank
    pub fn user_id(&self) -> Result<UserId, AppError> {
        UserId::parse(&self.sub).map_err(|_| AppError::InvalidToken)
    }
}

/// Verifies bearer tokens against a shared secret
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    #[must_use]
    pub fn new(secret: &str, issuer: Option<&str>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        if let Some(issuer) = issuer {
            validation.set_issuer(&[issuer]);
        }

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    #[must_use]
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(&config.jwt_secret, config.issuer.as_deref())
    }

    /// Decode and validate a token
    ///
    /// # Errors
    /// Returns `TokenExpired` for an expired token and `InvalidToken` for anything else wrong
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            }
        })?;

        Ok(data.claims)
    }

    /// Verify a token and return its subject
    ///
    /// # Errors
    /// Returns an error if the token is rejected or carries a blank subject
    pub fn authenticate(&self, token: &str) -> Result<UserId, AppError> {
        self.verify(token)?.user_id()
    }
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("issuer", &self.validation.iss)
            .finish_non_exhaustive()
    }
}
