use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::users::UserAccount;

/// Claims carried by every issued bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub name: String,
    pub role: String,
    pub exp: usize,
}

/// Signs and validates HS256 bearer tokens with a fixed TTL.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, ttl_minutes: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::minutes(ttl_minutes),
        }
    }

    /// Issue a token for the account, returning it with its expiry.
    pub fn issue(&self, account: &UserAccount) -> Result<(String, DateTime<Utc>), AuthError> {
        let expires_at = Utc::now() + self.ttl;
        let claims = Claims {
            sub: account.username.clone(),
            name: account.display_name.clone(),
            role: account.role.clone(),
            exp: expires_at.timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)
            .map_err(|source| AuthError::Token(source.to_string()))?;
        Ok((token, expires_at))
    }

    /// Validate an inbound bearer token, expiry included.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| AuthError::InvalidToken)
    }
}

/// Error raised by token handling and credential checks.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("invalid or expired token")]
    InvalidToken,
    #[error("token signing failed: {0}")]
    Token(String),
    #[error("user directory unavailable: {0}")]
    Directory(String),
}
