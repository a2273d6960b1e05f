use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::token::{AuthError, TokenService};
use super::users::UserDirectory;

/// Inbound login payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login response carrying the bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub display_name: String,
}

/// Service exchanging credentials for bearer tokens.
pub struct AuthService<U> {
    users: Arc<U>,
    tokens: Arc<TokenService>,
}

impl<U> AuthService<U>
where
    U: UserDirectory + 'static,
{
    pub fn new(users: Arc<U>, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }

    /// Verify the credentials and issue a token.
    ///
    /// Unknown accounts and wrong passwords are indistinguishable to the
    /// caller.
    pub fn login(&self, request: LoginRequest) -> Result<AuthResponse, AuthError> {
        let account = self
            .users
            .find(&request.username)
            .map_err(|err| AuthError::Directory(err.to_string()))?
            .ok_or(AuthError::InvalidCredentials)?;

        let verified = account
            .verify_password(&request.password)
            .map_err(|err| AuthError::Directory(err.to_string()))?;
        if !verified {
            return Err(AuthError::InvalidCredentials);
        }

        let (token, expires_at) = self.tokens.issue(&account)?;
        info!(username = %account.username, "practitioner signed in");

        Ok(AuthResponse {
            token,
            expires_at,
            display_name: account.display_name,
        })
    }
}
