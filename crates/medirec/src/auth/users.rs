use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, SaltString};
use argon2::{Argon2, PasswordVerifier};

/// A practitioner account able to sign in to the platform.
#[derive(Debug, Clone)]
pub struct UserAccount {
    pub username: String,
    pub display_name: String,
    pub role: String,
    pub password_hash: String,
}

impl UserAccount {
    /// Build an account by hashing the given password with Argon2.
    pub fn with_password(
        username: &str,
        display_name: &str,
        role: &str,
        password: &str,
    ) -> Result<Self, DirectoryError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| DirectoryError::Hashing(err.to_string()))?;

        Ok(Self {
            username: username.to_string(),
            display_name: display_name.to_string(),
            role: role.to_string(),
            password_hash: hash.to_string(),
        })
    }

    /// Constant-style verification against the stored Argon2 hash.
    pub fn verify_password(&self, password: &str) -> Result<bool, DirectoryError> {
        let parsed = PasswordHash::new(&self.password_hash)
            .map_err(|err| DirectoryError::Hashing(err.to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

/// Read access to the account store.
pub trait UserDirectory: Send + Sync {
    fn find(&self, username: &str) -> Result<Option<UserAccount>, DirectoryError>;
}

/// Error enumeration for account lookups and hashing.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("password hashing failed: {0}")]
    Hashing(String),
    #[error("user directory unavailable: {0}")]
    Unavailable(String),
}
