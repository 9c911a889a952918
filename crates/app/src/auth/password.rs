//! Password hashing.

use argon2::{
    Argon2,
    password_hash::{
        self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use tokio::task::{JoinError, spawn_blocking};

use crate::auth::AuthServiceError;

/// Hash a password into a PHC string with a fresh salt.
///
/// # Errors
///
/// Returns an error when hashing fails.
pub(crate) fn hash_password(password: &str) -> Result<String, password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
}

/// Check a password against a stored PHC string.
///
/// # Errors
///
/// Returns an error when the stored hash cannot be parsed.
pub(crate) fn verify_password(password: &str, hash: &str) -> Result<bool, password_hash::Error> {
    let parsed = PasswordHash::new(hash)?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(error) => Err(error),
    }
}

/// [`hash_password`] on the blocking pool.
pub(crate) async fn hash_password_blocking(password: String) -> Result<String, AuthServiceError> {
    Ok(spawn_blocking(move || hash_password(&password)).await??)
}

/// [`verify_password`] on the blocking pool.
pub(crate) async fn verify_password_blocking(
    password: String,
    hash: String,
) -> Result<bool, AuthServiceError> {
    Ok(spawn_blocking(move || verify_password(&password, &hash)).await??)
}

impl From<JoinError> for AuthServiceError {
    fn from(error: JoinError) -> Self {
        Self::PasswordTask(error)
    }
}
