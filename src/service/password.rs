/// Password hashing and verification using Argon2id
use crate::error::StudyError;
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

/// Hash a password with a fresh random salt. Returns a PHC string for storage.
pub fn hash_password(password: &str) -> Result<String, StudyError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string();
    Ok(hash)
}

/// Verify a password against its stored PHC hash.
///
/// A mismatch is `Ok(false)`; only a malformed hash is an error.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, StudyError> {
    let parsed = PasswordHash::new(password_hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Hashing is CPU-bound; keep it off the async workers.
pub async fn hash_password_blocking(password: String) -> Result<String, StudyError> {
    tokio::task::spawn_blocking(move || hash_password(&password)).await?
}

pub async fn verify_password_blocking(
    password: String,
    password_hash: String,
) -> Result<bool, StudyError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &password_hash)).await?
}
