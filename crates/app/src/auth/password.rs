//! Argon2id password hashing.

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{self, SaltString, rand_core::OsRng},
};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("password hash error: {0}")]
pub struct PasswordError(password_hash::Error);

/// Hash `password` into a PHC string with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(PasswordError)
}

/// `Ok(false)` for a wrong password; `Err` only for an unreadable stored hash.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(password_hash).map_err(PasswordError)?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(error) => Err(PasswordError(error)),
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn hashed_password_verifies() -> TestResult {
        let hash = hash_password("correct horse")?;

        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("correct horse", &hash)?);
        assert!(!verify_password("battery staple", &hash)?);

        Ok(())
    }

    #[test]
    fn salts_differ_between_hashes() -> TestResult {
        assert_ne!(hash_password("same")?, hash_password("same")?);

        Ok(())
    }

    #[test]
    fn garbage_hash_is_an_error() {
        assert!(verify_password("anything", "not-a-phc-string").is_err());
    }
}
