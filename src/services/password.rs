//! Password hashing with Argon2id.
//!
//! Signup and the admin user endpoint store only the PHC-format hash
//! produced here; plaintext passwords never reach the database. Each
//! hash carries its own random salt.

use anyhow::{anyhow, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Hash a plaintext password into a PHC string.
///
/// Uses Argon2id with the argon2 crate defaults and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("Failed to hash password: {}", e))?;

    Ok(hash.to_string())
}

/// Check a plaintext password against a stored PHC hash.
///
/// Returns `Ok(false)` on a mismatch. Errors only when the stored hash
/// itself cannot be parsed or verified.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| anyhow!("Invalid password hash: {}", e))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(anyhow!("Password verification failed: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let hash = hash_password("diner-secret-1").unwrap();

        assert!(verify_password("diner-secret-1", &hash).unwrap());
        assert!(!verify_password("diner-secret-2", &hash).unwrap());
    }

    #[test]
    fn test_hash_is_a_salted_phc_string() {
        let first = hash_password("same password").unwrap();
        let second = hash_password("same password").unwrap();

        assert!(first.starts_with("$argon2id$"));
        assert_ne!(first, second);
        assert!(!first.contains("same password"));
    }

    #[test]
    fn test_garbage_hash_is_an_error_not_a_mismatch() {
        assert!(verify_password("whatever", "not-a-phc-string").is_err());
    }

    #[test]
    fn test_unicode_passwords_survive_hashing() {
        let hash = hash_password("จองโต๊ะ🍽").unwrap();

        assert!(verify_password("จองโต๊ะ🍽", &hash).unwrap());
    }

    #[test]
    fn test_empty_password_still_hashes() {
        // Length rules live in the signup validation, not here
        let hash = hash_password("").unwrap();

        assert!(verify_password("", &hash).unwrap());
    }
}
