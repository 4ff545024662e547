//! Password hashing
//!
//! New hashes are Argon2id PHC strings with a random salt. Hashes written by
//! older installs are bare hex SHA-256 digests without a salt; those still
//! verify so existing accounts keep working, and [`needs_rehash`] tells the
//! caller to replace them.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use sha2::{Digest, Sha256};

use crate::error::{FarmbookError, FarmbookResult};

/// Hash a password for storage
pub fn hash_password(password: &str) -> FarmbookResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| FarmbookError::Auth(format!("Password hashing failed: {}", e)))?;
    Ok(hash.to_string())
}

/// Check a password against a stored hash
///
/// Unrecognised hash formats never verify.
pub fn verify_password(password: &str, stored: &str) -> bool {
    if is_legacy_hash(stored) {
        return legacy_digest(password).eq_ignore_ascii_case(stored);
    }

    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Whether a stored hash uses the old unsalted format
pub fn needs_rehash(stored: &str) -> bool {
    is_legacy_hash(stored)
}

fn is_legacy_hash(stored: &str) -> bool {
    stored.len() == 64 && stored.bytes().all(|b| b.is_ascii_hexdigit())
}

fn legacy_digest(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}
