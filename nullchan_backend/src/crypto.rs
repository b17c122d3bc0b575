//! Delete-password storage.
//!
//! Posts carry a shared secret that authorizes their deletion. The secret is
//! stored as an Argon2id PHC hash; verification happens inside the argon2
//! crate in constant time.

use anyhow::{anyhow, Result};
use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Hash a delete password for storage.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| anyhow!("password hashing failed: {err}"))
}

/// Verify a candidate password against a stored PHC hash.
///
/// A malformed stored hash counts as a failed verification rather than an
/// error: the caller only needs an authorized/unauthorized outcome.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
