//! # Password Hashing & Session Tokens
//!
//! Credential helpers for the auth repository.
//!
//! ## Security Notes
//! The original app stored a reversible hex encoding of the password and
//! derived session tokens from `user id + timestamp`. Both were flagged as
//! defects, not behavior to preserve:
//!
//! - Passwords are hashed with salted Argon2 (PHC string format). The hash
//!   lands in the `hashedPassword` field the frontend already expects, so
//!   the wire shape is unchanged even though the content is now a real hash.
//! - Session tokens are 32 bytes from the OS RNG, hex-encoded. They encode
//!   nothing and cannot be forged from public information.

use argon2::password_hash::rand_core::{OsRng, RngCore};
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::error::{StoreError, StoreResult};

/// Hashes a password with a fresh random salt.
///
/// Returns a PHC string (`$argon2id$v=19$...`) that embeds the salt and
/// parameters, so verification needs no extra state.
pub fn hash_password(password: &str) -> StoreResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| StoreError::Internal(format!("Failed to hash password: {}", e)))?;

    Ok(hash.to_string())
}

/// Verifies a password against a stored PHC hash.
///
/// An unparseable hash verifies as false rather than erroring: a corrupted
/// record must not be easier to sign into than a healthy one.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let parsed = match PasswordHash::new(stored_hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Generates a cryptographically random session token (64 hex chars).
pub fn generate_session_token() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

// =============================================================================
// Unit Tests
// =============================================================================
