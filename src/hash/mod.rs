//! Password hash verification
//!
//! Verifies plaintext secrets against stored bcrypt hashes. The stored
//! string encodes its own salt and cost, and the underlying comparison is
//! constant-time.

use log::warn;

/// Fixed well-formed bcrypt hash matching no password anyone uses.
///
/// Lookups for usernames absent from the credential map still verify
/// against this hash so that an unknown user and a wrong secret take
/// statistically indistinguishable time.
pub const DUMMY_HASH: &str = "$2b$12$LQv3c1yqBWVHxkd0LHAkCOYz6TtxMQJqhN8/LewdBPj4J/HS.iK8W";

/// Verifies a plaintext secret against a stored bcrypt hash.
///
/// A stored hash the verifier cannot parse counts as a mismatch: a broken
/// credential entry locks that user out rather than letting anyone in.
pub fn verify(secret: &str, stored_hash: &str) -> bool {
    match bcrypt::verify(secret, stored_hash) {
        Ok(matched) => matched,
        Err(e) => {
            warn!("Stored hash rejected by verifier: {}", e);
            false
        }
    }
}

/// Burn the same bcrypt work as a real verification without revealing
/// anything about map membership.
pub fn verify_dummy(secret: &str) {
    let _ = verify(secret, DUMMY_HASH);
}
