//! SHA-256 implementation of the `PasswordHasher` port.
//!
//! Digests are the lower-case hex encoding of a single unsalted SHA-256
//! pass, matching the digests already stored for existing accounts.
//! Verification recomputes the digest and compares.

use sha2::{Digest, Sha256};

use crate::domain::ports::PasswordHasher;

/// Unsalted SHA-256 hex digest hasher.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256PasswordHasher;

impl Sha256PasswordHasher {
    /// Create a new hasher.
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Sha256PasswordHasher {
    fn hash(&self, password: &str) -> String {
        hex::encode(Sha256::digest(password.as_bytes()))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        self.hash(password) == hash
    }
}
