//! Port for password digesting.
//!
//! The hash scheme is an external collaborator; the domain only requires a
//! deterministic digest-and-verify pair.

/// Port for hashing and verifying account passwords.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Digest a cleartext password for storage.
    fn hash(&self, password: &str) -> String;

    /// Check a cleartext password against a stored digest.
    fn verify(&self, password: &str, hash: &str) -> bool;
}
