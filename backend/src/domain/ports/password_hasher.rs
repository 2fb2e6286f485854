//! Port for salted password hashing.
//!
//! Hashing is CPU-bound and synchronous. Implementations must compare
//! digests in constant time.

use crate::domain::PasswordDigest;

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashers.
    pub enum PasswordHashError {
        /// Producing a digest failed.
        Hash { message: String } => "password hashing failed: {message}",
        /// A stored digest could not be parsed.
        MalformedDigest { message: String } => "stored password digest is malformed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash `password` with a fresh salt.
    fn hash(&self, password: &str) -> Result<PasswordDigest, PasswordHashError>;

    /// Check `password` against a stored digest.
    fn verify(&self, password: &str, digest: &PasswordDigest) -> Result<bool, PasswordHashError>;
}
