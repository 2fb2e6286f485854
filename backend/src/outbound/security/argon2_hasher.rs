//! Argon2id implementation of the password hashing port.
//!
//! Digests are PHC strings, so the algorithm parameters and salt travel with
//! each stored hash and verification keeps working if the defaults change.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    self, PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use argon2::Argon2;

use crate::domain::PasswordDigest;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Argon2id hasher with per-digest random salts.
#[derive(Clone)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }
}

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Minimal-cost parameters for tests. Never use in production.
    #[cfg(any(test, feature = "test-support"))]
    pub fn insecure_fast() -> Self {
        use argon2::{Algorithm, Params, Version};

        let params = Params::new(Params::MIN_M_COST, Params::MIN_T_COST, 1, None)
            .unwrap_or_default();
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<PasswordDigest, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| PasswordHashError::hash(err.to_string()))?;
        Ok(PasswordDigest::new(hash.to_string()))
    }

    fn verify(&self, password: &str, digest: &PasswordDigest) -> Result<bool, PasswordHashError> {
        let parsed = PasswordHash::new(digest.as_str())
            .map_err(|err| PasswordHashError::malformed_digest(err.to_string()))?;
        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(err) => Err(PasswordHashError::hash(err.to_string())),
        }
    }
}
