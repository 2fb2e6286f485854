//! Driving ports for the caller's own profile.

use async_trait::async_trait;

use crate::domain::{Caller, Error, ProfileFields, User};

/// Read the caller's profile.
#[async_trait]
pub trait ProfileQuery: Send + Sync {
    async fn fetch(&self, caller: &Caller) -> Result<User, Error>;
}

/// Mutate or delete the caller's profile.
#[async_trait]
pub trait ProfileCommand: Send + Sync {
    /// Apply a profile change through the re-authentication gate.
    async fn update(&self, caller: &Caller, fields: ProfileFields<'_>) -> Result<User, Error>;

    /// Delete the caller's account and every pet it owns.
    async fn delete(&self, caller: &Caller) -> Result<(), Error>;
}
