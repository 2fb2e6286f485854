//! Driving port for creating, updating and deleting pets.
//!
//! Implementations check, in order: identity (401), existence (404),
//! ownership (403) and finally field validation (400).

use async_trait::async_trait;

use crate::domain::{Caller, Error, Pet, PetFields, PetId};

#[async_trait]
pub trait PetsCommand: Send + Sync {
    /// Register a pet owned by the caller.
    async fn create(&self, caller: &Caller, fields: PetFields<'_>) -> Result<Pet, Error>;

    /// Replace the fields of a pet the caller owns.
    async fn update(&self, caller: &Caller, id: &PetId, fields: PetFields<'_>)
    -> Result<Pet, Error>;

    /// Delete a pet the caller owns.
    async fn delete(&self, caller: &Caller, id: &PetId) -> Result<(), Error>;
}
