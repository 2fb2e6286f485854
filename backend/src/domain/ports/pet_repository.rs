//! Port abstraction for pet persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Pet, PetFilter, PetId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by pet repository adapters.
    pub enum PetRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "pet repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "pet repository query failed: {message}",
    }
}

/// Record store contract for pets.
///
/// Every operation is atomic for a single record. Listings are ordered by
/// `created_at` descending with `id` ascending as the tie-break so page
/// boundaries are stable.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PetRepository: Send + Sync {
    /// Insert a new pet.
    async fn create(&self, pet: &Pet) -> Result<(), PetRepositoryError>;

    /// Overwrite an existing pet. Returns `false` when the row no longer
    /// exists, for example after a concurrent delete.
    async fn update(&self, pet: &Pet) -> Result<bool, PetRepositoryError>;

    /// Delete a pet. Returns `false` when nothing was deleted.
    async fn delete(&self, id: &PetId) -> Result<bool, PetRepositoryError>;

    /// Fetch a pet by identifier.
    async fn find_by_id(&self, id: &PetId) -> Result<Option<Pet>, PetRepositoryError>;

    /// Page through pets matching `filter`.
    async fn list(
        &self,
        filter: &PetFilter,
        offset: u64,
        limit: u32,
    ) -> Result<Vec<Pet>, PetRepositoryError>;

    /// Count pets matching `filter`.
    async fn count(&self, filter: &PetFilter) -> Result<u64, PetRepositoryError>;

    /// Delete every pet owned by `owner`, returning how many went.
    async fn delete_by_owner(&self, owner: &UserId) -> Result<u64, PetRepositoryError>;

    /// Insert `pet`, or overwrite the pet already registered by the same
    /// owner under the same name and caretaker. Used by seeding.
    async fn upsert_seed(&self, pet: &Pet) -> Result<(), PetRepositoryError>;
}
