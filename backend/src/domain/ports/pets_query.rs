//! Driving port for reading pets.
//!
//! Reads are not owner-scoped: any verified identity may list or fetch any
//! pet. Anonymous callers are refused.

use async_trait::async_trait;

use crate::domain::{Caller, Error, ListingOutcome, Pet, PetId, PetListingRequest};

#[async_trait]
pub trait PetsQuery: Send + Sync {
    /// Compose one page of pets together with the query total and facets.
    async fn list(
        &self,
        caller: &Caller,
        request: PetListingRequest,
    ) -> Result<ListingOutcome, Error>;

    /// Fetch a single pet.
    async fn fetch(&self, caller: &Caller, id: &PetId) -> Result<Pet, Error>;
}
