//! Port abstraction for the breed suggestion catalogue.
use async_trait::async_trait;

use crate::domain::{Breed, Species};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by breed repository adapters.
    pub enum BreedRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "breed repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "breed repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BreedRepository: Send + Sync {
    /// Breeds of one species, or of every species when `None`, in any order.
    async fn list(&self, species: Option<Species>) -> Result<Vec<Breed>, BreedRepositoryError>;

    /// Insert a breed unless the `(name, species)` pair already exists.
    async fn upsert(&self, breed: &Breed) -> Result<(), BreedRepositoryError>;
}
