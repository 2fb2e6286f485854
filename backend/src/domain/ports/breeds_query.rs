//! Driving port for breed suggestions.

use async_trait::async_trait;

use crate::domain::{Error, Species};

#[async_trait]
pub trait BreedsQuery: Send + Sync {
    /// Breed names for `species` (or all species) ordered by name.
    async fn names(&self, species: Option<Species>) -> Result<Vec<String>, Error>;
}
