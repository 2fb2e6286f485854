//! Seed data for demonstration deployments of the pet registry.
//!
//! The crate ships a versioned JSON registry describing the breed
//! suggestion catalogue, a default account and a handful of sample pets.
//! It deliberately knows nothing about backend domain types so the backend
//! can depend on it without creating a cycle; conversion into domain values
//! happens at the point of use.
//!
//! # Example
//!
//! ```
//! use example_data::{SeedRegistry, SpeciesSeed};
//!
//! let registry = SeedRegistry::bundled().expect("bundled registry is valid");
//! assert!(!registry.breeds(SpeciesSeed::Dog).is_empty());
//! assert_eq!(registry.account().email, "admin@test.com");
//! ```

mod error;
mod registry;
mod seed;

pub use error::RegistryError;
pub use registry::SeedRegistry;
pub use seed::{AccountSeed, PetSeed, SpeciesSeed};
