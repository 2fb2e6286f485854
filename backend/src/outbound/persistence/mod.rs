//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories translate between Diesel rows (`models.rs`, `schema.rs`)
//! and domain types; neither row type leaves this module. Connections come
//! from a shared `bb8` pool through `diesel-async`, and every Diesel failure
//! is mapped to the owning port's error type.
//!
//! # Example
//!
//! ```no_run
//! use pet_registry::outbound::persistence::{DbPool, DieselPetRepository, PoolConfig};
//!
//! # async fn connect() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/pets")).await?;
//! let pets = DieselPetRepository::new(pool);
//! # let _ = pets;
//! # Ok(())
//! # }
//! ```

mod diesel_breed_repository;
mod diesel_error_mapping;
mod diesel_pet_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_breed_repository::DieselBreedRepository;
pub use diesel_pet_repository::DieselPetRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
