//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, the password hasher) describe what the domain
//! needs from infrastructure. Driving ports describe the use-cases inbound
//! adapters may call.

mod macros;
pub(crate) use macros::define_port_error;

mod breed_repository;
mod breeds_query;
mod login_service;
mod password_hasher;
mod pet_repository;
mod pets_command;
mod pets_query;
mod profile;
mod registration_service;
mod user_repository;

#[cfg(test)]
pub use breed_repository::MockBreedRepository;
pub use breed_repository::{BreedRepository, BreedRepositoryError};
pub use breeds_query::BreedsQuery;
pub use login_service::LoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use pet_repository::MockPetRepository;
pub use pet_repository::{PetRepository, PetRepositoryError};
pub use pets_command::PetsCommand;
pub use pets_query::PetsQuery;
pub use profile::{ProfileCommand, ProfileQuery};
pub use registration_service::RegistrationService;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
