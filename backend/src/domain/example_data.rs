//! Example data seeding orchestration.
//!
//! Turns the bundled seed registry into breeds, the default account and its
//! sample pets, then writes them through the record store ports. Every write
//! is an upsert, so seeding an already seeded store changes nothing.

use std::sync::Arc;

use example_data::{PetSeed, RegistryError, SeedRegistry, SpeciesSeed};
use mockable::Clock;
use thiserror::Error;
use tracing::info;

use crate::domain::ports::{
    BreedRepository, BreedRepositoryError, PasswordHashError, PasswordHasher, PetRepository,
    PetRepositoryError, UserPersistenceError, UserRepository,
};
use crate::domain::{
    Breed, DisplayName, EmailAddress, Pet, PetDraft, PetFields, PetText, PetTextError, RawAge,
    Species, User, UserAccount, UserId, UserValidationError, Violations,
};

/// Counts reported after a seeding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExampleDataSeedOutcome {
    /// Breeds written to the suggestion catalogue.
    pub breeds: usize,
    /// Whether the default account had to be created.
    pub account_created: bool,
    /// Sample pets written.
    pub pets: usize,
}

/// Errors raised while preparing or applying example data.
#[derive(Debug, Error)]
pub enum ExampleDataSeedingError {
    #[error("seed registry error: {0}")]
    Registry(#[from] RegistryError),
    #[error("seed breed is invalid: {0}")]
    Breed(#[from] PetTextError),
    #[error("seed account is invalid: {0}")]
    Account(#[from] UserValidationError),
    #[error("seed pet {name} is invalid: {violations}")]
    Pet { name: String, violations: Violations },
    #[error("seed account password could not be hashed: {0}")]
    Hash(#[from] PasswordHashError),
    #[error("breed persistence failed: {0}")]
    Breeds(#[from] BreedRepositoryError),
    #[error("account persistence failed: {0}")]
    Users(#[from] UserPersistenceError),
    #[error("pet persistence failed: {0}")]
    Pets(#[from] PetRepositoryError),
}

fn species_of(seed: SpeciesSeed) -> Species {
    match seed {
        SpeciesSeed::Dog => Species::Dog,
        SpeciesSeed::Cat => Species::Cat,
    }
}

fn draft_from_seed(seed: &PetSeed) -> Result<PetDraft, ExampleDataSeedingError> {
    let fields = PetFields {
        name: &seed.name,
        age: RawAge::Number(i64::from(seed.age)),
        species: seed.species.label(),
        breed: &seed.breed,
        owner_name: &seed.owner_name,
        owner_contact: &seed.owner_contact,
        image: seed.image.as_deref(),
    };
    PetDraft::try_from_fields(fields).map_err(|violations| ExampleDataSeedingError::Pet {
        name: seed.name.clone(),
        violations,
    })
}

/// Service that writes the seed registry into the record store.
#[derive(Clone)]
pub struct ExampleDataSeeder<P, U, B> {
    pets: Arc<P>,
    users: Arc<U>,
    breeds: Arc<B>,
    hasher: Arc<dyn PasswordHasher>,
    clock: Arc<dyn Clock>,
}

impl<P, U, B> ExampleDataSeeder<P, U, B> {
    pub fn new(
        pets: Arc<P>,
        users: Arc<U>,
        breeds: Arc<B>,
        hasher: Arc<dyn PasswordHasher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            pets,
            users,
            breeds,
            hasher,
            clock,
        }
    }
}

impl<P, U, B> ExampleDataSeeder<P, U, B>
where
    P: PetRepository,
    U: UserRepository,
    B: BreedRepository,
{
    /// Apply `registry` to the store.
    ///
    /// # Errors
    ///
    /// Returns [`ExampleDataSeedingError`] when a seed record fails domain
    /// validation or a store write fails. Writes made before the failure
    /// stay in place; rerunning is safe.
    pub async fn seed(
        &self,
        registry: &SeedRegistry,
    ) -> Result<ExampleDataSeedOutcome, ExampleDataSeedingError> {
        let breeds = self.seed_breeds(registry).await?;
        let (owner, account_created) = self.ensure_account(registry).await?;

        let mut pets = 0;
        for seed in registry.pets() {
            let draft = draft_from_seed(seed)?;
            let pet = Pet::register(owner.clone(), draft, self.clock.utc());
            self.pets.upsert_seed(&pet).await?;
            pets += 1;
        }

        let outcome = ExampleDataSeedOutcome {
            breeds,
            account_created,
            pets,
        };
        info!(
            breeds = outcome.breeds,
            account_created = outcome.account_created,
            pets = outcome.pets,
            "example data applied"
        );
        Ok(outcome)
    }

    async fn seed_breeds(&self, registry: &SeedRegistry) -> Result<usize, ExampleDataSeedingError> {
        let mut written = 0;
        for species in [SpeciesSeed::Dog, SpeciesSeed::Cat] {
            for name in registry.breeds(species) {
                let breed = Breed::new(PetText::new(name)?, species_of(species));
                self.breeds.upsert(&breed).await?;
                written += 1;
            }
        }
        Ok(written)
    }

    async fn ensure_account(
        &self,
        registry: &SeedRegistry,
    ) -> Result<(UserId, bool), ExampleDataSeedingError> {
        let seed = registry.account();
        let email = EmailAddress::new(&seed.email)?;
        if let Some(existing) = self.users.find_by_email(&email).await? {
            return Ok((existing.id().clone(), false));
        }

        let user = User::new(UserId::random(), DisplayName::new(seed.name.as_str())?, email);
        let digest = self.hasher.hash(&seed.password)?;
        let account = UserAccount::new(user, digest);
        self.users.create(&account).await?;
        Ok((account.id().clone(), true))
    }
}
