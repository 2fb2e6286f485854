//! Builders selecting the record store and assembling HTTP state over it.

use std::sync::Arc;

use color_eyre::eyre::{Result, WrapErr};
use mockable::DefaultClock;
use tracing::{info, warn};

use pet_registry::domain::ports::{BreedRepository, PasswordHasher, PetRepository, UserRepository};
use pet_registry::domain::{AccountsService, BreedsService, PetsService, ProfileService};
#[cfg(feature = "example-data")]
use pet_registry::example_data::{SeedTargets, seed_example_data_on_startup};
use pet_registry::inbound::http::state::{HttpState, HttpStatePorts};
use pet_registry::outbound::memory::MemoryStore;
use pet_registry::outbound::persistence::{
    DbPool, DieselBreedRepository, DieselPetRepository, DieselUserRepository,
    run_pending_migrations,
};
use pet_registry::outbound::security::Argon2PasswordHasher;

use super::config::ServerSettings;

/// Repositories backing one deployment.
pub struct Stores<U, P, B> {
    pub users: Arc<U>,
    pub pets: Arc<P>,
    pub breeds: Arc<B>,
}

impl<U, P, B> Clone for Stores<U, P, B> {
    fn clone(&self) -> Self {
        Self {
            users: self.users.clone(),
            pets: self.pets.clone(),
            breeds: self.breeds.clone(),
        }
    }
}

/// Record store chosen from the configured database URL.
pub enum Backend {
    Memory(Stores<MemoryStore, MemoryStore, MemoryStore>),
    Postgres(Stores<DieselUserRepository, DieselPetRepository, DieselBreedRepository>),
}

impl Backend {
    fn memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::Memory(Stores {
            users: store.clone(),
            pets: store.clone(),
            breeds: store,
        })
    }

    fn postgres(pool: DbPool) -> Self {
        Self::Postgres(Stores {
            users: Arc::new(DieselUserRepository::new(pool.clone())),
            pets: Arc::new(DieselPetRepository::new(pool.clone())),
            breeds: Arc::new(DieselBreedRepository::new(pool)),
        })
    }
}

/// Open the configured record store, applying migrations for PostgreSQL.
pub async fn build_backend(settings: &ServerSettings) -> Result<Backend> {
    let Some(pool_config) = settings
        .pool_config()
        .wrap_err("invalid database settings")?
    else {
        warn!("no database URL configured; records live in memory and are lost on restart");
        return Ok(Backend::memory());
    };

    run_pending_migrations(pool_config.database_url())
        .await
        .wrap_err("failed to migrate database")?;
    let pool = DbPool::new(pool_config)
        .await
        .wrap_err("failed to build database pool")?;
    info!("connected to PostgreSQL record store");
    Ok(Backend::postgres(pool))
}

/// Wire the domain services over `stores` into handler state.
pub fn build_http_state<U, P, B>(
    stores: &Stores<U, P, B>,
    hasher: Arc<dyn PasswordHasher>,
) -> HttpState
where
    U: UserRepository + 'static,
    P: PetRepository + 'static,
    B: BreedRepository + 'static,
{
    let accounts = Arc::new(AccountsService::new(stores.users.clone(), hasher.clone()));
    let profile = Arc::new(ProfileService::new(
        stores.users.clone(),
        stores.pets.clone(),
        hasher,
    ));
    let pets = Arc::new(PetsService::new(
        stores.pets.clone(),
        stores.users.clone(),
        Arc::new(DefaultClock),
    ));
    HttpState::new(HttpStatePorts {
        login: accounts.clone(),
        registration: accounts,
        profile: profile.clone(),
        profile_command: profile,
        pets: pets.clone(),
        pets_command: pets,
        breeds: Arc::new(BreedsService::new(stores.breeds.clone())),
    })
}

#[cfg(feature = "example-data")]
async fn seed<U, P, B>(
    settings: &ServerSettings,
    stores: &Stores<U, P, B>,
    hasher: Arc<dyn PasswordHasher>,
) -> Result<()>
where
    U: UserRepository,
    P: PetRepository,
    B: BreedRepository,
{
    let targets = SeedTargets {
        pets: stores.pets.clone(),
        users: stores.users.clone(),
        breeds: stores.breeds.clone(),
        hasher,
    };
    seed_example_data_on_startup(&settings.example_data(), targets)
        .await
        .wrap_err("example data seeding failed")?;
    Ok(())
}

#[cfg(not(feature = "example-data"))]
async fn seed<U, P, B>(
    settings: &ServerSettings,
    _stores: &Stores<U, P, B>,
    _hasher: Arc<dyn PasswordHasher>,
) -> Result<()> {
    if settings.seed_enabled {
        warn!("seeding requested but the example-data feature is disabled");
    }
    Ok(())
}

/// Seed the store when enabled and return the handler state.
pub async fn prepare_state(settings: &ServerSettings, backend: &Backend) -> Result<HttpState> {
    let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::new());
    match backend {
        Backend::Memory(stores) => {
            seed(settings, stores, hasher.clone()).await?;
            Ok(build_http_state(stores, hasher))
        }
        Backend::Postgres(stores) => {
            seed(settings, stores, hasher.clone()).await?;
            Ok(build_http_state(stores, hasher))
        }
    }
}
