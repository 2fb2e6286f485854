//! Startup seeding orchestration.

use std::path::Path;
use std::sync::Arc;

use example_data::{RegistryError, SeedRegistry};
use mockable::DefaultClock;
use thiserror::Error;
use tracing::info;

use crate::domain::ports::{BreedRepository, PasswordHasher, PetRepository, UserRepository};
use crate::domain::{ExampleDataSeedOutcome, ExampleDataSeeder, ExampleDataSeedingError};
use crate::example_data::config::ExampleDataSettings;

/// Errors returned while executing startup seeding.
#[derive(Debug, Error)]
pub enum StartupSeedingError {
    /// Registry loading or parsing failed.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
    /// Seed conversion or persistence failed.
    #[error("example data seeding error: {0}")]
    Seeding(#[from] ExampleDataSeedingError),
}

/// Record store handles the seeder writes through.
pub struct SeedTargets<P, U, B> {
    pub pets: Arc<P>,
    pub users: Arc<U>,
    pub breeds: Arc<B>,
    pub hasher: Arc<dyn PasswordHasher>,
}

/// Apply example data on startup when enabled.
///
/// Returns `Ok(None)` when seeding is disabled.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
///
/// use pet_registry::example_data::{ExampleDataSettings, SeedTargets, seed_example_data_on_startup};
/// use pet_registry::outbound::memory::MemoryStore;
/// use pet_registry::outbound::security::Argon2PasswordHasher;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let store = Arc::new(MemoryStore::new());
/// let targets = SeedTargets {
///     pets: store.clone(),
///     users: store.clone(),
///     breeds: store,
///     hasher: Arc::new(Argon2PasswordHasher::new()),
/// };
/// let settings = ExampleDataSettings { enabled: true, registry_path: None };
/// let outcome = seed_example_data_on_startup(&settings, targets).await?;
/// assert!(outcome.is_some());
/// # Ok(())
/// # }
/// ```
pub async fn seed_example_data_on_startup<P, U, B>(
    settings: &ExampleDataSettings,
    targets: SeedTargets<P, U, B>,
) -> Result<Option<ExampleDataSeedOutcome>, StartupSeedingError>
where
    P: PetRepository,
    U: UserRepository,
    B: BreedRepository,
{
    if !settings.is_enabled() {
        info!(reason = "disabled", "example data seeding skipped");
        return Ok(None);
    }

    let registry = load_registry(settings.registry_path())?;
    let seeder = ExampleDataSeeder::new(
        targets.pets,
        targets.users,
        targets.breeds,
        targets.hasher,
        Arc::new(DefaultClock),
    );
    let outcome = seeder.seed(&registry).await?;
    Ok(Some(outcome))
}

fn load_registry(path: Option<&Path>) -> Result<SeedRegistry, RegistryError> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "loading example data registry");
            SeedRegistry::from_file(path)
        }
        None => SeedRegistry::bundled(),
    }
}

#[cfg(test)]
mod tests {
    //! Startup seeding against the in-memory store.

    use std::io::Write;

    use super::*;
    use crate::domain::ports::{BreedRepository, UserRepository};
    use crate::domain::{EmailAddress, Species};
    use crate::outbound::memory::MemoryStore;
    use crate::outbound::security::Argon2PasswordHasher;
    use rstest::rstest;

    fn targets(store: &Arc<MemoryStore>) -> SeedTargets<MemoryStore, MemoryStore, MemoryStore> {
        SeedTargets {
            pets: store.clone(),
            users: store.clone(),
            breeds: store.clone(),
            hasher: Arc::new(Argon2PasswordHasher::insecure_fast()),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn disabled_settings_skip_seeding() {
        let store = Arc::new(MemoryStore::new());
        let outcome = seed_example_data_on_startup(&ExampleDataSettings::default(), targets(&store))
            .await
            .expect("disabled seeding succeeds");
        assert!(outcome.is_none());
        assert!(
            BreedRepository::list(&*store, Some(Species::Dog))
                .await
                .expect("breeds listed")
                .is_empty()
        );
    }

    #[rstest]
    #[tokio::test]
    async fn bundled_registry_seeds_account_and_breeds() {
        let store = Arc::new(MemoryStore::new());
        let settings = ExampleDataSettings {
            enabled: true,
            registry_path: None,
        };
        let outcome = seed_example_data_on_startup(&settings, targets(&store))
            .await
            .expect("seeding succeeds")
            .expect("seeding ran");
        assert!(outcome.account_created);
        assert!(outcome.breeds > 0);

        let email = EmailAddress::new("admin@test.com").expect("valid email");
        let account = UserRepository::find_by_email(&*store, &email)
            .await
            .expect("lookup works");
        assert!(account.is_some());
    }

    #[rstest]
    #[tokio::test]
    async fn registry_file_override_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"{{
                "version": 1,
                "breeds": {{"DOG": ["Beagle"], "CAT": ["Persa"]}},
                "account": {{"name": "Ada", "email": "ada@example.com", "password": "secret1"}},
                "pets": []
            }}"#
        )
        .expect("write registry");
        let store = Arc::new(MemoryStore::new());
        let settings = ExampleDataSettings {
            enabled: true,
            registry_path: Some(file.path().to_path_buf()),
        };
        let outcome = seed_example_data_on_startup(&settings, targets(&store))
            .await
            .expect("seeding succeeds")
            .expect("seeding ran");
        assert_eq!(outcome.breeds, 2);
        assert_eq!(outcome.pets, 0);
    }

    #[rstest]
    #[tokio::test]
    async fn missing_registry_file_is_reported() {
        let store = Arc::new(MemoryStore::new());
        let settings = ExampleDataSettings {
            enabled: true,
            registry_path: Some("/nonexistent/registry.json".into()),
        };
        let err = seed_example_data_on_startup(&settings, targets(&store))
            .await
            .expect_err("missing file fails");
        assert!(matches!(err, StartupSeedingError::Registry(_)));
    }
}
