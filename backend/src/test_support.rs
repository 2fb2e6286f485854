//! Test utilities shared by unit tests (in `src/`) and integration tests
//! (in `tests/`). Compiled for tests and under the `test-support` feature.

use std::sync::Arc;

use mockable::DefaultClock;

use crate::domain::{AccountsService, BreedsService, PetsService, ProfileService};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::MemoryStore;
use crate::outbound::security::Argon2PasswordHasher;

/// Real services over an empty in-memory store, with a cheap hasher.
///
/// The store is returned alongside the state so tests can arrange records
/// directly through the repository ports.
///
/// # Examples
///
/// ```rust
/// use pet_registry::test_support::memory_state;
///
/// let (_state, _store) = memory_state();
/// ```
pub fn memory_state() -> (HttpState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let hasher = Arc::new(Argon2PasswordHasher::insecure_fast());
    let accounts = Arc::new(AccountsService::new(store.clone(), hasher.clone()));
    let profile = Arc::new(ProfileService::new(store.clone(), store.clone(), hasher));
    let pets = Arc::new(PetsService::new(store.clone(), store.clone(), Arc::new(DefaultClock)));
    let state = HttpState::new(HttpStatePorts {
        login: accounts.clone(),
        registration: accounts,
        profile: profile.clone(),
        profile_command: profile,
        pets: pets.clone(),
        pets_command: pets,
        breeds: Arc::new(BreedsService::new(store.clone())),
    });
    (state, store)
}
