//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    BreedsQuery, LoginService, PetsCommand, PetsQuery, ProfileCommand, ProfileQuery,
    RegistrationService,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub profile: Arc<dyn ProfileQuery>,
    pub profile_command: Arc<dyn ProfileCommand>,
    pub pets: Arc<dyn PetsQuery>,
    pub pets_command: Arc<dyn PetsCommand>,
    pub breeds: Arc<dyn BreedsQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub profile: Arc<dyn ProfileQuery>,
    pub profile_command: Arc<dyn ProfileCommand>,
    pub pets: Arc<dyn PetsQuery>,
    pub pets_command: Arc<dyn PetsCommand>,
    pub breeds: Arc<dyn BreedsQuery>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use pet_registry::domain::{AccountsService, BreedsService, PetsService, ProfileService};
    /// use pet_registry::inbound::http::state::{HttpState, HttpStatePorts};
    /// use pet_registry::outbound::memory::MemoryStore;
    /// use pet_registry::outbound::security::Argon2PasswordHasher;
    ///
    /// let store = Arc::new(MemoryStore::default());
    /// let hasher = Arc::new(Argon2PasswordHasher::new());
    /// let accounts = Arc::new(AccountsService::new(store.clone(), hasher.clone()));
    /// let profile = Arc::new(ProfileService::new(store.clone(), store.clone(), hasher));
    /// let pets = Arc::new(PetsService::new(store.clone(), store.clone(), Arc::new(DefaultClock)));
    /// let state = HttpState::new(HttpStatePorts {
    ///     login: accounts.clone(),
    ///     registration: accounts,
    ///     profile: profile.clone(),
    ///     profile_command: profile,
    ///     pets: pets.clone(),
    ///     pets_command: pets,
    ///     breeds: Arc::new(BreedsService::new(store)),
    /// });
    /// let _login = state.login.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            registration,
            profile,
            profile_command,
            pets,
            pets_command,
            breeds,
        } = ports;
        Self {
            login,
            registration,
            profile,
            profile_command,
            pets,
            pets_command,
            breeds,
        }
    }
}
