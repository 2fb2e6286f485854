//! Account registration and login.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{LoginService, PasswordHasher, RegistrationService, UserRepository};
use crate::domain::profile_service::{email_taken, map_hash_error, map_user_repository_error};
use crate::domain::{Error, LoginCredentials, Registration, User, UserAccount, UserId};

fn invalid_credentials() -> Error {
    Error::unauthorized("invalid credentials")
}

/// Account service implementing [`RegistrationService`] and [`LoginService`].
#[derive(Clone)]
pub struct AccountsService<U> {
    users: Arc<U>,
    hasher: Arc<dyn PasswordHasher>,
}

impl<U> AccountsService<U> {
    pub fn new(users: Arc<U>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }
}

#[async_trait]
impl<U> RegistrationService for AccountsService<U>
where
    U: UserRepository,
{
    async fn register(&self, registration: Registration) -> Result<User, Error> {
        let Registration {
            name,
            email,
            password,
        } = registration;

        let existing = self
            .users
            .find_by_email(&email)
            .await
            .map_err(map_user_repository_error)?;
        if existing.is_some() {
            return Err(email_taken());
        }

        let digest = self
            .hasher
            .hash(password.expose())
            .map_err(map_hash_error)?;
        let account = UserAccount::new(User::new(UserId::random(), name, email), digest);
        // The store's unique index settles concurrent registrations.
        self.users
            .create(&account)
            .await
            .map_err(map_user_repository_error)?;

        info!(user_id = %account.id(), "account registered");
        Ok(account.user)
    }
}

#[async_trait]
impl<U> LoginService for AccountsService<U>
where
    U: UserRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let Some(account) = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_repository_error)?
        else {
            debug!("login refused: unknown email");
            return Err(invalid_credentials());
        };

        let matches = self
            .hasher
            .verify(credentials.password(), &account.password_hash)
            .map_err(map_hash_error)?;
        if !matches {
            debug!(user_id = %account.id(), "login refused: password mismatch");
            return Err(invalid_credentials());
        }

        info!(user_id = %account.id(), "login succeeded");
        Ok(account.user)
    }
}
