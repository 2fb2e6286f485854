//! Profile mutation gate.
//!
//! Changing the email or the password requires proof of the current
//! password. The checks run in a fixed order:
//!
//! 1. the caller must be authenticated;
//! 2. the payload must be well formed (a short new password is rejected
//!    here, before any re-authentication);
//! 3. the stored account must exist;
//! 4. a sensitive change must carry a matching current password;
//! 5. a new email must not belong to another account;
//! 6. the change is applied.
//!
//! Name-only changes skip step 4 entirely.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{error, info};

use crate::domain::authorization::require_identity;
use crate::domain::pets_service::map_pet_repository_error;
use crate::domain::ports::{
    PasswordHashError, PasswordHasher, PetRepository, ProfileCommand, ProfileQuery,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    Caller, Error, ProfileFields, ProfileUpdate, User, UserAccount, UserId,
};

pub(crate) fn map_user_repository_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            error!(%message, "user repository unavailable");
            Error::service_unavailable("account store is temporarily unavailable")
        }
        UserPersistenceError::Query { message } => {
            error!(%message, "user repository query failed");
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail { .. } => email_taken(),
    }
}

pub(crate) fn map_hash_error(error: PasswordHashError) -> Error {
    error!(error = %error, "password hashing failed");
    Error::internal(error.to_string())
}

pub(crate) fn email_taken() -> Error {
    Error::email_taken("email already registered").with_details(json!({
        "field": "email",
        "code": "email_taken",
    }))
}

fn missing_current_password() -> Error {
    Error::reauth_required("current password is required to change email or password")
        .with_details(json!({
            "field": "currentPassword",
            "code": "missing_current_password",
        }))
}

fn incorrect_current_password() -> Error {
    Error::reauth_required("current password is incorrect").with_details(json!({
        "field": "currentPassword",
        "code": "incorrect_current_password",
    }))
}

/// Profile service implementing [`ProfileQuery`] and [`ProfileCommand`].
#[derive(Clone)]
pub struct ProfileService<U, P> {
    users: Arc<U>,
    pets: Arc<P>,
    hasher: Arc<dyn PasswordHasher>,
}

impl<U, P> ProfileService<U, P> {
    /// Create a new service over the account and pet repositories.
    pub fn new(users: Arc<U>, pets: Arc<P>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, pets, hasher }
    }
}

impl<U, P> ProfileService<U, P>
where
    U: UserRepository,
    P: PetRepository,
{
    async fn load_account(&self, id: &UserId) -> Result<UserAccount, Error> {
        let account = self
            .users
            .find_by_id(id)
            .await
            .map_err(map_user_repository_error)?;
        account.ok_or_else(|| {
            // A verified session should always reference a live account.
            error!(user_id = %id, "session references a missing account");
            Error::not_found("account not found")
        })
    }

    fn reauthenticate(&self, account: &UserAccount, update: &ProfileUpdate) -> Result<(), Error> {
        let current = update
            .current_password
            .as_ref()
            .ok_or_else(missing_current_password)?;
        let matches = self
            .hasher
            .verify(current.as_str(), &account.password_hash)
            .map_err(map_hash_error)?;
        if matches {
            Ok(())
        } else {
            Err(incorrect_current_password())
        }
    }

    async fn ensure_email_available(&self, update: &ProfileUpdate, id: &UserId) -> Result<(), Error> {
        let holder = self
            .users
            .find_by_email(&update.email)
            .await
            .map_err(map_user_repository_error)?;
        match holder {
            Some(other) if other.id() != id => Err(email_taken()),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl<U, P> ProfileQuery for ProfileService<U, P>
where
    U: UserRepository,
    P: PetRepository,
{
    async fn fetch(&self, caller: &Caller) -> Result<User, Error> {
        let identity = require_identity(caller)?;
        Ok(self.load_account(identity).await?.user)
    }
}

#[async_trait]
impl<U, P> ProfileCommand for ProfileService<U, P>
where
    U: UserRepository,
    P: PetRepository,
{
    async fn update(&self, caller: &Caller, fields: ProfileFields<'_>) -> Result<User, Error> {
        let identity = require_identity(caller)?;
        let update = ProfileUpdate::try_from_fields(fields)?;
        let account = self.load_account(identity).await?;

        let email_changing = &update.email != account.user.email();
        let password_changing = update.new_password.is_some();
        if email_changing || password_changing {
            self.reauthenticate(&account, &update)?;
        }
        if email_changing {
            self.ensure_email_available(&update, identity).await?;
        }

        let password_hash = match &update.new_password {
            Some(password) => self.hasher.hash(password.expose()).map_err(map_hash_error)?,
            None => account.password_hash,
        };
        let user = User::new(identity.clone(), update.name, update.email);
        let revised = UserAccount::new(user, password_hash);

        let updated = self
            .users
            .update(&revised)
            .await
            .map_err(map_user_repository_error)?;
        if !updated {
            return Err(Error::not_found("account not found"));
        }

        info!(
            user_id = %identity,
            email_changed = email_changing,
            password_changed = password_changing,
            "profile updated"
        );
        Ok(revised.user)
    }

    async fn delete(&self, caller: &Caller) -> Result<(), Error> {
        let identity = require_identity(caller)?;

        let removed_pets = self
            .pets
            .delete_by_owner(identity)
            .await
            .map_err(map_pet_repository_error)?;
        let deleted = self
            .users
            .delete(identity)
            .await
            .map_err(map_user_repository_error)?;
        if !deleted {
            return Err(Error::not_found("account not found"));
        }

        info!(user_id = %identity, removed_pets, "account deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "profile_service_tests.rs"]
mod tests;
