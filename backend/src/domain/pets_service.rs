//! Pet domain services.
//!
//! [`PetsService`] implements both pet driving ports. Every call resolves the
//! caller through the authorization guard before touching the record store.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{error, info, warn};

use crate::domain::authorization::{authorize_mutation, require_identity};
use crate::domain::pet_search::compose_listing;
use crate::domain::ports::{
    PetRepository, PetRepositoryError, PetsCommand, PetsQuery, UserRepository,
};
use crate::domain::profile_service::map_user_repository_error;
use crate::domain::{
    Caller, Error, ListingOutcome, Pet, PetDraft, PetFields, PetId, PetListingRequest, UserId,
};

pub(crate) fn map_pet_repository_error(error: PetRepositoryError) -> Error {
    match error {
        PetRepositoryError::Connection { message } => {
            error!(%message, "pet repository unavailable");
            Error::service_unavailable("pet registry is temporarily unavailable")
        }
        PetRepositoryError::Query { message } => {
            error!(%message, "pet repository query failed");
            Error::internal(format!("pet repository error: {message}"))
        }
    }
}

fn pet_not_found(id: &PetId) -> Error {
    Error::not_found(format!("pet {id} not found"))
}

/// Pet service implementing [`PetsQuery`] and [`PetsCommand`].
#[derive(Clone)]
pub struct PetsService<R, U> {
    pets: Arc<R>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<R, U> PetsService<R, U> {
    /// Create a new service over the pet and account repositories.
    pub fn new(pets: Arc<R>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self { pets, users, clock }
    }
}

impl<R, U> PetsService<R, U>
where
    R: PetRepository,
    U: UserRepository,
{
    /// A session may outlive its account; new records need a live owner.
    async fn ensure_account(&self, owner: &UserId) -> Result<(), Error> {
        let account = self
            .users
            .find_by_id(owner)
            .await
            .map_err(map_user_repository_error)?;
        if account.is_none() {
            warn!(user_id = %owner, "session references a deleted account");
            return Err(Error::unauthorized("account no longer exists"));
        }
        Ok(())
    }

    async fn load(&self, id: &PetId) -> Result<Pet, Error> {
        self.pets
            .find_by_id(id)
            .await
            .map_err(map_pet_repository_error)?
            .ok_or_else(|| pet_not_found(id))
    }
}

#[async_trait]
impl<R, U> PetsQuery for PetsService<R, U>
where
    R: PetRepository,
    U: UserRepository,
{
    async fn list(
        &self,
        caller: &Caller,
        request: PetListingRequest,
    ) -> Result<ListingOutcome, Error> {
        require_identity(caller)?;
        compose_listing(self.pets.as_ref(), request)
            .await
            .map_err(map_pet_repository_error)
    }

    async fn fetch(&self, caller: &Caller, id: &PetId) -> Result<Pet, Error> {
        require_identity(caller)?;
        self.load(id).await
    }
}

#[async_trait]
impl<R, U> PetsCommand for PetsService<R, U>
where
    R: PetRepository,
    U: UserRepository,
{
    async fn create(&self, caller: &Caller, fields: PetFields<'_>) -> Result<Pet, Error> {
        let owner = require_identity(caller)?;
        let draft = PetDraft::try_from_fields(fields)?;
        self.ensure_account(owner).await?;
        let pet = Pet::register(owner.clone(), draft, self.clock.utc());

        self.pets
            .create(&pet)
            .await
            .map_err(map_pet_repository_error)?;

        info!(pet_id = %pet.id, owner = %owner, "pet registered");
        Ok(pet)
    }

    async fn update(
        &self,
        caller: &Caller,
        id: &PetId,
        fields: PetFields<'_>,
    ) -> Result<Pet, Error> {
        require_identity(caller)?;
        let current = self.load(id).await?;
        authorize_mutation(caller, &current)?;
        let draft = PetDraft::try_from_fields(fields)?;
        let revised = current.revise(draft, self.clock.utc());

        let updated = self
            .pets
            .update(&revised)
            .await
            .map_err(map_pet_repository_error)?;
        if !updated {
            // Deleted between the ownership check and the write.
            return Err(pet_not_found(id));
        }

        info!(pet_id = %id, "pet updated");
        Ok(revised)
    }

    async fn delete(&self, caller: &Caller, id: &PetId) -> Result<(), Error> {
        require_identity(caller)?;
        let current = self.load(id).await?;
        authorize_mutation(caller, &current)?;

        let deleted = self
            .pets
            .delete(id)
            .await
            .map_err(map_pet_repository_error)?;
        if !deleted {
            return Err(pet_not_found(id));
        }

        info!(pet_id = %id, "pet deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "pets_service_tests.rs"]
mod tests;
