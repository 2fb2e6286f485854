//! In-process record store.
//!
//! [`MemoryStore`] implements every repository port over plain collections
//! behind one mutex, so a single instance must back all three ports for
//! email uniqueness and the owner cascade to hold. It serves deployments
//! without a database and the HTTP integration tests.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    BreedRepository, BreedRepositoryError, PetRepository, PetRepositoryError,
    UserPersistenceError, UserRepository,
};
use crate::domain::{Breed, EmailAddress, Pet, PetFilter, PetId, Species, UserAccount, UserId};

const POISONED: &str = "memory store lock poisoned";

#[derive(Debug, Default)]
struct State {
    users: HashMap<UserId, UserAccount>,
    pets: HashMap<PetId, Pet>,
    breeds: Vec<Breed>,
}

impl State {
    fn email_holder(&self, email: &EmailAddress) -> Option<&UserAccount> {
        self.users
            .values()
            .find(|account| account.user.email() == email)
    }

    fn matching_pets<'a>(&'a self, filter: &'a PetFilter) -> impl Iterator<Item = &'a Pet> + 'a {
        self.pets.values().filter(move |pet| filter.matches(pet))
    }
}

/// Record store kept in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, &'static str> {
        self.state.lock().map_err(|_| POISONED)
    }
}

fn newest_first(left: &Pet, right: &Pet) -> std::cmp::Ordering {
    right
        .created_at
        .cmp(&left.created_at)
        .then_with(|| left.id.cmp(&right.id))
}

#[async_trait]
impl PetRepository for MemoryStore {
    async fn create(&self, pet: &Pet) -> Result<(), PetRepositoryError> {
        let mut state = self.lock().map_err(PetRepositoryError::query)?;
        state.pets.insert(pet.id, pet.clone());
        Ok(())
    }

    async fn update(&self, pet: &Pet) -> Result<bool, PetRepositoryError> {
        let mut state = self.lock().map_err(PetRepositoryError::query)?;
        match state.pets.get_mut(&pet.id) {
            Some(stored) => {
                *stored = pet.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &PetId) -> Result<bool, PetRepositoryError> {
        let mut state = self.lock().map_err(PetRepositoryError::query)?;
        Ok(state.pets.remove(id).is_some())
    }

    async fn find_by_id(&self, id: &PetId) -> Result<Option<Pet>, PetRepositoryError> {
        let state = self.lock().map_err(PetRepositoryError::query)?;
        Ok(state.pets.get(id).cloned())
    }

    async fn list(
        &self,
        filter: &PetFilter,
        offset: u64,
        limit: u32,
    ) -> Result<Vec<Pet>, PetRepositoryError> {
        let state = self.lock().map_err(PetRepositoryError::query)?;
        let mut pets: Vec<Pet> = state.matching_pets(filter).cloned().collect();
        pets.sort_by(newest_first);
        let skip = usize::try_from(offset).unwrap_or(usize::MAX);
        let take = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(pets.into_iter().skip(skip).take(take).collect())
    }

    async fn count(&self, filter: &PetFilter) -> Result<u64, PetRepositoryError> {
        let state = self.lock().map_err(PetRepositoryError::query)?;
        let total = state.matching_pets(filter).count();
        Ok(u64::try_from(total).unwrap_or(u64::MAX))
    }

    async fn delete_by_owner(&self, owner: &UserId) -> Result<u64, PetRepositoryError> {
        let mut state = self.lock().map_err(PetRepositoryError::query)?;
        let before = state.pets.len();
        state.pets.retain(|_, pet| !pet.is_owned_by(owner));
        Ok(u64::try_from(before - state.pets.len()).unwrap_or(u64::MAX))
    }

    async fn upsert_seed(&self, pet: &Pet) -> Result<(), PetRepositoryError> {
        let mut state = self.lock().map_err(PetRepositoryError::query)?;
        let existing = state.pets.values_mut().find(|stored| {
            stored.owner_user_id == pet.owner_user_id
                && stored.draft.name == pet.draft.name
                && stored.draft.owner_name == pet.draft.owner_name
        });
        match existing {
            Some(stored) => {
                stored.draft = pet.draft.clone();
                stored.updated_at = pet.updated_at.max(stored.created_at);
            }
            None => {
                state.pets.insert(pet.id, pet.clone());
            }
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        let mut state = self.lock().map_err(UserPersistenceError::query)?;
        if state.email_holder(account.user.email()).is_some() {
            return Err(UserPersistenceError::duplicate_email(account.user.email().as_ref()));
        }
        state.users.insert(account.id().clone(), account.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, UserPersistenceError> {
        let state = self.lock().map_err(UserPersistenceError::query)?;
        Ok(state.users.get(id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        let state = self.lock().map_err(UserPersistenceError::query)?;
        Ok(state.email_holder(email).cloned())
    }

    async fn update(&self, account: &UserAccount) -> Result<bool, UserPersistenceError> {
        let mut state = self.lock().map_err(UserPersistenceError::query)?;
        let clash = state
            .email_holder(account.user.email())
            .is_some_and(|holder| holder.id() != account.id());
        if clash {
            return Err(UserPersistenceError::duplicate_email(account.user.email().as_ref()));
        }
        match state.users.get_mut(account.id()) {
            Some(stored) => {
                *stored = account.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError> {
        let mut state = self.lock().map_err(UserPersistenceError::query)?;
        let removed = state.users.remove(id).is_some();
        if removed {
            state.pets.retain(|_, pet| !pet.is_owned_by(id));
        }
        Ok(removed)
    }
}

#[async_trait]
impl BreedRepository for MemoryStore {
    async fn list(&self, species: Option<Species>) -> Result<Vec<Breed>, BreedRepositoryError> {
        let state = self.lock().map_err(BreedRepositoryError::query)?;
        Ok(state
            .breeds
            .iter()
            .filter(|breed| species.is_none_or(|wanted| breed.species == wanted))
            .cloned()
            .collect())
    }

    async fn upsert(&self, breed: &Breed) -> Result<(), BreedRepositoryError> {
        let mut state = self.lock().map_err(BreedRepositoryError::query)?;
        if !state.breeds.contains(breed) {
            state.breeds.push(breed.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
