//! PostgreSQL-backed `PetRepository` implementation using Diesel ORM.
//!
//! Listing, counting and the species facets share one predicate builder,
//! [`filter_query`], so the three queries can never disagree about which
//! rows match.

use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::sql_types::Bool;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{PetRepository, PetRepositoryError};
use crate::domain::{
    Pet, PetAge, PetDraft, PetFilter, PetId, PetText, SearchField, SearchTerm, Species, UserId,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewPetRow, PetRow, PetUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::pets;

type PetPredicate = Box<dyn BoxableExpression<pets::table, Pg, SqlType = Bool>>;

/// Diesel-backed implementation of the `PetRepository` port.
#[derive(Clone)]
pub struct DieselPetRepository {
    pool: DbPool,
}

impl DieselPetRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> PetRepositoryError {
    map_pool_error(error, PetRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> PetRepositoryError {
    map_diesel_error(
        error,
        PetRepositoryError::query,
        PetRepositoryError::connection,
    )
}

/// Escape `LIKE` metacharacters and wrap the term for substring matching.
fn like_pattern(term: &SearchTerm) -> String {
    let mut pattern = String::with_capacity(term.as_str().len() + 2);
    pattern.push('%');
    for ch in term.as_str().chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn field_matches(field: SearchField, pattern: String) -> PetPredicate {
    match field {
        SearchField::Name => Box::new(pets::name.ilike(pattern)),
        SearchField::Breed => Box::new(pets::breed.ilike(pattern)),
        SearchField::OwnerName => Box::new(pets::owner_name.ilike(pattern)),
    }
}

fn filter_query<'a>(filter: &PetFilter) -> pets::BoxedQuery<'a, Pg> {
    let mut query = pets::table.into_boxed();
    if let Some(term) = &filter.term {
        let pattern = like_pattern(term);
        let any_field = SearchField::ALL
            .iter()
            .map(|field| field_matches(*field, pattern.clone()))
            .reduce(|left, right| -> PetPredicate { Box::new(left.or(right)) });
        if let Some(predicate) = any_field {
            query = query.filter(predicate);
        }
    }
    if let Some(species) = filter.species {
        query = query.filter(pets::species.eq(species.as_str()));
    }
    query
}

fn invalid_row(id: uuid::Uuid, detail: impl std::fmt::Display) -> PetRepositoryError {
    warn!(pet_id = %id, %detail, "stored pet row failed domain validation");
    PetRepositoryError::query("stored pet is invalid")
}

fn row_to_pet(row: PetRow) -> Result<Pet, PetRepositoryError> {
    let id = row.id;
    let text = |value: String| PetText::new(value).map_err(|err| invalid_row(id, err));
    let age = u8::try_from(row.age)
        .map(PetAge::new)
        .map_err(|err| invalid_row(id, err))?;
    let species: Species = row.species.parse().map_err(|err| invalid_row(id, err))?;

    Ok(Pet {
        id: PetId::from_uuid(row.id),
        owner_user_id: UserId::from_uuid(row.owner_user_id),
        draft: PetDraft {
            name: text(row.name)?,
            age,
            species,
            breed: text(row.breed)?,
            owner_name: text(row.owner_name)?,
            owner_contact: text(row.owner_contact)?,
            image: row.image,
        },
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn new_row(pet: &Pet) -> NewPetRow<'_> {
    let draft = &pet.draft;
    NewPetRow {
        id: *pet.id.as_uuid(),
        owner_user_id: *pet.owner_user_id.as_uuid(),
        name: draft.name.as_ref(),
        age: i16::from(draft.age.years()),
        species: draft.species.as_str(),
        breed: draft.breed.as_ref(),
        owner_name: draft.owner_name.as_ref(),
        owner_contact: draft.owner_contact.as_ref(),
        image: draft.image.as_deref(),
        created_at: pet.created_at,
        updated_at: pet.updated_at,
    }
}

fn changeset(pet: &Pet) -> PetUpdate<'_> {
    let draft = &pet.draft;
    PetUpdate {
        name: draft.name.as_ref(),
        age: i16::from(draft.age.years()),
        species: draft.species.as_str(),
        breed: draft.breed.as_ref(),
        owner_name: draft.owner_name.as_ref(),
        owner_contact: draft.owner_contact.as_ref(),
        image: draft.image.as_deref(),
        updated_at: pet.updated_at,
    }
}

fn to_row_count(value: usize) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

#[async_trait]
impl PetRepository for DieselPetRepository {
    async fn create(&self, pet: &Pet) -> Result<(), PetRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::insert_into(pets::table)
            .values(&new_row(pet))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn update(&self, pet: &Pet) -> Result<bool, PetRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let updated = diesel::update(pets::table.find(pet.id.as_uuid()))
            .set(&changeset(pet))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: &PetId) -> Result<bool, PetRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let deleted = diesel::delete(pets::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(deleted > 0)
    }

    async fn find_by_id(&self, id: &PetId) -> Result<Option<Pet>, PetRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<PetRow> = pets::table
            .find(id.as_uuid())
            .select(PetRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(row_to_pet).transpose()
    }

    async fn list(
        &self,
        filter: &PetFilter,
        offset: u64,
        limit: u32,
    ) -> Result<Vec<Pet>, PetRepositoryError> {
        let offset = i64::try_from(offset)
            .map_err(|_| PetRepositoryError::query("page offset out of range"))?;
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<PetRow> = filter_query(filter)
            .order((pets::created_at.desc(), pets::id.asc()))
            .offset(offset)
            .limit(i64::from(limit))
            .select(PetRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows.into_iter().map(row_to_pet).collect()
    }

    async fn count(&self, filter: &PetFilter) -> Result<u64, PetRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let total: i64 = filter_query(filter)
            .select(count_star())
            .first(&mut conn)
            .await
            .map_err(diesel_error)?;
        u64::try_from(total).map_err(|_| PetRepositoryError::query("negative row count"))
    }

    async fn delete_by_owner(&self, owner: &UserId) -> Result<u64, PetRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let deleted = diesel::delete(pets::table.filter(pets::owner_user_id.eq(owner.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(to_row_count(deleted))
    }

    async fn upsert_seed(&self, pet: &Pet) -> Result<(), PetRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        // Seeding runs once at startup, so update-then-insert needs no lock.
        let updated = diesel::update(
            pets::table
                .filter(pets::owner_user_id.eq(pet.owner_user_id.as_uuid()))
                .filter(pets::name.eq(pet.draft.name.as_ref()))
                .filter(pets::owner_name.eq(pet.draft.owner_name.as_ref())),
        )
        .set(&changeset(pet))
        .execute(&mut conn)
        .await
        .map_err(diesel_error)?;
        if updated > 0 {
            return Ok(());
        }
        diesel::insert_into(pets::table)
            .values(&new_row(pet))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }
}
