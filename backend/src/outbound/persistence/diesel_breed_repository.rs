//! PostgreSQL-backed `BreedRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{BreedRepository, BreedRepositoryError};
use crate::domain::{Breed, PetText, Species};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::BreedRow;
use super::pool::{DbPool, PoolError};
use super::schema::breeds;

/// Diesel-backed implementation of the `BreedRepository` port.
#[derive(Clone)]
pub struct DieselBreedRepository {
    pool: DbPool,
}

impl DieselBreedRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> BreedRepositoryError {
    map_pool_error(error, BreedRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> BreedRepositoryError {
    map_diesel_error(
        error,
        BreedRepositoryError::query,
        BreedRepositoryError::connection,
    )
}

/// Rows that no longer satisfy the domain rules are skipped with a warning;
/// suggestions are advisory.
fn row_to_breed(row: BreedRow) -> Option<Breed> {
    let species = row.species.parse::<Species>();
    let name = PetText::new(&row.name);
    match (name, species) {
        (Ok(name), Ok(species)) => Some(Breed::new(name, species)),
        _ => {
            warn!(name = %row.name, species = %row.species, "skipping invalid breed row");
            None
        }
    }
}

#[async_trait]
impl BreedRepository for DieselBreedRepository {
    async fn list(&self, species: Option<Species>) -> Result<Vec<Breed>, BreedRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let mut query = breeds::table.into_boxed();
        if let Some(species) = species {
            query = query.filter(breeds::species.eq(species.as_str()));
        }
        let rows: Vec<BreedRow> = query
            .order(breeds::name.asc())
            .select(BreedRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(rows.into_iter().filter_map(row_to_breed).collect())
    }

    async fn upsert(&self, breed: &Breed) -> Result<(), BreedRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = BreedRow {
            name: breed.name.as_ref().to_owned(),
            species: breed.species.as_str().to_owned(),
        };
        diesel::insert_into(breeds::table)
            .values(&row)
            .on_conflict((breeds::name, breeds::species))
            .do_nothing()
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }
}
