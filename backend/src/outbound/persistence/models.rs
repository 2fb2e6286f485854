//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{breeds, pets, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Insertable struct for creating user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
}

/// Changeset for profile updates.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserUpdate<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
}

/// Row struct for reading from the pets table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = pets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PetRow {
    pub id: Uuid,
    pub owner_user_id: Uuid,
    pub name: String,
    pub age: i16,
    pub species: String,
    pub breed: String,
    pub owner_name: String,
    pub owner_contact: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating pet records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = pets)]
pub(crate) struct NewPetRow<'a> {
    pub id: Uuid,
    pub owner_user_id: Uuid,
    pub name: &'a str,
    pub age: i16,
    pub species: &'a str,
    pub breed: &'a str,
    pub owner_name: &'a str,
    pub owner_contact: &'a str,
    pub image: Option<&'a str>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset for the client-controlled pet fields.
///
/// `image` is written even when `None` so clearing it sticks.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = pets)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct PetUpdate<'a> {
    pub name: &'a str,
    pub age: i16,
    pub species: &'a str,
    pub breed: &'a str,
    pub owner_name: &'a str,
    pub owner_contact: &'a str,
    pub image: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for the breeds table; used for reads and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = breeds)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BreedRow {
    pub name: String,
    pub species: String,
}
