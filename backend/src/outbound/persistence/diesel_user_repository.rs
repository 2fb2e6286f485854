//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, PasswordDigest, User, UserAccount, UserId};

use super::diesel_error_mapping::{is_unique_violation, map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow, UserUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> UserPersistenceError {
    map_pool_error(error, UserPersistenceError::connection)
}

/// Map Diesel errors, turning the email unique index into `DuplicateEmail`.
fn write_error(error: diesel::result::Error, email: &EmailAddress) -> UserPersistenceError {
    if is_unique_violation(&error) {
        return UserPersistenceError::duplicate_email(email.as_ref());
    }
    read_error(error)
}

fn read_error(error: diesel::result::Error) -> UserPersistenceError {
    map_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn row_to_account(row: UserRow) -> Result<UserAccount, UserPersistenceError> {
    let id = row.id;
    let user = User::try_from_strings(row.id.to_string(), row.name, row.email).map_err(|err| {
        warn!(user_id = %id, error = %err, "stored user row failed domain validation");
        UserPersistenceError::query("stored user is invalid")
    })?;
    Ok(UserAccount::new(user, PasswordDigest::new(row.password_hash)))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = NewUserRow {
            id: *account.id().as_uuid(),
            name: account.user.name().as_ref(),
            email: account.user.email().as_ref(),
            password_hash: account.password_hash.as_str(),
        };
        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| write_error(err, account.user.email()))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<UserRow> = users::table
            .find(id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(read_error)?;
        row.map(row_to_account).transpose()
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(read_error)?;
        row.map(row_to_account).transpose()
    }

    async fn update(&self, account: &UserAccount) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let changes = UserUpdate {
            name: account.user.name().as_ref(),
            email: account.user.email().as_ref(),
            password_hash: account.password_hash.as_str(),
        };
        let updated = diesel::update(users::table.find(account.id().as_uuid()))
            .set((&changes, users::updated_at.eq(diesel::dsl::now)))
            .execute(&mut conn)
            .await
            .map_err(|err| write_error(err, account.user.email()))?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        // Owned pets go with the row through ON DELETE CASCADE.
        let deleted = diesel::delete(users::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(read_error)?;
        Ok(deleted > 0)
    }
}
