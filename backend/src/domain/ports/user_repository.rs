//! Port abstraction for account persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{EmailAddress, UserAccount, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another account already uses the email.
        DuplicateEmail { email: String } => "email already registered: {email}",
    }
}

/// Record store contract for accounts. Emails arrive normalised, so exact
/// comparison is case-insensitive lookup.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account.
    async fn create(&self, account: &UserAccount) -> Result<(), UserPersistenceError>;

    /// Fetch an account by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, UserPersistenceError>;

    /// Fetch an account by normalised email.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserAccount>, UserPersistenceError>;

    /// Overwrite name, email and password digest. Returns `false` when the
    /// account no longer exists.
    async fn update(&self, account: &UserAccount) -> Result<bool, UserPersistenceError>;

    /// Delete an account. Returns `false` when nothing was deleted.
    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError>;
}
