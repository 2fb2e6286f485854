//! Driving port for self-service account registration.

use async_trait::async_trait;

use crate::domain::{Error, Registration, User};

#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Create an account. Fails with `email_taken` when the address is
    /// already registered.
    async fn register(&self, registration: Registration) -> Result<User, Error>;
}
