//! Driving port for login/authentication use-cases.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! authenticate credentials without knowing (or importing) the backing
//! infrastructure.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, User};

/// Domain use-case port for authentication.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user.
    ///
    /// Unknown emails and wrong passwords fail identically.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error>;
}
