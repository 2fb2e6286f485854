//! Async connection pool for Diesel PostgreSQL connections.
//!
//! Wraps `diesel-async` and `bb8`. Checkout failures surface as
//! [`PoolError`], which each repository maps to its port's connection error.

use std::time::Duration;

use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::AsyncPgConnection;

/// Errors that can occur during pool operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// Failed to check out a connection from the pool.
    #[error("failed to get connection from pool: {message}")]
    Checkout { message: String },

    /// Failed to build the connection pool.
    #[error("failed to build connection pool: {message}")]
    Build { message: String },
}

impl PoolError {
    /// Create a checkout error with the given message.
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    /// Create a build error with the given message.
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

/// Configuration for the database connection pool.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use pet_registry::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("postgres://registry@localhost/pets")
///     .with_max_size(4)
///     .with_connection_timeout(Duration::from_secs(2));
/// assert_eq!(config.database_url(), "postgres://registry@localhost/pets");
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    min_idle: Option<u32>,
    connection_timeout: Duration,
}

impl PoolConfig {
    /// Defaults: 10 connections, 2 idle, 5 second checkout timeout.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: 10,
            min_idle: Some(2),
            connection_timeout: Duration::from_secs(5),
        }
    }

    /// Set the maximum number of connections in the pool.
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    /// Set the minimum number of idle connections to maintain.
    pub fn with_min_idle(mut self, min_idle: Option<u32>) -> Self {
        self.min_idle = min_idle;
        self
    }

    /// Set the connection checkout timeout.
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Get the database URL.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }
}

/// Shared connection pool handed to every Diesel repository.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Build the pool, opening `min_idle` connections eagerly.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::Build` when the database cannot be reached.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_size)
            .min_idle(config.min_idle)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;

        Ok(Self { inner: pool })
    }

    /// Check out a connection, waiting at most the configured timeout.
    pub async fn get(
        &self,
    ) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_config_default_values() {
        let config = PoolConfig::new("postgres://localhost/pets");

        assert_eq!(config.database_url(), "postgres://localhost/pets");
        assert_eq!(config.max_size, 10);
        assert_eq!(config.min_idle, Some(2));
        assert_eq!(config.connection_timeout, Duration::from_secs(5));
    }

    #[rstest]
    fn pool_config_builder_pattern() {
        let config = PoolConfig::new("postgres://localhost/pets")
            .with_max_size(20)
            .with_min_idle(Some(5))
            .with_connection_timeout(Duration::from_secs(60));

        assert_eq!(config.max_size, 20);
        assert_eq!(config.min_idle, Some(5));
        assert_eq!(config.connection_timeout, Duration::from_secs(60));
    }

    #[rstest]
    fn pool_error_display() {
        let checkout_err = PoolError::checkout("connection refused");
        let build_err = PoolError::build("invalid URL");

        assert!(checkout_err.to_string().contains("connection refused"));
        assert!(build_err.to_string().contains("invalid URL"));
    }
}
