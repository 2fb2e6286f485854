//! Server settings loaded via OrthoConfig, and the builder consumed by
//! [`super::create_server`].

use std::net::SocketAddr;
use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use ortho_config::OrthoConfig;
use serde::Deserialize;

#[cfg(feature = "example-data")]
use pet_registry::example_data::ExampleDataSettings;
use pet_registry::outbound::persistence::PoolConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_POOL_SIZE: u32 = 10;

/// Deployment settings read from CLI flags, `PET_REGISTRY_*` environment
/// variables and configuration files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PET_REGISTRY")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string. The in-memory store is used when unset.
    pub database_url: Option<String>,
    /// Maximum number of pooled database connections.
    #[ortho_config(file_key = "pool_size")]
    pub db_pool_size: Option<u32>,
    /// Populate breeds, the default account and sample pets on startup.
    #[ortho_config(default = false)]
    pub seed_enabled: bool,
    /// Registry file used instead of the bundled seed registry.
    pub seed_registry_path: Option<PathBuf>,
}

/// Errors raised while interpreting [`ServerSettings`].
#[derive(Debug, thiserror::Error)]
pub enum ServerSettingsError {
    #[error("invalid bind address {value:?}: {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("database pool size must be positive")]
    PoolSize,
}

impl ServerSettings {
    /// Resolve the listen address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, ServerSettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .trim()
            .parse()
            .map_err(|source| ServerSettingsError::BindAddr {
                value: value.to_owned(),
                source,
            })
    }

    /// Database pool configuration, when a URL is configured.
    pub fn pool_config(&self) -> Result<Option<PoolConfig>, ServerSettingsError> {
        let Some(url) = self
            .database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
        else {
            return Ok(None);
        };
        let size = self.db_pool_size.unwrap_or(DEFAULT_POOL_SIZE);
        if size == 0 {
            return Err(ServerSettingsError::PoolSize);
        }
        Ok(Some(PoolConfig::new(url).with_max_size(size)))
    }

    /// Example data settings derived from the seed flags.
    #[cfg(feature = "example-data")]
    pub fn example_data(&self) -> ExampleDataSettings {
        ExampleDataSettings {
            enabled: self.seed_enabled,
            registry_path: self.seed_registry_path.clone(),
        }
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Construct a server configuration from session and listener settings.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
        }
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 5] = [
        "PET_REGISTRY_BIND_ADDR",
        "PET_REGISTRY_DATABASE_URL",
        "PET_REGISTRY_DB_POOL_SIZE",
        "PET_REGISTRY_SEED_ENABLED",
        "PET_REGISTRY_SEED_REGISTRY_PATH",
    ];

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("pet-registry")])
            .expect("config should load")
    }

    fn cleared() -> Vec<(&'static str, Option<String>)> {
        VARS.iter().map(|name| (*name, None)).collect()
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(cleared());

        let settings = load_from_empty_args();
        assert!(!settings.seed_enabled);
        assert_eq!(
            settings.bind_addr().expect("default address"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("literal")
        );
        assert!(settings.pool_config().expect("no database").is_none());
        assert!(settings.seed_registry_path.is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("PET_REGISTRY_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            (
                "PET_REGISTRY_DATABASE_URL",
                Some("postgres://localhost/pets".to_owned()),
            ),
            ("PET_REGISTRY_DB_POOL_SIZE", Some("4".to_owned())),
            ("PET_REGISTRY_SEED_ENABLED", Some("true".to_owned())),
            ("PET_REGISTRY_SEED_REGISTRY_PATH", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert!(settings.seed_enabled);
        assert_eq!(
            settings.bind_addr().expect("address"),
            "127.0.0.1:9000".parse::<SocketAddr>().expect("literal")
        );
        let pool = settings
            .pool_config()
            .expect("valid pool")
            .expect("database configured");
        assert_eq!(pool.database_url(), "postgres://localhost/pets");
    }

    #[rstest]
    #[case("not-an-address")]
    #[case("localhost")]
    fn malformed_bind_address_is_rejected(#[case] value: &str) {
        let settings = ServerSettings {
            bind_addr: Some(value.to_owned()),
            database_url: None,
            db_pool_size: None,
            seed_enabled: false,
            seed_registry_path: None,
        };
        assert!(matches!(
            settings.bind_addr(),
            Err(ServerSettingsError::BindAddr { .. })
        ));
    }

    #[rstest]
    fn zero_pool_size_is_rejected() {
        let settings = ServerSettings {
            bind_addr: None,
            database_url: Some("postgres://localhost/pets".to_owned()),
            db_pool_size: Some(0),
            seed_enabled: false,
            seed_registry_path: None,
        };
        assert!(matches!(
            settings.pool_config(),
            Err(ServerSettingsError::PoolSize)
        ));
    }

    #[rstest]
    fn blank_database_url_selects_memory_store() {
        let settings = ServerSettings {
            bind_addr: None,
            database_url: Some("   ".to_owned()),
            db_pool_size: None,
            seed_enabled: false,
            seed_registry_path: None,
        };
        assert!(settings.pool_config().expect("valid").is_none());
    }
}
