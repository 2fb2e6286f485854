//! Embedded schema migrations.
//!
//! Migrations run over a synchronous `PgConnection` on a blocking thread
//! because Diesel's migration harness is not async.

use diesel::pg::PgConnection;
use diesel::Connection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while applying migrations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MigrationError {
    #[error("failed to connect for migrations: {message}")]
    Connect { message: String },
    #[error("failed to apply migrations: {message}")]
    Apply { message: String },
    #[error("migration task was cancelled: {message}")]
    Join { message: String },
}

fn apply_pending(database_url: &str) -> Result<usize, MigrationError> {
    let mut connection = PgConnection::establish(database_url).map_err(|err| {
        MigrationError::Connect {
            message: err.to_string(),
        }
    })?;
    let applied = connection
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Apply {
            message: err.to_string(),
        })?;
    Ok(applied.len())
}

/// Apply every pending migration, returning how many ran.
///
/// # Errors
///
/// Returns [`MigrationError`] when the database is unreachable or a
/// migration fails.
pub async fn run_pending_migrations(database_url: &str) -> Result<usize, MigrationError> {
    let url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || apply_pending(&url))
        .await
        .map_err(|err| MigrationError::Join {
            message: err.to_string(),
        })??;
    info!(applied, "database migrations applied");
    Ok(applied)
}
