//! Embedded schema migrations.
//!
//! Diesel's migration harness needs a synchronous connection, so startup runs
//! it on a blocking thread before the async pool is built.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

/// Migrations compiled from `backend/migrations`.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while applying migrations.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("failed to connect for migrations: {0}")]
    Connect(#[from] diesel::ConnectionError),
    #[error("failed to apply migrations: {0}")]
    Apply(String),
    #[error("migration task aborted: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Apply pending migrations over a fresh synchronous connection.
///
/// # Errors
///
/// Returns [`MigrationError`] when connecting or applying fails.
pub fn run_pending_migrations_blocking(database_url: &str) -> Result<usize, MigrationError> {
    let mut conn = PgConnection::establish(database_url)?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Apply(err.to_string()))?;
    for version in &applied {
        info!(%version, "applied migration");
    }
    Ok(applied.len())
}

/// Apply pending migrations from async code without blocking the runtime.
///
/// # Errors
///
/// Returns [`MigrationError`] when connecting or applying fails, or when the
/// blocking task panics.
pub async fn run_pending_migrations(database_url: String) -> Result<usize, MigrationError> {
    tokio::task::spawn_blocking(move || run_pending_migrations_blocking(&database_url)).await?
}
