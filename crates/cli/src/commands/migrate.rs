//! Schema setup command.
//!
//! # Usage
//!
//! ```bash
//! cb-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `CONTACTS_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! The server runs the same create-if-absent statement on startup; this
//! command exists so the table can be provisioned ahead of the first deploy.

use contact_book_server::config::{ConfigError, ServerConfig};
use contact_book_server::db::{self, RepositoryError};
use thiserror::Error;

/// Errors that can occur while creating the schema.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// The schema statement failed.
    #[error("Schema error: {0}")]
    Schema(#[from] RepositoryError),
}

/// Create the contacts table if it does not exist.
///
/// # Errors
///
/// Returns `MigrationError` if configuration is missing, the database is
/// unreachable, or the statement fails.
pub async fn run() -> Result<(), MigrationError> {
    let config = ServerConfig::from_env()?;

    tracing::info!("Connecting to contacts database...");
    let pool = db::create_pool(&config.database_url, 1).await?;

    db::ensure_schema(&pool).await?;
    pool.close().await;

    tracing::info!("Contacts schema ready");
    Ok(())
}
