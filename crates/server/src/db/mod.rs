//! Database operations for the contacts `PostgreSQL` store.
//!
//! ## Tables
//!
//! - `contacts` - One row per contact; `id` is a `SERIAL` surrogate key
//!
//! # Schema
//!
//! There is no migration history. [`ensure_schema`] runs a single
//! create-if-absent statement at startup, and is also exposed through:
//! ```bash
//! cargo run -p contact-book-cli -- migrate
//! ```

pub mod contacts;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use contacts::ContactRepository;

/// Create-if-absent statement for the contacts table.
const CREATE_CONTACTS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS contacts (
    id SERIAL PRIMARY KEY,
    first_name VARCHAR(100) NOT NULL,
    last_name VARCHAR(100) NOT NULL,
    phone VARCHAR(20) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
)
";

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Create a `PostgreSQL` connection pool.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
/// * `max_connections` - Upper bound on pooled connections
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(
    database_url: &secrecy::SecretString,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Create the contacts table if it does not exist yet.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the statement fails.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), RepositoryError> {
    sqlx::query(CREATE_CONTACTS_TABLE).execute(pool).await?;
    tracing::info!("Contacts table ready");
    Ok(())
}
