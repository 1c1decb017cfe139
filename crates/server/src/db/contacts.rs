//! Contact repository for database operations.
//!
//! Each method is exactly one parameterized statement; nothing here opens a
//! transaction. Concurrent writers to the same row are last-write-wins.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use contact_book_core::{Contact, ContactFields, ContactId};

use super::RepositoryError;

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for contact queries.
#[derive(Debug, sqlx::FromRow)]
struct ContactRow {
    id: ContactId,
    first_name: String,
    last_name: String,
    phone: String,
    created_at: DateTime<Utc>,
}

impl From<ContactRow> for Contact {
    fn from(row: ContactRow) -> Self {
        Self {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            phone: row.phone,
            created_at: row.created_at,
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for contact database operations.
pub struct ContactRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ContactRepository<'a> {
    /// Create a new contact repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every contact, newest id first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Contact>, RepositoryError> {
        let rows = sqlx::query_as::<_, ContactRow>(
            r"
            SELECT id, first_name, last_name, phone, created_at
            FROM contacts
            ORDER BY id DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a contact by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ContactId) -> Result<Option<Contact>, RepositoryError> {
        let row = sqlx::query_as::<_, ContactRow>(
            r"
            SELECT id, first_name, last_name, phone, created_at
            FROM contacts
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Insert a contact; the store assigns `id` and `created_at`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, fields: &ContactFields) -> Result<Contact, RepositoryError> {
        let row = sqlx::query_as::<_, ContactRow>(
            r"
            INSERT INTO contacts (first_name, last_name, phone)
            VALUES ($1, $2, $3)
            RETURNING id, first_name, last_name, phone, created_at
            ",
        )
        .bind(fields.first_name())
        .bind(fields.last_name())
        .bind(fields.phone())
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Replace the three editable fields of a contact.
    ///
    /// Returns `None` if no contact has this ID. `id` and `created_at` are
    /// left untouched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(
        &self,
        id: ContactId,
        fields: &ContactFields,
    ) -> Result<Option<Contact>, RepositoryError> {
        let row = sqlx::query_as::<_, ContactRow>(
            r"
            UPDATE contacts
            SET first_name = $1, last_name = $2, phone = $3
            WHERE id = $4
            RETURNING id, first_name, last_name, phone, created_at
            ",
        )
        .bind(fields.first_name())
        .bind(fields.last_name())
        .bind(fields.phone())
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Hard-delete a contact.
    ///
    /// Returns `false` if no contact had this ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: ContactId) -> Result<bool, RepositoryError> {
        let deleted = sqlx::query_scalar::<_, ContactId>(
            r"
            DELETE FROM contacts
            WHERE id = $1
            RETURNING id
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(deleted.is_some())
    }
}
