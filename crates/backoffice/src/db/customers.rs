//! Customer and inquiry repository over `profiles` and `crm_inquiries`.

use packdesk_core::CustomerId;
use sqlx::PgPool;
use uuid::Uuid;

use super::{FETCH_LIMIT, RepositoryError};
use crate::models::{Customer, Inquiry};

/// Repository for the two identity sources.
pub struct CustomerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CustomerRepository<'a> {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List customer profiles, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_customers(&self) -> Result<Vec<Customer>, RepositoryError> {
        let rows = sqlx::query_as::<_, Customer>(
            "SELECT * FROM profiles ORDER BY created_at DESC LIMIT $1",
        )
        .bind(FETCH_LIMIT)
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    /// List CRM inquiries, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_inquiries(&self) -> Result<Vec<Inquiry>, RepositoryError> {
        let rows = sqlx::query_as::<_, Inquiry>(
            "SELECT * FROM crm_inquiries ORDER BY created_at DESC LIMIT $1",
        )
        .bind(FETCH_LIMIT)
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    /// Get a customer profile by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_customer(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let row = sqlx::query_as::<_, Customer>("SELECT * FROM profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(row)
    }

    /// Get an inquiry sharing a work item's owner id (the fallback identity
    /// source).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_inquiry_by_owner(&self, id: Uuid) -> Result<Option<Inquiry>, RepositoryError> {
        let row = sqlx::query_as::<_, Inquiry>("SELECT * FROM crm_inquiries WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(row)
    }
}
