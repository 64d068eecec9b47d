//! Single-row automation toggle.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::Row;

use super::RepositoryError;

/// Repository for the `automation_status` singleton row.
pub struct AutomationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AutomationRepository<'a> {
    /// Create a new automation repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Read the toggle; a missing row reads as disabled.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self) -> Result<bool, RepositoryError> {
        let row = sqlx::query("SELECT enabled FROM automation_status WHERE id = 1")
            .fetch_optional(self.pool)
            .await?;
        Ok(row.map(|r| r.get::<bool, _>("enabled")).unwrap_or(false))
    }

    /// Write the toggle, creating the singleton row if needed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the upsert fails.
    pub async fn set(&self, enabled: bool, now: DateTime<Utc>) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO automation_status (id, enabled, updated_at)
             VALUES (1, $1, $2)
             ON CONFLICT (id) DO UPDATE SET enabled = $1, updated_at = $2",
        )
        .bind(enabled)
        .bind(now)
        .execute(self.pool)
        .await?;
        Ok(())
    }
}
