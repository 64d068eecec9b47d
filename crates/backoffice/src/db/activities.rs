//! Append-only CRM activity log.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::RepositoryError;

/// Repository for the `crm_activities` side-effect log.
pub struct ActivityRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ActivityRepository<'a> {
    /// Create a new activity repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Append one activity row. Callers treat failures as best-effort.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn record(
        &self,
        activity_type: &str,
        description: &str,
        inquiry_id: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO crm_activities (inquiry_id, activity_type, description, created_at)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(inquiry_id)
        .bind(activity_type)
        .bind(description)
        .bind(now)
        .execute(self.pool)
        .await?;
        Ok(())
    }
}
