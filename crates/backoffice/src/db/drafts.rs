//! Email draft repository.

use chrono::{DateTime, Utc};
use packdesk_core::DraftId;
use sqlx::PgPool;

use super::{FETCH_LIMIT, RepositoryError};
use crate::models::EmailDraft;

/// Editable draft fields, shared by create and update.
#[derive(Debug, Clone)]
pub struct DraftFields {
    pub subject: String,
    pub greeting: String,
    pub content: String,
    pub closing: String,
    pub images: Vec<String>,
    pub selected_page: Option<String>,
}

/// Repository for saved campaign drafts.
pub struct DraftRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> DraftRepository<'a> {
    /// Create a new draft repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List drafts, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<EmailDraft>, RepositoryError> {
        let rows = sqlx::query_as::<_, EmailDraft>(
            "SELECT * FROM email_drafts ORDER BY created_at DESC LIMIT $1",
        )
        .bind(FETCH_LIMIT)
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    /// Save a new draft.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        fields: &DraftFields,
        now: DateTime<Utc>,
    ) -> Result<EmailDraft, RepositoryError> {
        let row = sqlx::query_as::<_, EmailDraft>(
            "INSERT INTO email_drafts
                 (subject, greeting, content, closing, images, selected_page, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *",
        )
        .bind(&fields.subject)
        .bind(&fields.greeting)
        .bind(&fields.content)
        .bind(&fields.closing)
        .bind(&fields.images)
        .bind(fields.selected_page.as_deref())
        .bind(now)
        .fetch_one(self.pool)
        .await?;
        Ok(row)
    }

    /// Overwrite an existing draft.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row matches the id.
    pub async fn update(
        &self,
        id: DraftId,
        fields: &DraftFields,
        now: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE email_drafts
             SET subject = $2, greeting = $3, content = $4, closing = $5,
                 images = $6, selected_page = $7, updated_at = $8
             WHERE id = $1",
        )
        .bind(id)
        .bind(&fields.subject)
        .bind(&fields.greeting)
        .bind(&fields.content)
        .bind(&fields.closing)
        .bind(&fields.images)
        .bind(fields.selected_page.as_deref())
        .bind(now)
        .execute(self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("draft {id}")));
        }
        Ok(())
    }

    /// Delete a draft. Drafts have no bin; deletion is immediate.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row matches the id.
    pub async fn delete(&self, id: DraftId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM email_drafts WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("draft {id}")));
        }
        Ok(())
    }
}
