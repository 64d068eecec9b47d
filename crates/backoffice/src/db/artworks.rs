//! Artwork repository over the `artwork_files` table.

use chrono::{DateTime, Utc};
use packdesk_core::{ArtworkId, ArtworkStatus, LinkType, OrderId, QuoteId};
use sqlx::PgPool;

use super::{FETCH_LIMIT, RepositoryError};
use crate::models::ArtworkFile;

/// Fields written by the primary review action.
///
/// `admin_feedback` always overwrites (a review without feedback clears the
/// previous note); the coding fields and proof URL only fill in when provided.
#[derive(Debug, Clone, Default)]
pub struct ReviewUpdate {
    pub status: ArtworkStatus,
    pub admin_feedback: Option<String>,
    pub proof_url: Option<String>,
    pub customer_code: Option<String>,
    pub product_code: Option<String>,
}

/// Fields written by the coding/linking save action.
#[derive(Debug, Clone, Default)]
pub struct CodingUpdate {
    pub customer_code: Option<String>,
    pub product_code: Option<String>,
    pub proof_url: Option<String>,
    pub link_type: LinkType,
    pub linked_order_id: Option<OrderId>,
    pub linked_quote_id: Option<QuoteId>,
    pub order_number: Option<String>,
    pub quote_number: Option<String>,
}

/// Repository for artwork file database operations.
pub struct ArtworkRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ArtworkRepository<'a> {
    /// Create a new artwork repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List active artwork files, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_active(&self) -> Result<Vec<ArtworkFile>, RepositoryError> {
        let rows = sqlx::query_as::<_, ArtworkFile>(
            "SELECT * FROM artwork_files WHERE deleted_at IS NULL ORDER BY created_at DESC LIMIT $1",
        )
        .bind(FETCH_LIMIT)
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    /// List soft-deleted artwork files (the bin view).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_binned(&self) -> Result<Vec<ArtworkFile>, RepositoryError> {
        let rows = sqlx::query_as::<_, ArtworkFile>(
            "SELECT * FROM artwork_files WHERE deleted_at IS NOT NULL ORDER BY created_at DESC LIMIT $1",
        )
        .bind(FETCH_LIMIT)
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    /// Get a single artwork file by id, regardless of deletion state.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ArtworkId) -> Result<Option<ArtworkFile>, RepositoryError> {
        let row = sqlx::query_as::<_, ArtworkFile>("SELECT * FROM artwork_files WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(row)
    }

    /// Apply the primary review action: direct status write, no adjacency
    /// guard.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row matches the id.
    pub async fn update_review(
        &self,
        id: ArtworkId,
        update: &ReviewUpdate,
        now: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE artwork_files
             SET status = $2,
                 admin_feedback = $3,
                 proof_url = COALESCE($4, proof_url),
                 customer_code = COALESCE($5, customer_code),
                 product_code = COALESCE($6, product_code),
                 updated_at = $7
             WHERE id = $1",
        )
        .bind(id)
        .bind(update.status)
        .bind(update.admin_feedback.as_deref())
        .bind(update.proof_url.as_deref())
        .bind(update.customer_code.as_deref())
        .bind(update.product_code.as_deref())
        .bind(now)
        .execute(self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("artwork {id}")));
        }
        Ok(())
    }

    /// Write a status directly, leaving feedback and coding untouched. Used
    /// by the quick-access shortcut.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row matches the id.
    pub async fn set_status(
        &self,
        id: ArtworkId,
        status: ArtworkStatus,
        now: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        let result =
            sqlx::query("UPDATE artwork_files SET status = $2, updated_at = $3 WHERE id = $1")
                .bind(id)
                .bind(status)
                .bind(now)
                .execute(self.pool)
                .await?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("artwork {id}")));
        }
        Ok(())
    }

    /// Save coding and linking without touching review state. The link is
    /// exclusive: setting one target clears the other.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row matches the id.
    pub async fn update_coding(
        &self,
        id: ArtworkId,
        update: &CodingUpdate,
        now: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE artwork_files
             SET customer_code = COALESCE($2, customer_code),
                 product_code = COALESCE($3, product_code),
                 proof_url = COALESCE($4, proof_url),
                 link_type = $5,
                 linked_order_id = $6,
                 linked_quote_id = $7,
                 order_number = $8,
                 quote_number = $9,
                 updated_at = $10
             WHERE id = $1",
        )
        .bind(id)
        .bind(update.customer_code.as_deref())
        .bind(update.product_code.as_deref())
        .bind(update.proof_url.as_deref())
        .bind(update.link_type)
        .bind(update.linked_order_id)
        .bind(update.linked_quote_id)
        .bind(update.order_number.as_deref())
        .bind(update.quote_number.as_deref())
        .bind(now)
        .execute(self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("artwork {id}")));
        }
        Ok(())
    }

    /// Move an artwork file to the bin. Always overwrites `deleted_at`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row matches the id.
    pub async fn soft_delete(
        &self,
        id: ArtworkId,
        now: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE artwork_files SET deleted_at = $2 WHERE id = $1")
            .bind(id)
            .bind(now)
            .execute(self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("artwork {id}")));
        }
        Ok(())
    }

    /// Restore a binned artwork file.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row matches the id.
    pub async fn restore(&self, id: ArtworkId) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE artwork_files SET deleted_at = NULL WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("artwork {id}")));
        }
        Ok(())
    }

    /// Permanently remove an artwork row. Irreversible.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row matches the id.
    pub async fn purge(&self, id: ArtworkId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM artwork_files WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("artwork {id}")));
        }
        Ok(())
    }
}
