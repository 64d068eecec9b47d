//! Quote repository over the `quotes` and `rfq_submissions` tables.
//!
//! The two tables are disjoint sources of the same work-item kind; every read
//! merges them into [`QuoteView`]s sorted newest-first, and every write routes
//! on `is_rfq` to exactly one table.

use chrono::{DateTime, Utc};
use packdesk_core::{QuoteId, QuoteStatus};
use rust_decimal::Decimal;
use sqlx::PgPool;

use super::{FETCH_LIMIT, RepositoryError};
use crate::models::{Quote, QuoteView, RfqSubmission};

/// Repository for quote and RFQ database operations.
pub struct QuoteRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> QuoteRepository<'a> {
    /// Create a new quote repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List active quotes and RFQs, merged and sorted newest-first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if either query fails.
    pub async fn list_active(&self) -> Result<Vec<QuoteView>, RepositoryError> {
        self.list(false).await
    }

    /// List soft-deleted quotes and RFQs (the bin view).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if either query fails.
    pub async fn list_binned(&self) -> Result<Vec<QuoteView>, RepositoryError> {
        self.list(true).await
    }

    async fn list(&self, binned: bool) -> Result<Vec<QuoteView>, RepositoryError> {
        let quote_sql = if binned {
            "SELECT * FROM quotes WHERE deleted_at IS NOT NULL ORDER BY created_at DESC LIMIT $1"
        } else {
            "SELECT * FROM quotes WHERE deleted_at IS NULL ORDER BY created_at DESC LIMIT $1"
        };
        let rfq_sql = if binned {
            "SELECT * FROM rfq_submissions WHERE deleted_at IS NOT NULL ORDER BY created_at DESC LIMIT $1"
        } else {
            "SELECT * FROM rfq_submissions WHERE deleted_at IS NULL ORDER BY created_at DESC LIMIT $1"
        };

        let quotes = sqlx::query_as::<_, Quote>(quote_sql)
            .bind(FETCH_LIMIT)
            .fetch_all(self.pool)
            .await?;
        let rfqs = sqlx::query_as::<_, RfqSubmission>(rfq_sql)
            .bind(FETCH_LIMIT)
            .fetch_all(self.pool)
            .await?;

        let mut merged: Vec<QuoteView> = quotes
            .into_iter()
            .map(QuoteView::from)
            .chain(rfqs.into_iter().map(QuoteView::from))
            .collect();
        merged.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(merged)
    }

    /// Get a single quote or RFQ by id, regardless of deletion state.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get(&self, id: QuoteId) -> Result<Option<QuoteView>, RepositoryError> {
        let quote = sqlx::query_as::<_, Quote>("SELECT * FROM quotes WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        if let Some(q) = quote {
            return Ok(Some(QuoteView::from(q)));
        }

        let rfq =
            sqlx::query_as::<_, RfqSubmission>("SELECT * FROM rfq_submissions WHERE id = $1")
                .bind(id)
                .fetch_optional(self.pool)
                .await?;
        Ok(rfq.map(QuoteView::from))
    }

    /// Write a ground-truth status to the owning table.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row matches the id.
    pub async fn update_status(
        &self,
        id: QuoteId,
        is_rfq: bool,
        status: QuoteStatus,
        now: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        let sql = if is_rfq {
            "UPDATE rfq_submissions SET status = $2, updated_at = $3 WHERE id = $1"
        } else {
            "UPDATE quotes SET status = $2, updated_at = $3 WHERE id = $1"
        };
        let result = sqlx::query(sql)
            .bind(id)
            .bind(status)
            .bind(now)
            .execute(self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("quote {id}")));
        }
        Ok(())
    }

    /// Record an admin reply, optionally with a quoted amount.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row matches the id.
    pub async fn reply(
        &self,
        id: QuoteId,
        is_rfq: bool,
        reply: &str,
        quoted_amount: Option<Decimal>,
        now: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        let sql = if is_rfq {
            "UPDATE rfq_submissions
             SET admin_reply = $2, replied_at = $3,
                 quoted_amount = COALESCE($4, quoted_amount), updated_at = $3
             WHERE id = $1"
        } else {
            "UPDATE quotes
             SET admin_reply = $2, replied_at = $3,
                 quoted_amount = COALESCE($4, quoted_amount), updated_at = $3
             WHERE id = $1"
        };
        let result = sqlx::query(sql)
            .bind(id)
            .bind(reply)
            .bind(now)
            .bind(quoted_amount)
            .execute(self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("quote {id}")));
        }
        Ok(())
    }

    /// Move a quote to the bin. Always overwrites `deleted_at`, including on
    /// an already-binned row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row matches the id.
    pub async fn soft_delete(
        &self,
        id: QuoteId,
        is_rfq: bool,
        now: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        let sql = if is_rfq {
            "UPDATE rfq_submissions SET deleted_at = $2 WHERE id = $1"
        } else {
            "UPDATE quotes SET deleted_at = $2 WHERE id = $1"
        };
        let result = sqlx::query(sql).bind(id).bind(now).execute(self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("quote {id}")));
        }
        Ok(())
    }

    /// Restore a binned quote to the active set.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row matches the id.
    pub async fn restore(&self, id: QuoteId, is_rfq: bool) -> Result<(), RepositoryError> {
        let sql = if is_rfq {
            "UPDATE rfq_submissions SET deleted_at = NULL WHERE id = $1"
        } else {
            "UPDATE quotes SET deleted_at = NULL WHERE id = $1"
        };
        let result = sqlx::query(sql).bind(id).execute(self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("quote {id}")));
        }
        Ok(())
    }

    /// Permanently remove a quote row. Irreversible.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row matches the id.
    pub async fn purge(&self, id: QuoteId, is_rfq: bool) -> Result<(), RepositoryError> {
        let sql = if is_rfq {
            "DELETE FROM rfq_submissions WHERE id = $1"
        } else {
            "DELETE FROM quotes WHERE id = $1"
        };
        let result = sqlx::query(sql).bind(id).execute(self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("quote {id}")));
        }
        Ok(())
    }
}
