//! Order repository over the `orders` table.
//!
//! An order's `deleted` state is carried by the `deleted_at` column, not the
//! status text: soft delete and restore never touch `status`, which keeps the
//! active/bin partition a single predicate.

use chrono::{DateTime, Utc};
use packdesk_core::{OrderId, OrderStatus};
use sqlx::PgPool;

use super::{FETCH_LIMIT, RepositoryError};
use crate::models::Order;

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List active orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_active(&self) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, Order>(
            "SELECT * FROM orders WHERE deleted_at IS NULL ORDER BY created_at DESC LIMIT $1",
        )
        .bind(FETCH_LIMIT)
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    /// List soft-deleted orders (the bin view).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_binned(&self) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, Order>(
            "SELECT * FROM orders WHERE deleted_at IS NOT NULL ORDER BY created_at DESC LIMIT $1",
        )
        .bind(FETCH_LIMIT)
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    /// Get a single order by id, regardless of deletion state.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(row)
    }

    /// Write an order status directly.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row matches the id.
    pub async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
        now: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        let result =
            sqlx::query("UPDATE orders SET status = $2, updated_at = $3 WHERE id = $1")
                .bind(id)
                .bind(status)
                .bind(now)
                .execute(self.pool)
                .await?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("order {id}")));
        }
        Ok(())
    }

    /// Record tracking info. Adding tracking moves the order to `shipped`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row matches the id.
    pub async fn set_tracking(
        &self,
        id: OrderId,
        tracking_number: &str,
        carrier: Option<&str>,
        tracking_url: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE orders
             SET tracking_number = $2, carrier = $3, tracking_url = $4,
                 status = $5, updated_at = $6
             WHERE id = $1",
        )
        .bind(id)
        .bind(tracking_number)
        .bind(carrier)
        .bind(tracking_url)
        .bind(OrderStatus::Shipped)
        .bind(now)
        .execute(self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("order {id}")));
        }
        Ok(())
    }

    /// Move an order to the bin. Always overwrites `deleted_at`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row matches the id.
    pub async fn soft_delete(
        &self,
        id: OrderId,
        now: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE orders SET deleted_at = $2 WHERE id = $1")
            .bind(id)
            .bind(now)
            .execute(self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("order {id}")));
        }
        Ok(())
    }

    /// Restore a binned order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row matches the id.
    pub async fn restore(&self, id: OrderId) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE orders SET deleted_at = NULL WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("order {id}")));
        }
        Ok(())
    }

    /// Permanently remove an order row. Irreversible.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row matches the id.
    pub async fn purge(&self, id: OrderId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("order {id}")));
        }
        Ok(())
    }
}
