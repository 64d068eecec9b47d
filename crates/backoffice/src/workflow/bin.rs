//! Soft-delete / bin lifecycle.
//!
//! `active` (`deleted_at IS NULL`) ⇄ `in_bin` (`deleted_at` set) → `purged`
//! (row removed). Deleting always stamps the current time, including on an
//! already-binned row, so a second delete advances the timestamp. Restore
//! nulls the column with no conflict detection. Purge is an unconditional,
//! irreversible row delete.
//!
//! Confirmation for the destructive steps (delete, purge) is enforced at the
//! route boundary, not here.

use chrono::Utc;
use packdesk_core::{ArtworkId, OrderId, QuoteId};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{ArtworkRepository, OrderRepository, QuoteRepository};
use crate::error::{AppError, Result};
use crate::models::{ArtworkFile, Order, QuoteView};

/// Which bin a work item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinKind {
    Quote,
    Artwork,
    Order,
}

impl BinKind {
    /// Parse the path segment used by the bin routes.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` for an unknown kind.
    pub fn from_path(segment: &str) -> Result<Self> {
        match segment {
            "quotes" => Ok(Self::Quote),
            "artworks" => Ok(Self::Artwork),
            "orders" => Ok(Self::Order),
            other => Err(AppError::BadRequest(format!("unknown bin kind: {other}"))),
        }
    }
}

/// Everything currently in the bin, per kind.
#[derive(Debug, Serialize)]
pub struct BinSnapshot {
    pub quotes: Vec<QuoteView>,
    pub artworks: Vec<ArtworkFile>,
    pub orders: Vec<Order>,
}

/// Fetch the full bin.
///
/// # Errors
///
/// Returns `AppError::Database` if a query fails.
pub async fn snapshot(pool: &PgPool) -> Result<BinSnapshot> {
    Ok(BinSnapshot {
        quotes: QuoteRepository::new(pool).list_binned().await?,
        artworks: ArtworkRepository::new(pool).list_binned().await?,
        orders: OrderRepository::new(pool).list_binned().await?,
    })
}

/// Move an item to the bin.
///
/// # Errors
///
/// Returns `AppError::NotFound` if the item does not exist.
pub async fn soft_delete(pool: &PgPool, kind: BinKind, id: Uuid) -> Result<()> {
    let now = Utc::now();
    match kind {
        BinKind::Quote => {
            let repo = QuoteRepository::new(pool);
            let id = QuoteId::new(id);
            let Some(view) = repo.get(id).await? else {
                return Err(AppError::NotFound(format!("quote {id}")));
            };
            repo.soft_delete(id, view.is_rfq, now).await?;
        }
        BinKind::Artwork => {
            ArtworkRepository::new(pool)
                .soft_delete(ArtworkId::new(id), now)
                .await?;
        }
        BinKind::Order => {
            OrderRepository::new(pool)
                .soft_delete(OrderId::new(id), now)
                .await?;
        }
    }
    Ok(())
}

/// Restore a binned item to the active set.
///
/// # Errors
///
/// Returns `AppError::NotFound` if the item does not exist.
pub async fn restore(pool: &PgPool, kind: BinKind, id: Uuid) -> Result<()> {
    match kind {
        BinKind::Quote => {
            let repo = QuoteRepository::new(pool);
            let id = QuoteId::new(id);
            let Some(view) = repo.get(id).await? else {
                return Err(AppError::NotFound(format!("quote {id}")));
            };
            repo.restore(id, view.is_rfq).await?;
        }
        BinKind::Artwork => {
            ArtworkRepository::new(pool).restore(ArtworkId::new(id)).await?;
        }
        BinKind::Order => {
            OrderRepository::new(pool).restore(OrderId::new(id)).await?;
        }
    }
    Ok(())
}

/// Permanently delete a row. Irreversible.
///
/// # Errors
///
/// Returns `AppError::NotFound` if the item does not exist.
pub async fn purge(pool: &PgPool, kind: BinKind, id: Uuid) -> Result<()> {
    match kind {
        BinKind::Quote => {
            let repo = QuoteRepository::new(pool);
            let id = QuoteId::new(id);
            let Some(view) = repo.get(id).await? else {
                return Err(AppError::NotFound(format!("quote {id}")));
            };
            repo.purge(id, view.is_rfq).await?;
        }
        BinKind::Artwork => {
            ArtworkRepository::new(pool).purge(ArtworkId::new(id)).await?;
        }
        BinKind::Order => {
            OrderRepository::new(pool).purge(OrderId::new(id)).await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bin_kind_parsing() {
        assert_eq!(BinKind::from_path("quotes").ok(), Some(BinKind::Quote));
        assert_eq!(BinKind::from_path("artworks").ok(), Some(BinKind::Artwork));
        assert_eq!(BinKind::from_path("orders").ok(), Some(BinKind::Order));
        assert!(BinKind::from_path("invoices").is_err());
    }
}
