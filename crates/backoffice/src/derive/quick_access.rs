//! Quick-access derivation.
//!
//! Quick access overlays the three rich state machines with a simplified
//! three-kind model (`quote | invoice | artwork`). The status shown on a
//! freshly derived item is always the first value of the quick enum, not the
//! true backing status; the radial shortcut only writes through it. Known
//! simplification, preserved from the legacy dashboards.

use packdesk_core::{
    ArtworkStatus, QuickArtworkStatus, QuickInvoiceStatus, QuickQuoteStatus, QuoteStatus,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{ArtworkFile, CustomerDirectory, Order, QuoteView};

/// Per-kind cap on quick-access entries.
pub const QUICK_ACCESS_CAP: usize = 8;

/// Quick-access item kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuickKind {
    Quote,
    Invoice,
    Artwork,
}

/// One quick-access entry.
#[derive(Debug, Clone, Serialize)]
pub struct QuickAccessItem {
    pub id: Uuid,
    pub kind: QuickKind,
    pub name: String,
    pub info: String,
    /// Fixed initial display status (first quick-enum value).
    pub status: &'static str,
}

/// Build the quick-access lists: up to eight of each kind meeting the active
/// filter.
#[must_use]
pub fn quick_access(
    quotes: &[QuoteView],
    artworks: &[ArtworkFile],
    orders: &[Order],
    directory: &CustomerDirectory,
) -> Vec<QuickAccessItem> {
    let mut items = Vec::new();

    items.extend(
        quotes
            .iter()
            .filter(|q| q.deleted_at.is_none() && q.status == QuoteStatus::Pending)
            .take(QUICK_ACCESS_CAP)
            .map(|q| QuickAccessItem {
                id: q.id.as_uuid(),
                kind: QuickKind::Quote,
                name: q.quote_number.clone(),
                info: directory.display_name(q.user_id.as_uuid()),
                status: QuickQuoteStatus::default().as_str(),
            }),
    );

    items.extend(
        orders
            .iter()
            .filter(|o| o.deleted_at.is_none() && !o.status.is_closed())
            .take(QUICK_ACCESS_CAP)
            .map(|o| QuickAccessItem {
                id: o.id.as_uuid(),
                kind: QuickKind::Invoice,
                name: o.order_number.clone(),
                info: o.customer_name.clone().unwrap_or_else(|| {
                    o.user_id
                        .map_or_else(|| "Unknown".to_string(), |uid| {
                            directory.display_name(uid.as_uuid())
                        })
                }),
                status: QuickInvoiceStatus::default().as_str(),
            }),
    );

    items.extend(
        artworks
            .iter()
            .filter(|a| a.deleted_at.is_none() && a.status != ArtworkStatus::InProduction)
            .take(QUICK_ACCESS_CAP)
            .map(|a| QuickAccessItem {
                id: a.id.as_uuid(),
                kind: QuickKind::Artwork,
                name: a.name.clone(),
                info: directory.display_name(a.user_id.as_uuid()),
                status: QuickArtworkStatus::default().as_str(),
            }),
    );

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{artwork, base_time, order, quote};
    use packdesk_core::OrderStatus;

    fn dir() -> CustomerDirectory {
        CustomerDirectory::new(&[], &[])
    }

    #[test]
    fn test_per_kind_cap() {
        let now = base_time();
        let quotes: Vec<_> = (0..12).map(|_| quote(QuoteStatus::Pending, now)).collect();
        let orders: Vec<_> = (0..12).map(|_| order(OrderStatus::Pending, now)).collect();
        let artworks: Vec<_> = (0..12)
            .map(|_| artwork(ArtworkStatus::PendingReview, now))
            .collect();

        let items = quick_access(&quotes, &artworks, &orders, &dir());
        assert_eq!(items.len(), 3 * QUICK_ACCESS_CAP);
        for kind in [QuickKind::Quote, QuickKind::Invoice, QuickKind::Artwork] {
            assert_eq!(items.iter().filter(|i| i.kind == kind).count(), 8);
        }
    }

    #[test]
    fn test_display_status_fixed_regardless_of_backing() {
        let now = base_time();
        let artworks = vec![artwork(ArtworkStatus::ProofReady, now)];
        let orders = vec![order(OrderStatus::Production, now)];

        let items = quick_access(&[], &artworks, &orders, &dir());
        let artwork_item = items
            .iter()
            .find(|i| i.kind == QuickKind::Artwork)
            .expect("artwork item");
        // Backing status proof_ready, displayed quick status still "received"
        assert_eq!(artwork_item.status, "received");

        let invoice_item = items
            .iter()
            .find(|i| i.kind == QuickKind::Invoice)
            .expect("invoice item");
        assert_eq!(invoice_item.status, "pending");
    }

    #[test]
    fn test_closed_orders_and_production_artworks_excluded() {
        let now = base_time();
        let orders = vec![order(OrderStatus::Delivered, now)];
        let artworks = vec![artwork(ArtworkStatus::InProduction, now)];
        assert!(quick_access(&[], &artworks, &orders, &dir()).is_empty());
    }
}
