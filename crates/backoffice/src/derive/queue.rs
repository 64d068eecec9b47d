//! Work-queue derivation.
//!
//! The work queue is the flat list of items needing operator attention,
//! independent of pinning. It is uncapped; display truncation is the
//! consumer's concern.

use packdesk_core::{ArtworkStatus, QuoteStatus};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{ArtworkFile, CustomerDirectory, Order, QuoteView};

/// Kind of work item in the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkItemKind {
    Quote,
    Artwork,
    Order,
}

/// One work-queue entry.
#[derive(Debug, Clone, Serialize)]
pub struct WorkQueueItem {
    pub id: Uuid,
    pub kind: WorkItemKind,
    pub name: String,
    pub customer_name: String,
    pub status: String,
    pub urgent: bool,
}

/// Build the work queue.
///
/// Urgency is exhaustive: pending quotes and pending-review artworks are
/// urgent; in-progress artworks and in-flight orders queue as non-urgent.
/// Closed-out orders are not work and do not appear.
#[must_use]
pub fn work_queue(
    quotes: &[QuoteView],
    artworks: &[ArtworkFile],
    orders: &[Order],
    directory: &CustomerDirectory,
) -> Vec<WorkQueueItem> {
    let mut items = Vec::new();

    items.extend(
        quotes
            .iter()
            .filter(|q| q.deleted_at.is_none() && q.status == QuoteStatus::Pending)
            .map(|q| WorkQueueItem {
                id: q.id.as_uuid(),
                kind: WorkItemKind::Quote,
                name: q.quote_number.clone(),
                customer_name: directory.display_name(q.user_id.as_uuid()),
                status: q.status.to_string(),
                urgent: true,
            }),
    );

    items.extend(
        artworks
            .iter()
            .filter(|a| {
                a.deleted_at.is_none()
                    && (a.status == ArtworkStatus::PendingReview || a.status.is_in_progress())
            })
            .map(|a| WorkQueueItem {
                id: a.id.as_uuid(),
                kind: WorkItemKind::Artwork,
                name: a.name.clone(),
                customer_name: directory.display_name(a.user_id.as_uuid()),
                status: a.status.to_string(),
                urgent: a.status == ArtworkStatus::PendingReview,
            }),
    );

    items.extend(
        orders
            .iter()
            .filter(|o| o.deleted_at.is_none() && o.status.is_in_flight())
            .map(|o| WorkQueueItem {
                id: o.id.as_uuid(),
                kind: WorkItemKind::Order,
                name: o.order_number.clone(),
                customer_name: o
                    .customer_name
                    .clone()
                    .or_else(|| {
                        o.user_id.map(|uid| directory.display_name(uid.as_uuid()))
                    })
                    .unwrap_or_else(|| "Unknown".to_string()),
                status: o.status.to_string(),
                urgent: false,
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
    fn test_urgency_flags() {
        let now = base_time();
        let quotes = vec![quote(QuoteStatus::Pending, now)];
        let artworks = vec![
            artwork(ArtworkStatus::PendingReview, now),
            artwork(ArtworkStatus::InReview, now),
        ];
        let orders = vec![order(OrderStatus::Production, now)];

        let items = work_queue(&quotes, &artworks, &orders, &dir());
        assert_eq!(items.len(), 4);

        let urgent: Vec<_> = items.iter().filter(|i| i.urgent).collect();
        assert_eq!(urgent.len(), 2);
        assert!(urgent.iter().all(|i| matches!(
            i.kind,
            WorkItemKind::Quote | WorkItemKind::Artwork
        )));

        let order_item = items
            .iter()
            .find(|i| i.kind == WorkItemKind::Order)
            .expect("order queued");
        assert!(!order_item.urgent);
        assert_eq!(order_item.status, "production");
    }

    #[test]
    fn test_closed_orders_are_not_work() {
        let now = base_time();
        let orders = vec![
            order(OrderStatus::Delivered, now),
            order(OrderStatus::Cancelled, now),
            order(OrderStatus::Pending, now),
        ];
        let items = work_queue(&[], &[], &orders, &dir());
        // Delivered/cancelled excluded; a pending order is not yet in flight
        assert!(items.is_empty());
    }

    #[test]
    fn test_queue_is_uncapped() {
        let now = base_time();
        let quotes: Vec<_> = (0..40).map(|_| quote(QuoteStatus::Pending, now)).collect();
        let items = work_queue(&quotes, &[], &[], &dir());
        assert_eq!(items.len(), 40);
    }

    #[test]
    fn test_accepted_quotes_not_queued() {
        let now = base_time();
        let quotes = vec![quote(QuoteStatus::Accepted, now)];
        assert!(work_queue(&quotes, &[], &[], &dir()).is_empty());
    }

    #[test]
    fn test_deleted_rows_excluded() {
        let now = base_time();
        let mut binned = order(OrderStatus::Production, now);
        binned.deleted_at = Some(now);
        assert!(work_queue(&[], &[], &[binned], &dir()).is_empty());
    }
}
