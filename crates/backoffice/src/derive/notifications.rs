//! Derived attention notifications.
//!
//! Notifications are ephemeral: built fresh from the collections on every
//! request, never persisted. The list is assembled in a fixed category order
//! (artwork uploads, then quote requests, then customer approvals), NOT
//! globally time-sorted, and truncated to [`MAX_NOTIFICATIONS`].

use chrono::{DateTime, Utc};
use packdesk_core::{ArtworkStatus, QuoteStatus};
use serde::Serialize;
use uuid::Uuid;

use super::relative_age;
use crate::models::{ArtworkFile, CustomerDirectory, QuoteView};

/// Hard cap on the derived list.
pub const MAX_NOTIFICATIONS: usize = 6;

/// Per-category caps, applied before the overall truncation.
const ARTWORK_UPLOAD_CAP: usize = 3;
const QUOTE_REQUEST_CAP: usize = 3;
const APPROVAL_CAP: usize = 2;

/// Notification category, used by the client for icon selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Artwork,
    Quote,
    Approve,
}

/// One derived notification.
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub id: Uuid,
    pub title: String,
    pub subtitle: String,
    /// Relative-age label ("just now", "5m ago", ...).
    pub time: String,
    pub kind: NotificationKind,
    /// Dashboard location the notification points at.
    pub link: &'static str,
}

/// Build the notification list from the current collections.
///
/// Categories, in declared order:
/// 1. up to 3 newest artworks awaiting review
/// 2. up to 3 newest pending quotes
/// 3. up to 2 newest approved artworks carrying an `updated_at`
///
/// The concatenation is truncated to six entries, so a busy review queue
/// crowds approvals out entirely.
#[must_use]
pub fn notifications(
    quotes: &[QuoteView],
    artworks: &[ArtworkFile],
    directory: &CustomerDirectory,
    now: DateTime<Utc>,
) -> Vec<Notification> {
    let mut pending_artworks: Vec<&ArtworkFile> = artworks
        .iter()
        .filter(|a| a.deleted_at.is_none() && a.status == ArtworkStatus::PendingReview)
        .collect();
    pending_artworks.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let mut pending_quotes: Vec<&QuoteView> = quotes
        .iter()
        .filter(|q| q.deleted_at.is_none() && q.status == QuoteStatus::Pending)
        .collect();
    pending_quotes.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let mut approved_artworks: Vec<&ArtworkFile> = artworks
        .iter()
        .filter(|a| {
            a.deleted_at.is_none()
                && a.status == ArtworkStatus::Approved
                && a.updated_at.is_some()
        })
        .collect();
    approved_artworks.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

    let uploads = pending_artworks
        .into_iter()
        .take(ARTWORK_UPLOAD_CAP)
        .map(|a| Notification {
            id: a.id.as_uuid(),
            title: a.name.clone(),
            subtitle: format!(
                "Uploaded by {}",
                directory.display_name(a.user_id.as_uuid())
            ),
            time: relative_age(now, a.created_at),
            kind: NotificationKind::Artwork,
            link: "/management?tab=artwork",
        });

    let requests = pending_quotes
        .into_iter()
        .take(QUOTE_REQUEST_CAP)
        .map(|q| Notification {
            id: q.id.as_uuid(),
            title: q.quote_number.clone(),
            subtitle: format!(
                "Quote request from {}",
                directory.display_name(q.user_id.as_uuid())
            ),
            time: relative_age(now, q.created_at),
            kind: NotificationKind::Quote,
            link: "/management?tab=quotes",
        });

    let approvals = approved_artworks
        .into_iter()
        .take(APPROVAL_CAP)
        .map(|a| Notification {
            id: a.id.as_uuid(),
            title: a.name.clone(),
            subtitle: "Approved by customer".to_string(),
            time: relative_age(now, a.updated_at.unwrap_or(a.created_at)),
            kind: NotificationKind::Approve,
            link: "/management?tab=artwork",
        });

    uploads
        .chain(requests)
        .chain(approvals)
        .take(MAX_NOTIFICATIONS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{artwork, base_time, quote};
    use chrono::Duration;

    fn dir() -> CustomerDirectory {
        CustomerDirectory::new(&[], &[])
    }

    #[test]
    fn test_cap_composition_when_all_categories_full() {
        let now = base_time();
        let quotes: Vec<_> = (0..5)
            .map(|i| quote(QuoteStatus::Pending, now - Duration::minutes(i)))
            .collect();
        let mut artworks: Vec<_> = (0..5)
            .map(|i| artwork(ArtworkStatus::PendingReview, now - Duration::minutes(i)))
            .collect();
        for i in 0..5 {
            let mut a = artwork(ArtworkStatus::Approved, now - Duration::hours(1));
            a.updated_at = Some(now - Duration::minutes(i));
            artworks.push(a);
        }

        let list = notifications(&quotes, &artworks, &dir(), now);

        // 3 uploads + 3 quotes fill the cap; approvals are crowded out
        assert_eq!(list.len(), MAX_NOTIFICATIONS);
        assert_eq!(
            list.iter()
                .filter(|n| n.kind == NotificationKind::Artwork)
                .count(),
            3
        );
        assert_eq!(
            list.iter()
                .filter(|n| n.kind == NotificationKind::Quote)
                .count(),
            3
        );
        assert_eq!(
            list.iter()
                .filter(|n| n.kind == NotificationKind::Approve)
                .count(),
            0
        );
    }

    #[test]
    fn test_category_order_not_global_time_order() {
        let now = base_time();
        // The quote is newer than the artwork, but artwork uploads still
        // lead the list
        let quotes = vec![quote(QuoteStatus::Pending, now)];
        let artworks = vec![artwork(
            ArtworkStatus::PendingReview,
            now - Duration::hours(5),
        )];

        let list = notifications(&quotes, &artworks, &dir(), now);
        assert_eq!(list.len(), 2);
        assert_eq!(list.first().map(|n| n.kind), Some(NotificationKind::Artwork));
        assert_eq!(list.get(1).map(|n| n.kind), Some(NotificationKind::Quote));
    }

    #[test]
    fn test_newest_first_within_category() {
        let now = base_time();
        let older = artwork(ArtworkStatus::PendingReview, now - Duration::hours(2));
        let newer = artwork(ArtworkStatus::PendingReview, now - Duration::minutes(3));
        let list = notifications(&[], &[older, newer.clone()], &dir(), now);
        assert_eq!(list.first().map(|n| n.id), Some(newer.id.as_uuid()));
        assert_eq!(list.first().map(|n| n.time.as_str()), Some("3m ago"));
    }

    #[test]
    fn test_approvals_fill_remaining_slots() {
        let now = base_time();
        let mut approved = artwork(ArtworkStatus::Approved, now - Duration::hours(1));
        approved.updated_at = Some(now - Duration::minutes(1));
        let list = notifications(&[], &[approved], &dir(), now);
        assert_eq!(list.len(), 1);
        assert_eq!(list.first().map(|n| n.kind), Some(NotificationKind::Approve));
    }

    #[test]
    fn test_approved_without_updated_at_excluded() {
        let now = base_time();
        let approved = artwork(ArtworkStatus::Approved, now - Duration::hours(1));
        assert!(approved.updated_at.is_none());
        let list = notifications(&[], &[approved], &dir(), now);
        assert!(list.is_empty());
    }

    #[test]
    fn test_deleted_rows_never_notify() {
        let now = base_time();
        let mut binned = artwork(ArtworkStatus::PendingReview, now);
        binned.deleted_at = Some(now);
        let mut binned_quote = quote(QuoteStatus::Pending, now);
        binned_quote.deleted_at = Some(now);
        let list = notifications(&[binned_quote], &[binned], &dir(), now);
        assert!(list.is_empty());
    }
}
