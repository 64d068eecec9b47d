//! Pin-candidate list derivation.
//!
//! The pin list offers the items an operator is most likely to want at hand:
//! pending quotes, artworks waiting for review, and artworks moving through
//! the studio. Whether an item is pinned comes from the locally persisted
//! [`crate::pins::PinStore`], never from the database.

use std::collections::BTreeSet;

use packdesk_core::{ArtworkStatus, QuoteStatus};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{ArtworkFile, CustomerDirectory, QuoteView};

/// Caps per candidate category.
const PENDING_QUOTE_CAP: usize = 5;
const PENDING_ARTWORK_CAP: usize = 5;
const IN_PROGRESS_ARTWORK_CAP: usize = 3;

/// Pin-candidate category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PinKind {
    Quote,
    Artwork,
}

/// One pin-candidate entry.
#[derive(Debug, Clone, Serialize)]
pub struct PinListItem {
    pub id: Uuid,
    pub name: String,
    pub info: String,
    pub kind: PinKind,
    /// Short status badge ("pending", "pending review", "in review", "prepress").
    pub badge: &'static str,
    pub pinned: bool,
}

/// Build the pin-candidate list.
///
/// Entries are sorted stably on the pinned flag so pinned items sort LAST;
/// the tie-break direction was ambiguous in the legacy dashboards and is
/// fixed to pinned-last here, uniformly.
#[must_use]
pub fn pin_list(
    quotes: &[QuoteView],
    artworks: &[ArtworkFile],
    directory: &CustomerDirectory,
    pinned: &BTreeSet<Uuid>,
) -> Vec<PinListItem> {
    let mut items: Vec<PinListItem> = Vec::new();

    items.extend(
        quotes
            .iter()
            .filter(|q| q.deleted_at.is_none() && q.status == QuoteStatus::Pending)
            .take(PENDING_QUOTE_CAP)
            .map(|q| PinListItem {
                id: q.id.as_uuid(),
                name: q.quote_number.clone(),
                info: directory.display_name(q.user_id.as_uuid()),
                kind: PinKind::Quote,
                badge: "pending",
                pinned: pinned.contains(&q.id.as_uuid()),
            }),
    );

    items.extend(
        artworks
            .iter()
            .filter(|a| a.deleted_at.is_none() && a.status == ArtworkStatus::PendingReview)
            .take(PENDING_ARTWORK_CAP)
            .map(|a| PinListItem {
                id: a.id.as_uuid(),
                name: a.name.clone(),
                info: directory.display_name(a.user_id.as_uuid()),
                kind: PinKind::Artwork,
                badge: "pending review",
                pinned: pinned.contains(&a.id.as_uuid()),
            }),
    );

    items.extend(
        artworks
            .iter()
            .filter(|a| a.deleted_at.is_none() && a.status.is_in_progress())
            .take(IN_PROGRESS_ARTWORK_CAP)
            .map(|a| PinListItem {
                id: a.id.as_uuid(),
                name: a.name.clone(),
                info: directory.display_name(a.user_id.as_uuid()),
                kind: PinKind::Artwork,
                badge: if a.status == ArtworkStatus::Prepress {
                    "prepress"
                } else {
                    "in review"
                },
                pinned: pinned.contains(&a.id.as_uuid()),
            }),
    );

    // Stable sort: unpinned keep their category order up front, pinned sink
    // to the end
    items.sort_by_key(|i| u8::from(i.pinned));
    items
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
    fn test_category_caps() {
        let now = base_time();
        let quotes: Vec<_> = (0..9)
            .map(|i| quote(QuoteStatus::Pending, now - Duration::minutes(i)))
            .collect();
        let mut artworks: Vec<_> = (0..9)
            .map(|i| artwork(ArtworkStatus::PendingReview, now - Duration::minutes(i)))
            .collect();
        artworks.extend((0..4).map(|i| artwork(ArtworkStatus::Prepress, now - Duration::minutes(i))));

        let items = pin_list(&quotes, &artworks, &dir(), &BTreeSet::new());
        assert_eq!(items.len(), 5 + 5 + 3);
        assert_eq!(items.iter().filter(|i| i.badge == "pending").count(), 5);
        assert_eq!(
            items.iter().filter(|i| i.badge == "pending review").count(),
            5
        );
        assert_eq!(items.iter().filter(|i| i.badge == "prepress").count(), 3);
    }

    #[test]
    fn test_pinned_items_sort_last() {
        let now = base_time();
        let quotes: Vec<_> = (0..3)
            .map(|i| quote(QuoteStatus::Pending, now - Duration::minutes(i)))
            .collect();
        let pinned: BTreeSet<Uuid> = quotes
            .first()
            .map(|q| q.id.as_uuid())
            .into_iter()
            .collect();

        let items = pin_list(&quotes, &[], &dir(), &pinned);
        assert_eq!(items.len(), 3);
        assert!(!items.first().map_or(true, |i| i.pinned));
        assert!(items.last().map_or(false, |i| i.pinned));
    }

    #[test]
    fn test_sort_is_stable_within_groups() {
        let now = base_time();
        let quotes: Vec<_> = (0..4)
            .map(|i| quote(QuoteStatus::Pending, now - Duration::minutes(i)))
            .collect();
        let items = pin_list(&quotes, &[], &dir(), &BTreeSet::new());
        let names: Vec<_> = items.iter().map(|i| i.name.clone()).collect();
        let expected: Vec<_> = quotes.iter().map(|q| q.quote_number.clone()).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_in_review_badge() {
        let now = base_time();
        let artworks = vec![artwork(ArtworkStatus::InReview, now)];
        let items = pin_list(&[], &artworks, &dir(), &BTreeSet::new());
        assert_eq!(items.first().map(|i| i.badge), Some("in review"));
    }

    #[test]
    fn test_deleted_rows_excluded() {
        let now = base_time();
        let mut binned = quote(QuoteStatus::Pending, now);
        binned.deleted_at = Some(now);
        let items = pin_list(&[binned], &[], &dir(), &BTreeSet::new());
        assert!(items.is_empty());
    }
}
