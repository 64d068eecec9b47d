//! Pure derivation layer.
//!
//! Everything in this module recomputes wholesale from the entity collections
//! on every call: no I/O, no caching, no incremental diffing. Collection
//! sizes are bounded by the fetch caps in [`crate::db`], and every derivation
//! slices to a small display count, so wholesale recomputation stays cheap.
//!
//! Soft-deleted rows are filtered here as well as at the query boundary, so a
//! stale caller can never surface a binned item in an active view.

use chrono::{DateTime, Utc};

pub mod notifications;
pub mod pins;
pub mod queue;
pub mod quick_access;

pub use notifications::{Notification, NotificationKind, notifications};
pub use pins::{PinKind, PinListItem, pin_list};
pub use queue::{WorkItemKind, WorkQueueItem, work_queue};
pub use quick_access::{QuickAccessItem, QuickKind, quick_access};

/// Relative-age label for a timestamp.
///
/// Thresholds: under a minute is "just now", under an hour "{n}m ago", under
/// a day "{n}h ago", anything older "{n}d ago". Future timestamps clamp to
/// "just now".
#[must_use]
pub fn relative_age(now: DateTime<Utc>, then: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then);
    let minutes = elapsed.num_minutes();
    if minutes < 1 {
        return "just now".to_string();
    }
    if minutes < 60 {
        return format!("{minutes}m ago");
    }
    let hours = elapsed.num_hours();
    if hours < 24 {
        return format!("{hours}h ago");
    }
    format!("{}d ago", elapsed.num_days())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_relative_age_just_now() {
        assert_eq!(relative_age(now(), now()), "just now");
        assert_eq!(relative_age(now(), now() - Duration::seconds(59)), "just now");
    }

    #[test]
    fn test_relative_age_minutes() {
        assert_eq!(relative_age(now(), now() - Duration::minutes(1)), "1m ago");
        assert_eq!(relative_age(now(), now() - Duration::minutes(59)), "59m ago");
    }

    #[test]
    fn test_relative_age_hours() {
        assert_eq!(relative_age(now(), now() - Duration::hours(1)), "1h ago");
        assert_eq!(relative_age(now(), now() - Duration::hours(23)), "23h ago");
    }

    #[test]
    fn test_relative_age_days() {
        assert_eq!(relative_age(now(), now() - Duration::hours(24)), "1d ago");
        assert_eq!(relative_age(now(), now() - Duration::days(10)), "10d ago");
    }

    #[test]
    fn test_relative_age_future_clamps() {
        assert_eq!(relative_age(now(), now() + Duration::minutes(5)), "just now");
    }
}
