//! Campaign roster building: union, de-duplication, exclusion.
//!
//! The dispatcher does not dedupe; this module is the caller-side step that
//! feeds it. Recipients are deduplicated by lowercased email across source
//! boundaries, first occurrence wins (including its name, or lack of one).
//! Unsubscribed contacts and malformed addresses are excluded and counted
//! separately so the operator can be told before dispatch begins.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::{Customer, Inquiry, NewsletterSubscriber};

/// One dispatch-ready recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A candidate entry before dedup/exclusion.
#[derive(Debug, Clone)]
pub struct RosterEntry {
    pub email: String,
    pub name: Option<String>,
    pub unsubscribed: bool,
}

impl From<&NewsletterSubscriber> for RosterEntry {
    fn from(s: &NewsletterSubscriber) -> Self {
        Self {
            email: s.email.as_str().to_string(),
            name: s.name.clone(),
            unsubscribed: false,
        }
    }
}

impl From<&Customer> for RosterEntry {
    fn from(c: &Customer) -> Self {
        Self {
            email: c.email.as_str().to_string(),
            name: c.full_name.clone(),
            unsubscribed: false,
        }
    }
}

impl From<&Inquiry> for RosterEntry {
    fn from(i: &Inquiry) -> Self {
        Self {
            email: i.email.as_str().to_string(),
            name: i.name.clone(),
            unsubscribed: i.unsubscribed,
        }
    }
}

/// The deduplicated roster plus exclusion counts for the pre-dispatch
/// confirmation message.
#[derive(Debug, Default, Serialize)]
pub struct Roster {
    pub recipients: Vec<Recipient>,
    pub skipped_unsubscribed: usize,
    pub skipped_invalid: usize,
}

impl Roster {
    /// Total addresses that will actually be dispatched.
    #[must_use]
    pub fn len(&self) -> usize {
        self.recipients.len()
    }

    /// True when nothing survived dedup/exclusion.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipients.is_empty()
    }
}

/// Build a roster from candidate entries, in iteration order.
///
/// Order matters: the first occurrence of an email wins, keeping whatever
/// name (possibly none) it carried. Callers chain sources in their canonical
/// priority (subscribers, customers, inquiries).
#[must_use]
pub fn build_roster(entries: impl IntoIterator<Item = RosterEntry>) -> Roster {
    let mut roster = Roster::default();
    let mut seen: HashSet<String> = HashSet::new();

    for entry in entries {
        if entry.unsubscribed {
            roster.skipped_unsubscribed += 1;
            continue;
        }
        // Minimal address sanity: the provider does the real validation
        if !entry.email.contains('@') {
            roster.skipped_invalid += 1;
            continue;
        }
        let key = entry.email.trim().to_lowercase();
        if !seen.insert(key.clone()) {
            continue;
        }
        roster.recipients.push(Recipient {
            email: key,
            name: entry.name,
        });
    }

    roster
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn entry(email: &str, name: Option<&str>) -> RosterEntry {
        RosterEntry {
            email: email.to_string(),
            name: name.map(String::from),
            unsubscribed: false,
        }
    }

    #[test]
    fn test_dedup_is_case_insensitive_first_wins() {
        let roster = build_roster([
            entry("A@x.com", None),
            entry("a@x.com", Some("Bob")),
        ]);

        assert_eq!(roster.len(), 1);
        let first = roster.recipients.first().unwrap();
        assert_eq!(first.email, "a@x.com");
        // The first occurrence carried no name, so the merged entry has none
        assert_eq!(first.name, None);
    }

    #[test]
    fn test_source_order_decides_the_kept_name() {
        let roster = build_roster([
            entry("amy@acme.com", Some("Amy (newsletter)")),
            entry("amy@acme.com", Some("Amy Smith")),
        ]);
        assert_eq!(
            roster.recipients.first().unwrap().name.as_deref(),
            Some("Amy (newsletter)")
        );
    }

    #[test]
    fn test_unsubscribed_excluded_and_counted() {
        let mut unsub = entry("gone@x.com", None);
        unsub.unsubscribed = true;
        let roster = build_roster([unsub, entry("here@x.com", None)]);
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.skipped_unsubscribed, 1);
    }

    #[test]
    fn test_invalid_email_excluded_and_counted() {
        let roster = build_roster([entry("not-an-email", None), entry("ok@x.com", None)]);
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.skipped_invalid, 1);
    }

    #[test]
    fn test_empty_roster() {
        let roster = build_roster([]);
        assert!(roster.is_empty());
        assert_eq!(roster.skipped_invalid, 0);
        assert_eq!(roster.skipped_unsubscribed, 0);
    }
}
