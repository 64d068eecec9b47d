//! Customer profile and CRM inquiry models, plus best-effort resolution.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use packdesk_core::{CustomerId, Email, InquiryId};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A registered customer profile (`profiles` table).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Customer {
    pub id: CustomerId,
    pub email: Email,
    pub full_name: Option<String>,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A CRM inquiry contact (`crm_inquiries` table).
///
/// Overlaps the profile id space: an inquiry that later registered keeps its
/// original row id.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Inquiry {
    pub id: InquiryId,
    pub email: Email,
    pub name: Option<String>,
    pub company: Option<String>,
    pub unsubscribed: bool,
    pub created_at: DateTime<Utc>,
}

/// A resolved owner reference for a work item.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CustomerRef {
    pub name: String,
    pub email: Option<Email>,
}

impl CustomerRef {
    /// The placeholder returned when resolution fails.
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            name: "Unknown".to_string(),
            email: None,
        }
    }
}

/// In-memory lookup from work-item owner ids to display name and email.
///
/// Resolution is best-effort: profiles win, inquiries fill the gaps, anything
/// unmatched resolves to "Unknown".
#[derive(Debug, Default)]
pub struct CustomerDirectory {
    by_id: HashMap<Uuid, CustomerRef>,
}

impl CustomerDirectory {
    /// Build a directory from the two identity sources.
    #[must_use]
    pub fn new(customers: &[Customer], inquiries: &[Inquiry]) -> Self {
        let mut by_id = HashMap::with_capacity(customers.len() + inquiries.len());

        for c in customers {
            let name = c
                .full_name
                .clone()
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| c.email.as_str().to_string());
            by_id.insert(
                c.id.as_uuid(),
                CustomerRef {
                    name,
                    email: Some(c.email.clone()),
                },
            );
        }

        // Inquiries only fill ids the profile table did not claim
        for i in inquiries {
            by_id.entry(i.id.as_uuid()).or_insert_with(|| CustomerRef {
                name: i
                    .name
                    .clone()
                    .filter(|n| !n.trim().is_empty())
                    .unwrap_or_else(|| i.email.as_str().to_string()),
                email: Some(i.email.clone()),
            });
        }

        Self { by_id }
    }

    /// Resolve an owner id, falling back to "Unknown".
    #[must_use]
    pub fn resolve(&self, id: Uuid) -> CustomerRef {
        self.by_id.get(&id).cloned().unwrap_or_else(CustomerRef::unknown)
    }

    /// Display name for an owner id.
    #[must_use]
    pub fn display_name(&self, id: Uuid) -> String {
        self.resolve(id).name
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
    }

    fn customer(id: CustomerId, email: &str, name: Option<&str>) -> Customer {
        Customer {
            id,
            email: Email::parse(email).unwrap(),
            full_name: name.map(String::from),
            company: None,
            phone: None,
            created_at: ts(),
        }
    }

    fn inquiry(id: InquiryId, email: &str, name: Option<&str>) -> Inquiry {
        Inquiry {
            id,
            email: Email::parse(email).unwrap(),
            name: name.map(String::from),
            company: None,
            unsubscribed: false,
            created_at: ts(),
        }
    }

    #[test]
    fn test_profile_wins_over_inquiry() {
        let shared = Uuid::new_v4();
        let dir = CustomerDirectory::new(
            &[customer(CustomerId::new(shared), "amy@acme.com", Some("Amy"))],
            &[inquiry(InquiryId::new(shared), "old@acme.com", Some("A."))],
        );
        let resolved = dir.resolve(shared);
        assert_eq!(resolved.name, "Amy");
        assert_eq!(resolved.email.unwrap().as_str(), "amy@acme.com");
    }

    #[test]
    fn test_inquiry_fills_missing_profile() {
        let id = Uuid::new_v4();
        let dir = CustomerDirectory::new(&[], &[inquiry(InquiryId::new(id), "bo@x.com", None)]);
        // Name falls back to the email when the inquiry has none
        assert_eq!(dir.display_name(id), "bo@x.com");
    }

    #[test]
    fn test_unmatched_resolves_to_unknown() {
        let dir = CustomerDirectory::new(&[], &[]);
        assert_eq!(dir.resolve(Uuid::new_v4()), CustomerRef::unknown());
        assert_eq!(dir.display_name(Uuid::new_v4()), "Unknown");
    }
}
