//! Artwork file model.

use chrono::{DateTime, Utc};
use packdesk_core::{ArtworkId, ArtworkStatus, CustomerId, LinkType, OrderId, QuoteId};
use serde::Serialize;
use sqlx::FromRow;

/// A customer-uploaded artwork file (`artwork_files` table).
///
/// Carries the studio coding fields (customer/product code, version) and an
/// optional link to the order or quote the artwork belongs to. Linking is
/// exclusive: `linked_order_id` and `linked_quote_id` are never both set.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ArtworkFile {
    pub id: ArtworkId,
    pub user_id: CustomerId,
    pub name: String,
    pub file_url: String,
    pub file_size: i64,
    pub status: ArtworkStatus,
    pub admin_feedback: Option<String>,
    pub customer_comment: Option<String>,
    pub customer_code: Option<String>,
    pub product_code: Option<String>,
    pub version_number: i32,
    pub artwork_code: Option<String>,
    pub proof_url: Option<String>,
    pub link_type: LinkType,
    pub linked_order_id: Option<OrderId>,
    pub linked_quote_id: Option<QuoteId>,
    pub order_number: Option<String>,
    pub quote_number: Option<String>,
    pub approval_type: Option<String>,
    pub approver_signature: Option<String>,
    pub approver_company: Option<String>,
    pub approval_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl ArtworkFile {
    /// Versioned display code, e.g. `ACM01-PKG01-V003`, when both coding
    /// fields are assigned.
    #[must_use]
    pub fn display_code(&self) -> Option<String> {
        match (&self.customer_code, &self.product_code) {
            (Some(c), Some(p)) => Some(format!("{c}-{p}-V{:03}", self.version_number)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> ArtworkFile {
        ArtworkFile {
            id: ArtworkId::generate(),
            user_id: CustomerId::generate(),
            name: "front-panel.pdf".to_string(),
            file_url: "https://files.packdesk.io/front-panel.pdf".to_string(),
            file_size: 1024,
            status: ArtworkStatus::PendingReview,
            admin_feedback: None,
            customer_comment: None,
            customer_code: None,
            product_code: None,
            version_number: 1,
            artwork_code: None,
            proof_url: None,
            link_type: LinkType::None,
            linked_order_id: None,
            linked_quote_id: None,
            order_number: None,
            quote_number: None,
            approval_type: None,
            approver_signature: None,
            approver_company: None,
            approval_notes: None,
            created_at: chrono::Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).single().expect("valid"),
            updated_at: None,
            deleted_at: None,
        }
    }

    #[test]
    fn test_display_code_requires_both_codes() {
        let mut artwork = sample();
        assert_eq!(artwork.display_code(), None);

        artwork.customer_code = Some("ACM01".to_string());
        assert_eq!(artwork.display_code(), None);

        artwork.product_code = Some("PKG01".to_string());
        artwork.version_number = 3;
        assert_eq!(artwork.display_code().as_deref(), Some("ACM01-PKG01-V003"));
    }
}
