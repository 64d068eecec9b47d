//! Quote and RFQ submission models.
//!
//! Store quotes and RFQ submissions live in separate tables but are presented
//! to the dashboards as a single merged list. An RFQ carries no pricing of its
//! own, so the merged view synthesizes a reference number from the row id, a
//! zero amount, and a 30-day validity window.

use chrono::{DateTime, Duration, Utc};
use packdesk_core::{CustomerId, QuoteId, QuoteStatus};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// Number of days an RFQ-derived quote is considered valid.
const RFQ_VALIDITY_DAYS: i64 = 30;

/// A store quote row (`quotes` table).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Quote {
    pub id: QuoteId,
    pub quote_number: String,
    pub user_id: CustomerId,
    pub status: QuoteStatus,
    pub total_amount: Decimal,
    pub quoted_amount: Option<Decimal>,
    pub admin_reply: Option<String>,
    pub replied_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub valid_until: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// A customer RFQ submission row (`rfq_submissions` table).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RfqSubmission {
    pub id: QuoteId,
    pub user_id: CustomerId,
    pub status: QuoteStatus,
    pub message: Option<String>,
    pub website_link: Option<String>,
    pub photo_urls: Option<Vec<String>>,
    pub quoted_amount: Option<Decimal>,
    pub admin_reply: Option<String>,
    pub replied_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// The merged quote shape consumed by dashboards and derivations.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteView {
    pub id: QuoteId,
    pub quote_number: String,
    pub user_id: CustomerId,
    pub status: QuoteStatus,
    pub total_amount: Decimal,
    pub quoted_amount: Option<Decimal>,
    pub admin_reply: Option<String>,
    pub replied_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub website_link: Option<String>,
    pub photo_urls: Vec<String>,
    pub valid_until: Option<DateTime<Utc>>,
    pub is_rfq: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<Quote> for QuoteView {
    fn from(q: Quote) -> Self {
        Self {
            id: q.id,
            quote_number: q.quote_number,
            user_id: q.user_id,
            status: q.status,
            total_amount: q.total_amount,
            quoted_amount: q.quoted_amount,
            admin_reply: q.admin_reply,
            replied_at: q.replied_at,
            notes: q.notes,
            website_link: None,
            photo_urls: Vec::new(),
            valid_until: q.valid_until,
            is_rfq: false,
            created_at: q.created_at,
            updated_at: q.updated_at,
            deleted_at: q.deleted_at,
        }
    }
}

impl From<RfqSubmission> for QuoteView {
    fn from(rfq: RfqSubmission) -> Self {
        let quote_number = format!("RFQ-{}", rfq.id.short());
        let valid_until = rfq.created_at + Duration::days(RFQ_VALIDITY_DAYS);
        Self {
            id: rfq.id,
            quote_number,
            user_id: rfq.user_id,
            status: rfq.status,
            total_amount: Decimal::ZERO,
            quoted_amount: rfq.quoted_amount,
            admin_reply: rfq.admin_reply,
            replied_at: rfq.replied_at,
            notes: rfq.message,
            website_link: rfq.website_link,
            photo_urls: rfq.photo_urls.unwrap_or_default(),
            valid_until: Some(valid_until),
            is_rfq: true,
            created_at: rfq.created_at,
            updated_at: rfq.updated_at,
            deleted_at: rfq.deleted_at,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_rfq() -> RfqSubmission {
        RfqSubmission {
            id: QuoteId::generate(),
            user_id: CustomerId::generate(),
            status: QuoteStatus::Pending,
            message: Some("need 10k stand-up pouches".to_string()),
            website_link: None,
            photo_urls: None,
            quoted_amount: None,
            admin_reply: None,
            replied_at: None,
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
            updated_at: None,
            deleted_at: None,
        }
    }

    #[test]
    fn test_rfq_view_synthesizes_reference_number() {
        let rfq = sample_rfq();
        let short = rfq.id.short();
        let view = QuoteView::from(rfq);
        assert_eq!(view.quote_number, format!("RFQ-{short}"));
        assert!(view.is_rfq);
        assert_eq!(view.total_amount, Decimal::ZERO);
    }

    #[test]
    fn test_rfq_view_validity_window() {
        let rfq = sample_rfq();
        let created = rfq.created_at;
        let view = QuoteView::from(rfq);
        assert_eq!(view.valid_until.unwrap(), created + Duration::days(30));
    }

    #[test]
    fn test_rfq_message_becomes_notes() {
        let view = QuoteView::from(sample_rfq());
        assert_eq!(view.notes.as_deref(), Some("need 10k stand-up pouches"));
    }
}
