//! Fixture builders shared by unit tests.

use chrono::{DateTime, TimeZone, Utc};
use packdesk_core::{
    ArtworkId, ArtworkStatus, CustomerId, LinkType, OrderId, OrderStatus, QuoteId, QuoteStatus,
};
use rust_decimal::Decimal;

use crate::models::{ArtworkFile, Order, QuoteView};

/// A fixed reference instant so relative ages are deterministic.
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub fn quote(status: QuoteStatus, created_at: DateTime<Utc>) -> QuoteView {
    let id = QuoteId::generate();
    QuoteView {
        id,
        quote_number: format!("Q-{}", id.short()),
        user_id: CustomerId::generate(),
        status,
        total_amount: Decimal::new(125_000, 2),
        quoted_amount: None,
        admin_reply: None,
        replied_at: None,
        notes: None,
        website_link: None,
        photo_urls: Vec::new(),
        valid_until: None,
        is_rfq: false,
        created_at,
        updated_at: None,
        deleted_at: None,
    }
}

pub fn artwork(status: ArtworkStatus, created_at: DateTime<Utc>) -> ArtworkFile {
    let id = ArtworkId::generate();
    ArtworkFile {
        id,
        user_id: CustomerId::generate(),
        name: format!("artwork-{}.pdf", id.short()),
        file_url: "https://files.packdesk.io/a.pdf".to_string(),
        file_size: 2048,
        status,
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
        created_at,
        updated_at: None,
        deleted_at: None,
    }
}

pub fn order(status: OrderStatus, created_at: DateTime<Utc>) -> Order {
    let id = OrderId::generate();
    Order {
        id,
        order_number: format!("PO-{}", id.short()),
        user_id: Some(CustomerId::generate()),
        customer_name: Some("Acme Foods".to_string()),
        customer_email: None,
        status,
        total_amount: Decimal::new(98_000, 2),
        tracking_number: None,
        carrier: None,
        tracking_url: None,
        created_at,
        updated_at: None,
        deleted_at: None,
    }
}
