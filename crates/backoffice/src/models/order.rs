//! Store order model.

use chrono::{DateTime, Utc};
use packdesk_core::{CustomerId, Email, OrderId, OrderStatus};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// A store order row (`orders` table).
///
/// Customer name/email are denormalized onto the order at checkout time, so
/// guest orders resolve without a profile row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub order_number: String,
    pub user_id: Option<CustomerId>,
    pub customer_name: Option<String>,
    pub customer_email: Option<Email>,
    pub status: OrderStatus,
    pub total_amount: Decimal,
    pub tracking_number: Option<String>,
    pub carrier: Option<String>,
    pub tracking_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
}
