//! Newsletter subscriber model.

use chrono::{DateTime, Utc};
use packdesk_core::{Email, SubscriberId};
use serde::Serialize;
use sqlx::FromRow;

/// A newsletter subscriber (`newsletter_subscribers` table).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NewsletterSubscriber {
    pub id: SubscriberId,
    pub email: Email,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}
