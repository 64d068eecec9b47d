//! Email draft model.

use chrono::{DateTime, Utc};
use packdesk_core::DraftId;
use serde::Serialize;
use sqlx::FromRow;

/// A saved campaign draft (`email_drafts` table).
///
/// Drafts are explicit: created, updated, and deleted only through the
/// drafts endpoints, never implicitly on send.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EmailDraft {
    pub id: DraftId,
    pub subject: String,
    pub greeting: String,
    pub content: String,
    pub closing: String,
    pub images: Option<Vec<String>>,
    pub selected_page: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}
