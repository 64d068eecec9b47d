//! Campaign and draft route handlers.
//!
//! The send endpoint builds the deduplicated roster, renders the branded
//! wrapper once, and hands off to the chunked dispatcher. A `test_email`
//! body short-circuits to a single send.

use askama::Template;
use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use packdesk_core::DraftId;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::db::{CustomerRepository, DraftFields, DraftRepository, SubscriberRepository};
use crate::error::{AppError, Result};
use crate::models::EmailDraft;
use crate::services::templates::{CampaignEmail, UNSUBSCRIBE_TOKEN};
use crate::services::{
    CampaignSender, Dispatcher, OutboundEmail, Party, Recipient, Roster, RosterEntry,
    build_roster, personalize,
};
use crate::state::AppState;

/// How many error strings the response carries at most.
const RESPONSE_ERROR_CAP: usize = 10;

/// Which contact sources feed the roster.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct AudienceSelection {
    #[serde(default = "default_true")]
    pub include_subscribers: bool,
    #[serde(default)]
    pub include_customers: bool,
    #[serde(default)]
    pub include_inquiries: bool,
}

const fn default_true() -> bool {
    true
}

/// Roster counts shown to the operator before dispatch.
#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub recipients: usize,
    pub skipped_unsubscribed: usize,
    pub skipped_invalid: usize,
}

/// POST /campaigns/preview
#[instrument(skip(state))]
pub async fn preview(
    State(state): State<AppState>,
    Json(selection): Json<AudienceSelection>,
) -> Result<Json<PreviewResponse>> {
    let roster = assemble_roster(&state, selection).await?;
    Ok(Json(PreviewResponse {
        recipients: roster.len(),
        skipped_unsubscribed: roster.skipped_unsubscribed,
        skipped_invalid: roster.skipped_invalid,
    }))
}

/// Campaign send request.
#[derive(Debug, Deserialize)]
pub struct SendRequest {
    pub subject: String,
    pub content: String,
    #[serde(default = "default_greeting")]
    pub greeting: String,
    #[serde(default = "default_closing")]
    pub closing: String,
    #[serde(default)]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub cta_link: Option<String>,
    #[serde(default = "default_cta_text")]
    pub cta_text: String,
    /// When set, send only to this address (campaign preview in an inbox).
    #[serde(default)]
    pub test_email: Option<String>,
    #[serde(flatten)]
    pub audience: AudienceSelection,
}

fn default_greeting() -> String {
    "Hi {{name}}".to_string()
}

fn default_closing() -> String {
    "Best regards,\nThe Packdesk Team".to_string()
}

fn default_cta_text() -> String {
    "Learn More".to_string()
}

/// Campaign send response: aggregate counts, a capped error sample, and the
/// exclusion counts the operator confirmed.
#[derive(Debug, Serialize)]
pub struct SendResponse {
    pub success: bool,
    pub sent: usize,
    pub failed: usize,
    pub errors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    pub skipped_unsubscribed: usize,
    pub skipped_invalid: usize,
}

/// POST /campaigns/send
#[instrument(skip(state, request), fields(test = request.test_email.is_some()))]
pub async fn send(
    State(state): State<AppState>,
    Json(request): Json<SendRequest>,
) -> Result<Json<SendResponse>> {
    if request.subject.trim().is_empty() || request.content.trim().is_empty() {
        return Err(AppError::BadRequest(
            "subject and content are required".to_string(),
        ));
    }

    let html = CampaignEmail {
        greeting: &request.greeting,
        content_html: &request.content,
        closing: &request.closing,
        featured_image: request.featured_image.as_deref(),
        cta_link: request.cta_link.as_deref(),
        cta_text: &request.cta_text,
        base_url: &state.config().base_url,
        unsubscribe_token: UNSUBSCRIBE_TOKEN,
    }
    .render()?;

    // Test mode: one personalized send, no roster, no chunking
    if let Some(test_email) = request.test_email {
        let recipient = Recipient {
            email: test_email.trim().to_lowercase(),
            name: None,
        };
        let receipt = state
            .mailer()
            .send(&OutboundEmail {
                to: vec![Party {
                    email: recipient.email.clone(),
                    name: None,
                }],
                cc: Vec::new(),
                subject: personalize(&request.subject, &recipient),
                html_content: personalize(&html, &recipient),
                tags: vec!["test-email".to_string()],
            })
            .await?;
        return Ok(Json(SendResponse {
            success: true,
            sent: 1,
            failed: 0,
            errors: Vec::new(),
            message_id: receipt.message_id,
            skipped_unsubscribed: 0,
            skipped_invalid: 0,
        }));
    }

    let roster = assemble_roster(&state, request.audience).await?;
    if roster.is_empty() {
        return Err(AppError::BadRequest("no recipients selected".to_string()));
    }

    let total = roster.len();
    tracing::info!(recipients = total, subject = %request.subject, "campaign dispatch starting");

    let dispatcher = Dispatcher::new(CampaignSender::new(state.mailer()));
    let report = dispatcher
        .dispatch(&roster.recipients, &request.subject, &html, |sent, total| {
            tracing::info!(sent, total, "campaign progress");
        })
        .await;

    tracing::info!(
        sent = report.success,
        failed = report.failed,
        "campaign dispatch complete"
    );

    let mut errors = report.errors;
    errors.truncate(RESPONSE_ERROR_CAP);

    Ok(Json(SendResponse {
        success: report.success > 0,
        sent: report.success,
        failed: report.failed,
        errors,
        message_id: None,
        skipped_unsubscribed: roster.skipped_unsubscribed,
        skipped_invalid: roster.skipped_invalid,
    }))
}

/// Fetch the selected sources and build the deduplicated roster.
///
/// Source order is the dedup priority: subscribers, then customers, then
/// inquiries.
async fn assemble_roster(state: &AppState, selection: AudienceSelection) -> Result<Roster> {
    let pool = state.pool();
    let mut entries: Vec<RosterEntry> = Vec::new();

    if selection.include_subscribers {
        let subscribers = SubscriberRepository::new(pool).list().await?;
        entries.extend(subscribers.iter().map(RosterEntry::from));
    }
    let customer_repo = CustomerRepository::new(pool);
    if selection.include_customers {
        let customers = customer_repo.list_customers().await?;
        entries.extend(customers.iter().map(RosterEntry::from));
    }
    if selection.include_inquiries {
        let inquiries = customer_repo.list_inquiries().await?;
        entries.extend(inquiries.iter().map(RosterEntry::from));
    }

    Ok(build_roster(entries))
}

/// Draft payload for create/update.
#[derive(Debug, Deserialize)]
pub struct DraftBody {
    pub subject: String,
    #[serde(default = "default_greeting")]
    pub greeting: String,
    pub content: String,
    #[serde(default = "default_closing")]
    pub closing: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub selected_page: Option<String>,
}

impl From<DraftBody> for DraftFields {
    fn from(body: DraftBody) -> Self {
        Self {
            subject: body.subject,
            greeting: body.greeting,
            content: body.content,
            closing: body.closing,
            images: body.images,
            selected_page: body.selected_page,
        }
    }
}

/// GET /drafts
#[instrument(skip(state))]
pub async fn list_drafts(State(state): State<AppState>) -> Result<Json<Vec<EmailDraft>>> {
    Ok(Json(DraftRepository::new(state.pool()).list().await?))
}

/// POST /drafts
#[instrument(skip(state, body))]
pub async fn create_draft(
    State(state): State<AppState>,
    Json(body): Json<DraftBody>,
) -> Result<Json<EmailDraft>> {
    let draft = DraftRepository::new(state.pool())
        .create(&body.into(), Utc::now())
        .await?;
    Ok(Json(draft))
}

/// PUT /drafts/{id}
#[instrument(skip(state, body))]
pub async fn update_draft(
    State(state): State<AppState>,
    Path(id): Path<DraftId>,
    Json(body): Json<DraftBody>,
) -> Result<Json<serde_json::Value>> {
    DraftRepository::new(state.pool())
        .update(id, &body.into(), Utc::now())
        .await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

/// DELETE /drafts/{id}
#[instrument(skip(state))]
pub async fn delete_draft(
    State(state): State<AppState>,
    Path(id): Path<DraftId>,
) -> Result<Json<serde_json::Value>> {
    DraftRepository::new(state.pool()).delete(id).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}
