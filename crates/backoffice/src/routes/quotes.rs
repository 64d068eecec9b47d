//! Quote and RFQ route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use packdesk_core::{QuoteId, QuoteStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::db::QuoteRepository;
use crate::error::{AppError, Result};
use crate::models::QuoteView;
use crate::routes::ConfirmRequest;
use crate::state::AppState;
use crate::workflow::{bin, transitions};

/// Listing with the stat-card counts the dashboard shows.
#[derive(Debug, Serialize)]
pub struct QuotesResponse {
    pub quotes: Vec<QuoteView>,
    pub total: usize,
    pub pending: usize,
    pub rfq_submissions: usize,
}

/// GET /quotes
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<QuotesResponse>> {
    let quotes = QuoteRepository::new(state.pool()).list_active().await?;
    let total = quotes.len();
    let pending = quotes
        .iter()
        .filter(|q| q.status == QuoteStatus::Pending)
        .count();
    let rfq_submissions = quotes.iter().filter(|q| q.is_rfq).count();
    Ok(Json(QuotesResponse {
        quotes,
        total,
        pending,
        rfq_submissions,
    }))
}

/// GET /quotes/{id}
#[instrument(skip(state))]
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<QuoteId>,
) -> Result<Json<QuoteView>> {
    let Some(view) = QuoteRepository::new(state.pool()).get(id).await? else {
        return Err(AppError::NotFound(format!("quote {id}")));
    };
    Ok(Json(view))
}

/// Body for a ground-truth status write.
#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: QuoteStatus,
}

/// POST /quotes/{id}/status
#[instrument(skip(state))]
pub async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<QuoteId>,
    Json(request): Json<StatusRequest>,
) -> Result<Json<serde_json::Value>> {
    transitions::set_quote_status(state.pool(), id, request.status).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

/// Body for an admin reply.
#[derive(Debug, Deserialize)]
pub struct ReplyRequest {
    pub reply: String,
    #[serde(default)]
    pub quoted_amount: Option<Decimal>,
}

/// POST /quotes/{id}/reply
#[instrument(skip(state, request))]
pub async fn reply(
    State(state): State<AppState>,
    Path(id): Path<QuoteId>,
    Json(request): Json<ReplyRequest>,
) -> Result<Json<serde_json::Value>> {
    transitions::reply_to_quote(state.pool(), id, &request.reply, request.quoted_amount).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

/// POST /quotes/{id}/delete
#[instrument(skip(state))]
pub async fn soft_delete(
    State(state): State<AppState>,
    Path(id): Path<QuoteId>,
    Json(confirm): Json<ConfirmRequest>,
) -> Result<Json<serde_json::Value>> {
    confirm.require("delete quote")?;
    bin::soft_delete(state.pool(), bin::BinKind::Quote, id.as_uuid()).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}
