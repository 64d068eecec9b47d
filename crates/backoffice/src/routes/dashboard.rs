//! Dashboard derivation endpoints.
//!
//! Each GET recomputes its view wholesale from fresh collection snapshots;
//! nothing here is cached or persisted.

use axum::{Json, extract::Query, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use packdesk_core::{ArtworkId, OrderId, QuickArtworkStatus, QuickInvoiceStatus, QuickQuoteStatus, QuoteId};

use crate::db::{ArtworkRepository, CustomerRepository, OrderRepository, QuoteRepository};
use crate::derive;
use crate::error::{AppError, Result};
use crate::models::{ArtworkFile, CustomerDirectory, Order, QuoteView};
use crate::pins::{self, NS_ADMIN, ToggleOutcome};
use crate::state::AppState;
use crate::workflow::transitions;

/// Collections every derivation endpoint needs.
struct Collections {
    quotes: Vec<QuoteView>,
    artworks: Vec<ArtworkFile>,
    orders: Vec<Order>,
    directory: CustomerDirectory,
}

async fn load_collections(state: &AppState) -> Result<Collections> {
    let pool = state.pool();
    let quotes = QuoteRepository::new(pool).list_active().await?;
    let artworks = ArtworkRepository::new(pool).list_active().await?;
    let orders = OrderRepository::new(pool).list_active().await?;
    let customer_repo = CustomerRepository::new(pool);
    let customers = customer_repo.list_customers().await?;
    let inquiries = customer_repo.list_inquiries().await?;
    Ok(Collections {
        quotes,
        artworks,
        orders,
        directory: CustomerDirectory::new(&customers, &inquiries),
    })
}

/// GET /dashboard/notifications
#[instrument(skip(state))]
pub async fn notifications(
    State(state): State<AppState>,
) -> Result<Json<Vec<derive::Notification>>> {
    let c = load_collections(&state).await?;
    Ok(Json(derive::notifications(
        &c.quotes,
        &c.artworks,
        &c.directory,
        chrono::Utc::now(),
    )))
}

/// Context selector for pin endpoints.
#[derive(Debug, Deserialize)]
pub struct PinContext {
    /// Pin-store namespace; defaults to the main admin dashboard.
    #[serde(default = "default_context")]
    pub context: String,
}

fn default_context() -> String {
    NS_ADMIN.to_string()
}

/// GET /dashboard/pins?context=admin-management
#[instrument(skip(state))]
pub async fn pins(
    State(state): State<AppState>,
    Query(ctx): Query<PinContext>,
) -> Result<Json<Vec<derive::PinListItem>>> {
    let pinned = state.pins().load(&ctx.context)?;
    let c = load_collections(&state).await?;
    Ok(Json(derive::pin_list(
        &c.quotes,
        &c.artworks,
        &c.directory,
        &pinned,
    )))
}

/// Body for the pin toggle.
#[derive(Debug, Deserialize)]
pub struct TogglePinRequest {
    #[serde(default = "default_context")]
    pub context: String,
    pub id: Uuid,
}

/// Response for the pin toggle: the outcome plus the final membership.
#[derive(Debug, Serialize)]
pub struct TogglePinResponse {
    pub outcome: ToggleOutcome,
    pub pinned: Vec<Uuid>,
}

/// POST /dashboard/pins/toggle
#[instrument(skip(state))]
pub async fn toggle_pin(
    State(state): State<AppState>,
    Json(request): Json<TogglePinRequest>,
) -> Result<Json<TogglePinResponse>> {
    let outcome = pins::toggle(state.pins(), &request.context, request.id)?;
    let pinned = state.pins().load(&request.context)?;
    Ok(Json(TogglePinResponse {
        outcome,
        pinned: pinned.into_iter().collect(),
    }))
}

/// GET /dashboard/work-queue
#[instrument(skip(state))]
pub async fn work_queue(
    State(state): State<AppState>,
) -> Result<Json<Vec<derive::WorkQueueItem>>> {
    let c = load_collections(&state).await?;
    Ok(Json(derive::work_queue(
        &c.quotes,
        &c.artworks,
        &c.orders,
        &c.directory,
    )))
}

/// GET /dashboard/quick-access
#[instrument(skip(state))]
pub async fn quick_access(
    State(state): State<AppState>,
) -> Result<Json<Vec<derive::QuickAccessItem>>> {
    let c = load_collections(&state).await?;
    Ok(Json(derive::quick_access(
        &c.quotes,
        &c.artworks,
        &c.orders,
        &c.directory,
    )))
}

/// Body for a quick-access status write.
#[derive(Debug, Deserialize)]
pub struct QuickStatusRequest {
    pub id: Uuid,
    pub kind: derive::QuickKind,
    /// Quick-model status string for the given kind.
    pub status: String,
}

/// Response: the ground-truth status actually stored.
#[derive(Debug, Serialize)]
pub struct QuickStatusResponse {
    pub id: Uuid,
    pub stored_status: String,
}

/// POST /dashboard/quick-access/status
///
/// The quick model is lossy-mapped onto the relevant ground truth before the
/// write; the response reports what was stored.
#[instrument(skip(state))]
pub async fn quick_status(
    State(state): State<AppState>,
    Json(request): Json<QuickStatusRequest>,
) -> Result<Json<QuickStatusResponse>> {
    let pool = state.pool();
    let stored = match request.kind {
        derive::QuickKind::Quote => {
            let quick: QuickQuoteStatus = request
                .status
                .parse()
                .map_err(|e: packdesk_core::StatusParseError| AppError::BadRequest(e.to_string()))?;
            transitions::apply_quick_quote_status(pool, QuoteId::new(request.id), quick)
                .await?
                .to_string()
        }
        derive::QuickKind::Invoice => {
            let quick: QuickInvoiceStatus = request
                .status
                .parse()
                .map_err(|e: packdesk_core::StatusParseError| AppError::BadRequest(e.to_string()))?;
            transitions::apply_quick_invoice_status(pool, OrderId::new(request.id), quick)
                .await?
                .to_string()
        }
        derive::QuickKind::Artwork => {
            let quick: QuickArtworkStatus = request
                .status
                .parse()
                .map_err(|e: packdesk_core::StatusParseError| AppError::BadRequest(e.to_string()))?;
            transitions::apply_quick_artwork_status(pool, ArtworkId::new(request.id), quick)
                .await?
                .to_string()
        }
    };

    Ok(Json(QuickStatusResponse {
        id: request.id,
        stored_status: stored,
    }))
}
