//! Artwork review route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use packdesk_core::{ArtworkId, ArtworkStatus, LinkType, OrderId, QuoteId};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::db::{ArtworkRepository, CodingUpdate, OrderRepository, QuoteRepository};
use crate::error::Result;
use crate::models::ArtworkFile;
use crate::routes::ConfirmRequest;
use crate::state::AppState;
use crate::workflow::{ReviewRequest, bin, transitions};

/// Listing with the stat-card counts the dashboard shows.
#[derive(Debug, Serialize)]
pub struct ArtworksResponse {
    pub artworks: Vec<ArtworkFile>,
    pub total: usize,
    pub pending_review: usize,
    pub approved: usize,
    pub revision_needed: usize,
}

/// GET /artworks
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<ArtworksResponse>> {
    let artworks = ArtworkRepository::new(state.pool()).list_active().await?;
    let count = |status: ArtworkStatus| artworks.iter().filter(|a| a.status == status).count();
    Ok(Json(ArtworksResponse {
        total: artworks.len(),
        pending_review: count(ArtworkStatus::PendingReview),
        approved: count(ArtworkStatus::Approved),
        revision_needed: count(ArtworkStatus::RevisionNeeded),
        artworks,
    }))
}

/// Body for the primary review action.
#[derive(Debug, Deserialize)]
pub struct ReviewBody {
    pub status: ArtworkStatus,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub proof_url: Option<String>,
    #[serde(default)]
    pub customer_code: Option<String>,
    #[serde(default)]
    pub product_code: Option<String>,
}

/// POST /artworks/{id}/review
///
/// Writes the new status (plus feedback/coding) and fires the customer
/// notification without waiting on it.
#[instrument(skip(state, body))]
pub async fn review(
    State(state): State<AppState>,
    Path(id): Path<ArtworkId>,
    Json(body): Json<ReviewBody>,
) -> Result<Json<ArtworkFile>> {
    let artwork = transitions::review_artwork(
        &state,
        id,
        ReviewRequest {
            status: body.status,
            feedback: body.feedback,
            proof_url: body.proof_url,
            customer_code: body.customer_code.map(|c| c.to_uppercase()),
            product_code: body.product_code.map(|c| c.to_uppercase()),
        },
    )
    .await?;
    Ok(Json(artwork))
}

/// Body for the coding/linking save.
#[derive(Debug, Deserialize)]
pub struct CodingBody {
    #[serde(default)]
    pub customer_code: Option<String>,
    #[serde(default)]
    pub product_code: Option<String>,
    #[serde(default)]
    pub proof_url: Option<String>,
    #[serde(default)]
    pub link_type: LinkType,
    #[serde(default)]
    pub linked_order_id: Option<OrderId>,
    #[serde(default)]
    pub linked_quote_id: Option<QuoteId>,
}

/// POST /artworks/{id}/coding
///
/// The link is exclusive; the linked record's reference number is
/// denormalized onto the artwork so the grid can show it without a join.
#[instrument(skip(state, body))]
pub async fn coding(
    State(state): State<AppState>,
    Path(id): Path<ArtworkId>,
    Json(body): Json<CodingBody>,
) -> Result<Json<serde_json::Value>> {
    let pool = state.pool();

    let mut update = CodingUpdate {
        customer_code: body.customer_code.map(|c| c.to_uppercase()),
        product_code: body.product_code.map(|c| c.to_uppercase()),
        proof_url: body.proof_url,
        link_type: body.link_type,
        ..CodingUpdate::default()
    };

    match body.link_type {
        LinkType::Order => {
            if let Some(order_id) = body.linked_order_id {
                update.linked_order_id = Some(order_id);
                update.order_number = OrderRepository::new(pool)
                    .get(order_id)
                    .await?
                    .map(|o| o.order_number);
            }
        }
        LinkType::Quote => {
            if let Some(quote_id) = body.linked_quote_id {
                update.linked_quote_id = Some(quote_id);
                update.quote_number = QuoteRepository::new(pool)
                    .get(quote_id)
                    .await?
                    .map(|q| q.quote_number);
            }
        }
        LinkType::None => {}
    }

    ArtworkRepository::new(pool)
        .update_coding(id, &update, chrono::Utc::now())
        .await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

/// POST /artworks/{id}/delete
#[instrument(skip(state))]
pub async fn soft_delete(
    State(state): State<AppState>,
    Path(id): Path<ArtworkId>,
    Json(confirm): Json<ConfirmRequest>,
) -> Result<Json<serde_json::Value>> {
    confirm.require("delete artwork")?;
    bin::soft_delete(state.pool(), bin::BinKind::Artwork, id.as_uuid()).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}
