//! Bin (soft-delete) route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::Result;
use crate::routes::ConfirmRequest;
use crate::state::AppState;
use crate::workflow::bin::{self, BinKind, BinSnapshot};

/// GET /bin
#[instrument(skip(state))]
pub async fn snapshot(State(state): State<AppState>) -> Result<Json<BinSnapshot>> {
    Ok(Json(bin::snapshot(state.pool()).await?))
}

/// POST /bin/{kind}/{id}/restore
///
/// Restoring is non-destructive; no confirmation needed.
#[instrument(skip(state))]
pub async fn restore(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, Uuid)>,
) -> Result<Json<serde_json::Value>> {
    let kind = BinKind::from_path(&kind)?;
    bin::restore(state.pool(), kind, id).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

/// POST /bin/{kind}/{id}/purge
///
/// Irreversible; requires the explicit confirmation flag.
#[instrument(skip(state))]
pub async fn purge(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, Uuid)>,
    Json(confirm): Json<ConfirmRequest>,
) -> Result<Json<serde_json::Value>> {
    confirm.require("permanently delete")?;
    let kind = BinKind::from_path(&kind)?;
    bin::purge(state.pool(), kind, id).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}
