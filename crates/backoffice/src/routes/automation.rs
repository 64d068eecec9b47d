//! Automation status toggle.
//!
//! A deliberately shallow endpoint polled by external schedulers. The POST
//! body must be a JSON boolean in the `enabled` field; anything else is
//! rejected at deserialization with a 4xx.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::db::AutomationRepository;
use crate::error::Result;
use crate::state::AppState;

/// Toggle payload and response.
#[derive(Debug, Serialize, Deserialize)]
pub struct AutomationStatus {
    pub enabled: bool,
}

/// GET /automation
#[instrument(skip(state))]
pub async fn status(State(state): State<AppState>) -> Result<Json<AutomationStatus>> {
    let enabled = AutomationRepository::new(state.pool()).get().await?;
    Ok(Json(AutomationStatus { enabled }))
}

/// POST /automation
#[instrument(skip(state))]
pub async fn set_status(
    State(state): State<AppState>,
    Json(body): Json<AutomationStatus>,
) -> Result<Json<AutomationStatus>> {
    AutomationRepository::new(state.pool())
        .set(body.enabled, chrono::Utc::now())
        .await?;
    Ok(Json(AutomationStatus {
        enabled: body.enabled,
    }))
}
