//! Order route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use packdesk_core::{OrderId, OrderStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::db::OrderRepository;
use crate::error::Result;
use crate::models::Order;
use crate::routes::ConfirmRequest;
use crate::state::AppState;
use crate::workflow::{bin, transitions};

/// Listing with the stat-card numbers the dashboard shows.
#[derive(Debug, Serialize)]
pub struct OrdersResponse {
    pub orders: Vec<Order>,
    pub total: usize,
    pub pending: usize,
    pub delivered: usize,
    pub total_revenue: Decimal,
}

/// GET /orders
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<OrdersResponse>> {
    let orders = OrderRepository::new(state.pool()).list_active().await?;
    let pending = orders
        .iter()
        .filter(|o| o.status == OrderStatus::Pending)
        .count();
    let delivered = orders
        .iter()
        .filter(|o| o.status == OrderStatus::Delivered)
        .count();
    let total_revenue: Decimal = orders.iter().map(|o| o.total_amount).sum();
    Ok(Json(OrdersResponse {
        total: orders.len(),
        pending,
        delivered,
        total_revenue,
        orders,
    }))
}

/// Body for a status write.
#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: OrderStatus,
}

/// POST /orders/{id}/status
#[instrument(skip(state))]
pub async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Json(request): Json<StatusRequest>,
) -> Result<Json<serde_json::Value>> {
    transitions::set_order_status(state.pool(), id, request.status).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

/// Body for adding tracking info.
#[derive(Debug, Deserialize)]
pub struct TrackingRequest {
    pub tracking_number: String,
    #[serde(default)]
    pub carrier: Option<String>,
    #[serde(default)]
    pub tracking_url: Option<String>,
}

/// POST /orders/{id}/tracking
///
/// Adding tracking automatically moves the order to `shipped`.
#[instrument(skip(state, request))]
pub async fn set_tracking(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Json(request): Json<TrackingRequest>,
) -> Result<Json<serde_json::Value>> {
    transitions::set_order_tracking(
        state.pool(),
        id,
        &request.tracking_number,
        request.carrier.as_deref(),
        request.tracking_url.as_deref(),
    )
    .await?;
    Ok(Json(serde_json::json!({ "success": true, "status": OrderStatus::Shipped })))
}

/// POST /orders/{id}/delete
#[instrument(skip(state))]
pub async fn soft_delete(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Json(confirm): Json<ConfirmRequest>,
) -> Result<Json<serde_json::Value>> {
    confirm.require("delete order")?;
    bin::soft_delete(state.pool(), bin::BinKind::Order, id.as_uuid()).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}
