//! HTTP route handlers for the back office.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                        - Liveness check
//! GET  /health/ready                  - Readiness check (database ping)
//!
//! # Dashboard derivations (read-only, recomputed per request)
//! GET  /dashboard/notifications       - Attention notifications (max 6)
//! GET  /dashboard/pins?context=...    - Pin-candidate list for a context
//! POST /dashboard/pins/toggle         - Toggle one pinned id
//! GET  /dashboard/work-queue          - Items needing operator attention
//! GET  /dashboard/quick-access        - Simplified three-kind shortcut lists
//! POST /dashboard/quick-access/status - Apply a quick status (lossy-mapped)
//!
//! # Quotes & RFQs (merged)
//! GET  /quotes                        - Active quotes + RFQs with stats
//! GET  /quotes/{id}                   - Quote detail
//! POST /quotes/{id}/status            - Ground-truth status write
//! POST /quotes/{id}/reply             - Admin reply (+ optional quoted amount)
//! POST /quotes/{id}/delete            - Soft delete (requires confirm)
//!
//! # Artwork review
//! GET  /artworks                      - Active artwork files with stats
//! POST /artworks/{id}/review          - Review action (status + feedback + codes)
//! POST /artworks/{id}/coding          - Save coding / linking / proof URL
//! POST /artworks/{id}/delete          - Soft delete (requires confirm)
//!
//! # Orders
//! GET  /orders                        - Active orders with stats
//! POST /orders/{id}/status            - Status write (deleted not selectable)
//! POST /orders/{id}/tracking          - Add tracking (auto-ships the order)
//! POST /orders/{id}/delete            - Soft delete (requires confirm)
//!
//! # Contacts
//! GET  /customers                     - Profiles and CRM inquiries
//!
//! # Campaigns
//! POST /campaigns/preview             - Roster counts before dispatch
//! POST /campaigns/send                - Bulk send (or test_email mode)
//! GET  /drafts                        - Saved drafts
//! POST /drafts                        - Create draft
//! PUT  /drafts/{id}                   - Update draft
//! DELETE /drafts/{id}                 - Delete draft
//!
//! # Bin
//! GET  /bin                           - Everything soft-deleted
//! POST /bin/{kind}/{id}/restore       - Restore to active
//! POST /bin/{kind}/{id}/purge         - Permanent delete (requires confirm)
//!
//! # Automation (CORS-open, used by external schedulers)
//! GET  /automation                    - Read the toggle
//! POST /automation                    - Write the toggle (boolean only)
//! ```

pub mod artworks;
pub mod automation;
pub mod bin;
pub mod campaigns;
pub mod customers;
pub mod dashboard;
pub mod orders;
pub mod quotes;

use axum::{
    Router,
    routing::{get, post, put},
};
use serde::Deserialize;
use tower_http::cors::CorsLayer;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Body for destructive actions; the flag must be explicit.
#[derive(Debug, Deserialize)]
pub struct ConfirmRequest {
    #[serde(default)]
    pub confirm: bool,
}

impl ConfirmRequest {
    /// Reject the request unless the operator confirmed.
    ///
    /// # Errors
    ///
    /// Returns `AppError::ConfirmationRequired` when the flag is absent.
    pub fn require(&self, action: &str) -> Result<()> {
        if self.confirm {
            Ok(())
        } else {
            Err(AppError::ConfirmationRequired(action.to_string()))
        }
    }
}

/// Assemble the full application router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/dashboard", dashboard_routes())
        .merge(quote_routes())
        .merge(artwork_routes())
        .merge(order_routes())
        .route("/customers", get(customers::list))
        .merge(campaign_routes())
        .merge(bin_routes())
        .merge(automation_routes())
}

fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(dashboard::notifications))
        .route("/pins", get(dashboard::pins))
        .route("/pins/toggle", post(dashboard::toggle_pin))
        .route("/work-queue", get(dashboard::work_queue))
        .route("/quick-access", get(dashboard::quick_access))
        .route("/quick-access/status", post(dashboard::quick_status))
}

fn quote_routes() -> Router<AppState> {
    Router::new()
        .route("/quotes", get(quotes::list))
        .route("/quotes/{id}", get(quotes::detail))
        .route("/quotes/{id}/status", post(quotes::set_status))
        .route("/quotes/{id}/reply", post(quotes::reply))
        .route("/quotes/{id}/delete", post(quotes::soft_delete))
}

fn artwork_routes() -> Router<AppState> {
    Router::new()
        .route("/artworks", get(artworks::list))
        .route("/artworks/{id}/review", post(artworks::review))
        .route("/artworks/{id}/coding", post(artworks::coding))
        .route("/artworks/{id}/delete", post(artworks::soft_delete))
}

fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(orders::list))
        .route("/orders/{id}/status", post(orders::set_status))
        .route("/orders/{id}/tracking", post(orders::set_tracking))
        .route("/orders/{id}/delete", post(orders::soft_delete))
}

fn campaign_routes() -> Router<AppState> {
    Router::new()
        .route("/campaigns/preview", post(campaigns::preview))
        .route("/campaigns/send", post(campaigns::send))
        .route("/drafts", get(campaigns::list_drafts).post(campaigns::create_draft))
        .route(
            "/drafts/{id}",
            put(campaigns::update_draft).delete(campaigns::delete_draft),
        )
}

fn bin_routes() -> Router<AppState> {
    Router::new()
        .route("/bin", get(bin::snapshot))
        .route("/bin/{kind}/{id}/restore", post(bin::restore))
        .route("/bin/{kind}/{id}/purge", post(bin::purge))
}

/// The automation toggle is polled by external schedulers from other
/// origins, so it alone gets permissive CORS.
fn automation_routes() -> Router<AppState> {
    Router::new()
        .route("/automation", get(automation::status).post(automation::set_status))
        .layer(CorsLayer::permissive())
}
