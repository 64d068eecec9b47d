//! Status transition controller.
//!
//! Translates UI-level status actions into the correct backing writes and
//! side effects. Writes are direct (no optimistic merge, no automatic retry);
//! the caller refetches the full collection afterwards. The one side effect,
//! the customer notification on an artwork review, is fire-and-forget: it
//! never blocks or rolls back the transition.

use chrono::Utc;
use packdesk_core::{
    ArtworkId, ArtworkStatus, OrderId, OrderStatus, QuickArtworkStatus, QuickInvoiceStatus,
    QuickQuoteStatus, QuoteId, QuoteStatus,
};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::db::{
    ActivityRepository, ArtworkRepository, CustomerRepository, OrderRepository, QuoteRepository,
    ReviewUpdate,
};
use crate::error::{AppError, Result};
use crate::models::ArtworkFile;
use crate::services::templates::{ArtworkStatusEmail, humanize_status};
use crate::services::{OutboundEmail, Party};
use crate::state::AppState;
use askama::Template;

/// The primary artwork review action.
#[derive(Debug, Clone)]
pub struct ReviewRequest {
    pub status: ArtworkStatus,
    pub feedback: Option<String>,
    pub proof_url: Option<String>,
    pub customer_code: Option<String>,
    pub product_code: Option<String>,
}

/// Write a ground-truth quote status, routing on the owning table.
///
/// # Errors
///
/// Returns `AppError::NotFound` if the quote does not exist.
pub async fn set_quote_status(pool: &PgPool, id: QuoteId, status: QuoteStatus) -> Result<()> {
    let repo = QuoteRepository::new(pool);
    let Some(view) = repo.get(id).await? else {
        return Err(AppError::NotFound(format!("quote {id}")));
    };
    repo.update_status(id, view.is_rfq, status, Utc::now()).await?;
    Ok(())
}

/// Apply a quick-access quote status: lossy-mapped down to the ground truth
/// before the write. Returns the stored status.
///
/// # Errors
///
/// Returns `AppError::NotFound` if the quote does not exist.
pub async fn apply_quick_quote_status(
    pool: &PgPool,
    id: QuoteId,
    quick: QuickQuoteStatus,
) -> Result<QuoteStatus> {
    let status = quick.ground_truth();
    set_quote_status(pool, id, status).await?;
    Ok(status)
}

/// Record an admin reply to a quote, optionally carrying a quoted amount.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for an empty reply and `AppError::NotFound`
/// if the quote does not exist.
pub async fn reply_to_quote(
    pool: &PgPool,
    id: QuoteId,
    reply: &str,
    quoted_amount: Option<Decimal>,
) -> Result<()> {
    if reply.trim().is_empty() {
        return Err(AppError::BadRequest("reply message is required".to_string()));
    }
    let repo = QuoteRepository::new(pool);
    let Some(view) = repo.get(id).await? else {
        return Err(AppError::NotFound(format!("quote {id}")));
    };
    repo.reply(id, view.is_rfq, reply, quoted_amount, Utc::now())
        .await?;
    Ok(())
}

/// Apply the primary artwork review action and kick off the customer
/// notification.
///
/// The write is unguarded (any state may follow any other). The notification
/// and CRM activity log run on a detached task; their failures are logged and
/// never surfaced.
///
/// # Errors
///
/// Returns `AppError::NotFound` if the artwork does not exist.
pub async fn review_artwork(
    state: &AppState,
    id: ArtworkId,
    request: ReviewRequest,
) -> Result<ArtworkFile> {
    let repo = ArtworkRepository::new(state.pool());
    let update = ReviewUpdate {
        status: request.status,
        admin_feedback: request.feedback,
        proof_url: request.proof_url,
        customer_code: request.customer_code,
        product_code: request.product_code,
    };
    repo.update_review(id, &update, Utc::now()).await?;

    let Some(artwork) = repo.get(id).await? else {
        return Err(AppError::NotFound(format!("artwork {id}")));
    };

    spawn_status_notification(state.clone(), artwork.clone());
    Ok(artwork)
}

/// Apply a quick-access artwork status (no feedback overwrite, no
/// notification).
///
/// # Errors
///
/// Returns `AppError::NotFound` if the artwork does not exist.
pub async fn apply_quick_artwork_status(
    pool: &PgPool,
    id: ArtworkId,
    quick: QuickArtworkStatus,
) -> Result<ArtworkStatus> {
    let status = quick.ground_truth();
    ArtworkRepository::new(pool)
        .set_status(id, status, Utc::now())
        .await?;
    Ok(status)
}

/// Write an order status directly. `deleted` is not a selectable transition;
/// it is reached only through the bin lifecycle.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for `deleted`, `AppError::NotFound` if the
/// order does not exist.
pub async fn set_order_status(pool: &PgPool, id: OrderId, status: OrderStatus) -> Result<()> {
    if status == OrderStatus::Deleted {
        return Err(AppError::BadRequest(
            "deleted is not a selectable status".to_string(),
        ));
    }
    OrderRepository::new(pool)
        .update_status(id, status, Utc::now())
        .await?;
    Ok(())
}

/// Apply a quick-access invoice status, lossy-mapped onto the order machine.
///
/// # Errors
///
/// Returns `AppError::NotFound` if the order does not exist.
pub async fn apply_quick_invoice_status(
    pool: &PgPool,
    id: OrderId,
    quick: QuickInvoiceStatus,
) -> Result<OrderStatus> {
    let status = quick.ground_truth();
    OrderRepository::new(pool)
        .update_status(id, status, Utc::now())
        .await?;
    Ok(status)
}

/// Record tracking info; the repository moves the order to `shipped`.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for an empty tracking number,
/// `AppError::NotFound` if the order does not exist.
pub async fn set_order_tracking(
    pool: &PgPool,
    id: OrderId,
    tracking_number: &str,
    carrier: Option<&str>,
    tracking_url: Option<&str>,
) -> Result<()> {
    if tracking_number.trim().is_empty() {
        return Err(AppError::BadRequest("tracking number is required".to_string()));
    }
    OrderRepository::new(pool)
        .set_tracking(id, tracking_number, carrier, tracking_url, Utc::now())
        .await?;
    Ok(())
}

/// Detach the notification side effect from the review transition.
fn spawn_status_notification(state: AppState, artwork: ArtworkFile) {
    tokio::spawn(async move {
        if let Err(e) = send_status_notification(&state, &artwork).await {
            tracing::warn!(
                artwork_id = %artwork.id,
                error = %e,
                "artwork status notification failed"
            );
        }
    });
}

/// Resolve the customer's email and send the status-change notification,
/// logging a CRM activity along the way. Best-effort throughout.
async fn send_status_notification(state: &AppState, artwork: &ArtworkFile) -> Result<()> {
    let customers = CustomerRepository::new(state.pool());

    // Activity log first; an email failure should not lose the trail
    let description = format!(
        "Artwork \"{}\" status changed to {}",
        artwork.name,
        artwork.status.as_str()
    );
    if let Err(e) = ActivityRepository::new(state.pool())
        .record("artwork_notification", &description, None, Utc::now())
        .await
    {
        tracing::warn!(error = %e, "crm activity log failed");
    }

    // Customer-by-id first, inquiry fallback
    let recipient = match customers.get_customer(artwork.user_id).await? {
        Some(c) => Some(Party {
            email: c.email.as_str().to_string(),
            name: c.full_name,
        }),
        None => customers
            .get_inquiry_by_owner(artwork.user_id.as_uuid())
            .await?
            .map(|i| Party {
                email: i.email.as_str().to_string(),
                name: i.name,
            }),
    };

    let Some(recipient) = recipient else {
        tracing::info!(
            artwork_id = %artwork.id,
            "no resolvable customer email, skipping notification"
        );
        return Ok(());
    };

    let customer_name = recipient.name.clone().unwrap_or_else(|| "there".to_string());
    let display_code = artwork.display_code();
    let body = ArtworkStatusEmail {
        customer_name: &customer_name,
        artwork_name: &artwork.name,
        artwork_code: display_code.as_deref(),
        status_label: humanize_status(artwork.status.as_str()),
        feedback: artwork.admin_feedback.as_deref(),
        review_url: format!("{}/artwork/{}", state.config().base_url, artwork.id),
    }
    .render()?;

    let subject = format!(
        "Artwork Update: {} - {}",
        artwork
            .display_code()
            .unwrap_or_else(|| artwork.name.clone()),
        humanize_status(artwork.status.as_str())
    );

    state
        .mailer()
        .send(&OutboundEmail {
            to: vec![recipient],
            cc: Vec::new(),
            subject,
            html_content: body,
            tags: vec!["artwork-status".to_string()],
        })
        .await?;

    Ok(())
}
