//! Contact listing: customer profiles and CRM inquiries.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use crate::db::CustomerRepository;
use crate::error::Result;
use crate::models::{Customer, Inquiry};
use crate::state::AppState;

/// Both identity sources, side by side.
#[derive(Debug, Serialize)]
pub struct ContactsResponse {
    pub customers: Vec<Customer>,
    pub inquiries: Vec<Inquiry>,
    pub total_customers: usize,
    pub total_inquiries: usize,
}

/// GET /customers
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<ContactsResponse>> {
    let repo = CustomerRepository::new(state.pool());
    let customers = repo.list_customers().await?;
    let inquiries = repo.list_inquiries().await?;
    Ok(Json(ContactsResponse {
        total_customers: customers.len(),
        total_inquiries: inquiries.len(),
        customers,
        inquiries,
    }))
}
