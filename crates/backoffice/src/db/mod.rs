//! Database operations for the back-office `PostgreSQL` instance.
//!
//! # Tables
//!
//! - `quotes` / `rfq_submissions` - the two quote sources, merged at read time
//! - `artwork_files` - customer artwork with review state and coding
//! - `orders` - store orders with tracking
//! - `profiles` / `crm_inquiries` - the two identity sources
//! - `newsletter_subscribers` - campaign audience
//! - `email_drafts` - saved campaign drafts
//! - `crm_activities` - append-only side-effect log
//! - `automation_status` - single-row boolean toggle
//!
//! Soft deletion is partitioned at the query boundary: active queries filter
//! `deleted_at IS NULL`, bin queries filter `IS NOT NULL`. An item can never
//! appear in both.
//!
//! # Migrations
//!
//! Migrations live in `crates/backoffice/migrations/` and run via:
//! ```bash
//! cargo run -p packdesk-cli -- migrate
//! ```

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub mod activities;
pub mod artworks;
pub mod automation;
pub mod customers;
pub mod drafts;
pub mod orders;
pub mod quotes;
pub mod subscribers;

pub use activities::ActivityRepository;
pub use artworks::{ArtworkRepository, CodingUpdate, ReviewUpdate};
pub use automation::AutomationRepository;
pub use customers::CustomerRepository;
pub use drafts::{DraftRepository, DraftFields};
pub use orders::OrderRepository;
pub use quotes::QuoteRepository;
pub use subscribers::SubscriberRepository;

/// Upper bound on rows fetched per collection query. Derivations slice to
/// small display counts, so the cap only bounds memory, not correctness.
pub(crate) const FETCH_LIMIT: i64 = 1000;

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Underlying database failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored value failed domain validation on read.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// A uniqueness or state conflict.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The referenced row does not exist.
    #[error("not found: {0}")]
    NotFound(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
