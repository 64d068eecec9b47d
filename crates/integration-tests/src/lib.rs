//! Integration tests for Packdesk.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and run migrations
//! cargo run -p packdesk-cli -- migrate
//! cargo run -p packdesk-cli -- seed
//!
//! # Start the service
//! cargo run -p packdesk-backoffice
//!
//! # Run integration tests
//! cargo test -p packdesk-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `backoffice_dashboard` - Derivation endpoints (notifications, pins,
//!   work queue, quick access)
//! - `backoffice_workflow` - Status transitions and the bin lifecycle
//! - `backoffice_campaigns` - Roster preview and draft CRUD
//!
//! Tests are `#[ignore]`d by default because they need a running service and
//! database; the base URL is configurable via `BACKOFFICE_BASE_URL`.

/// Base URL for the back-office API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("BACKOFFICE_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}
