//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::BackofficeConfig;
use crate::pins::PinStore;
use crate::services::MailerClient;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; provides access to the database pool, the
/// email provider client, and the injected pin store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: BackofficeConfig,
    pool: PgPool,
    mailer: MailerClient,
    pins: Arc<dyn PinStore>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(
        config: BackofficeConfig,
        pool: PgPool,
        mailer: MailerClient,
        pins: Arc<dyn PinStore>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                mailer,
                pins,
            }),
        }
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &BackofficeConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the email provider client.
    #[must_use]
    pub fn mailer(&self) -> &MailerClient {
        &self.inner.mailer
    }

    /// Get a reference to the pin store.
    #[must_use]
    pub fn pins(&self) -> &dyn PinStore {
        self.inner.pins.as_ref()
    }
}
