//! Newsletter subscriber repository.

use sqlx::PgPool;

use super::RepositoryError;
use crate::models::NewsletterSubscriber;

/// The campaign audience is larger than the dashboard collections, so it gets
/// its own fetch cap.
const AUDIENCE_LIMIT: i64 = 10_000;

/// Repository for the newsletter audience.
pub struct SubscriberRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SubscriberRepository<'a> {
    /// Create a new subscriber repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List subscribers, oldest first (roster dedup keeps the first name
    /// encountered, so iteration order is part of the contract).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<NewsletterSubscriber>, RepositoryError> {
        let rows = sqlx::query_as::<_, NewsletterSubscriber>(
            "SELECT * FROM newsletter_subscribers ORDER BY created_at ASC LIMIT $1",
        )
        .bind(AUDIENCE_LIMIT)
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }
}
