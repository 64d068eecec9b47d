//! Database migration command.

use packdesk_backoffice::db;

/// Run all pending back-office migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let url = super::database_url()?;
    let pool = db::create_pool(&url).await?;

    tracing::info!("running back-office migrations");
    sqlx::migrate!("../backoffice/migrations").run(&pool).await?;
    tracing::info!("migrations complete");

    Ok(())
}
