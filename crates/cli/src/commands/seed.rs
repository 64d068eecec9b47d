//! Development seed data.
//!
//! Inserts a small, self-consistent data set: two customers, one inquiry,
//! quotes in both tables, artwork in several review states, orders across
//! the lifecycle, and a handful of newsletter subscribers.

use chrono::{Duration, Utc};
use packdesk_backoffice::db;
use rust_decimal::Decimal;
use uuid::Uuid;

/// Seed the database with sample back-office data.
///
/// # Errors
///
/// Returns an error if the database is unreachable or an insert fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let url = super::database_url()?;
    let pool = db::create_pool(&url).await?;
    let now = Utc::now();

    let amy = Uuid::new_v4();
    let bo = Uuid::new_v4();
    let inquiry = Uuid::new_v4();

    sqlx::query(
        "INSERT INTO profiles (id, email, full_name, company, phone, created_at)
         VALUES ($1, 'amy@acmefoods.example', 'Amy Chen', 'Acme Foods', '+1-555-0101', $3),
                ($2, 'bo@peakcoffee.example', 'Bo Lindgren', 'Peak Coffee', NULL, $3)
         ON CONFLICT (email) DO NOTHING",
    )
    .bind(amy)
    .bind(bo)
    .bind(now - Duration::days(40))
    .execute(&pool)
    .await?;

    sqlx::query(
        "INSERT INTO crm_inquiries (id, email, name, company, unsubscribed, created_at)
         VALUES ($1, 'procurement@freshsnacks.example', 'Dana Wolfe', 'Fresh Snacks', false, $2)",
    )
    .bind(inquiry)
    .bind(now - Duration::days(12))
    .execute(&pool)
    .await?;

    sqlx::query(
        "INSERT INTO quotes (quote_number, user_id, status, total_amount, created_at)
         VALUES ('Q-2025-0001', $1, 'pending', $3, $4),
                ('Q-2025-0002', $2, 'accepted', $5, $6)
         ON CONFLICT (quote_number) DO NOTHING",
    )
    .bind(amy)
    .bind(bo)
    .bind(Decimal::new(482_500, 2))
    .bind(now - Duration::hours(6))
    .bind(Decimal::new(1_260_000, 2))
    .bind(now - Duration::days(9))
    .execute(&pool)
    .await?;

    sqlx::query(
        "INSERT INTO rfq_submissions (user_id, status, message, created_at)
         VALUES ($1, 'pending', 'Looking for 25k recyclable stand-up pouches with matte finish.', $2)",
    )
    .bind(inquiry)
    .bind(now - Duration::hours(2))
    .execute(&pool)
    .await?;

    sqlx::query(
        "INSERT INTO artwork_files
             (user_id, name, file_url, file_size, status, version_number, created_at)
         VALUES ($1, 'acme-granola-front.pdf', 'https://files.example/acme-granola-front.pdf', 1843200, 'pending_review', 1, $3),
                ($1, 'acme-granola-back.pdf', 'https://files.example/acme-granola-back.pdf', 1761280, 'in_review', 2, $4),
                ($2, 'peak-espresso-wrap.ai', 'https://files.example/peak-espresso-wrap.ai', 9234432, 'approved', 3, $5)",
    )
    .bind(amy)
    .bind(bo)
    .bind(now - Duration::minutes(30))
    .bind(now - Duration::days(2))
    .bind(now - Duration::days(5))
    .execute(&pool)
    .await?;

    sqlx::query(
        "UPDATE artwork_files SET updated_at = $1 WHERE status = 'approved'",
    )
    .bind(now - Duration::hours(4))
    .execute(&pool)
    .await?;

    sqlx::query(
        "INSERT INTO orders (order_number, user_id, customer_name, customer_email, status, total_amount, created_at)
         VALUES ('PO-10241', $1, 'Acme Foods', 'amy@acmefoods.example', 'production', $3, $4),
                ('PO-10242', $2, 'Peak Coffee', 'bo@peakcoffee.example', 'pending', $5, $6)
         ON CONFLICT (order_number) DO NOTHING",
    )
    .bind(amy)
    .bind(bo)
    .bind(Decimal::new(1_260_000, 2))
    .bind(now - Duration::days(7))
    .bind(Decimal::new(310_000, 2))
    .bind(now - Duration::hours(20))
    .execute(&pool)
    .await?;

    sqlx::query(
        "INSERT INTO newsletter_subscribers (email, name, created_at)
         VALUES ('news@acmefoods.example', 'Acme Newsroom', $1),
                ('hello@peakcoffee.example', NULL, $1),
                ('amy@acmefoods.example', 'Amy Chen', $1)
         ON CONFLICT (email) DO NOTHING",
    )
    .bind(now - Duration::days(30))
    .execute(&pool)
    .await?;

    tracing::info!("seed data inserted");
    Ok(())
}
