//! CLI command implementations.

pub mod migrate;
pub mod seed;

use secrecy::SecretString;

/// Resolve the database URL the same way the service does.
pub fn database_url() -> Result<SecretString, String> {
    std::env::var("BACKOFFICE_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| "BACKOFFICE_DATABASE_URL (or DATABASE_URL) must be set".to_string())
}
