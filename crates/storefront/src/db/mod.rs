//! Database operations against the hosted table store.
//!
//! # Tables
//!
//! - `users` / `user_passwords` - Site authentication
//! - `profiles` - Role attribute per user, gates the admin panel
//! - `products` - The catalog
//! - `cart_items` - Server-side cart rows, keyed on (user, product, size, color)
//! - `tower_sessions.session` - Session storage (guest carts live here)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and run via:
//! ```bash
//! cargo run -p tangerine-cli -- migrate
//! ```

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool};
use thiserror::Error;

pub mod cart_items;
pub mod products;
pub mod profiles;
pub mod users;

/// Errors returned by repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The underlying query failed. Usually transient (network, timeout, pool).
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The referenced row does not exist.
    #[error("not found")]
    NotFound,

    /// A uniqueness constraint was violated.
    #[error("conflict: {0}")]
    Conflict(String),

    /// A stored value failed to parse back into its domain type.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

impl RepositoryError {
    /// Whether a retry could plausibly succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Database(_))
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// Every connection gets a server-side statement timeout so a slow query
/// cannot hold a request open indefinitely.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(
    database_url: &secrecy::SecretString,
    statement_timeout: Duration,
) -> Result<PgPool, sqlx::Error> {
    let timeout_ms = statement_timeout.as_millis();
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .after_connect(move |conn, _meta| {
            Box::pin(async move {
                conn.execute(format!("SET statement_timeout = {timeout_ms}").as_str())
                    .await?;
                Ok(())
            })
        })
        .connect(database_url.expose_secret())
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(RepositoryError::Database(sqlx::Error::PoolTimedOut).is_transient());
        assert!(!RepositoryError::NotFound.is_transient());
        assert!(!RepositoryError::Conflict("dup".to_owned()).is_transient());
        assert!(!RepositoryError::DataCorruption("bad".to_owned()).is_transient());
    }
}
