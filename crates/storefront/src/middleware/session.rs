//! Session middleware configuration.
//!
//! Sets up `PostgreSQL`-backed sessions using tower-sessions, with the
//! session cookie signed by the configured secret. Guest carts live in the
//! session, so the store has to survive restarts.

use secrecy::ExposeSecret;
use sqlx::PgPool;
use tower_sessions::cookie::Key;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "tm_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Derive the cookie signing key from the configured session secret.
///
/// # Panics
///
/// Panics if the secret is shorter than 32 bytes; config loading rejects
/// such secrets before this is reached.
#[must_use]
pub fn signing_key(config: &StorefrontConfig) -> Key {
    Key::derive_from(config.session_secret.expose_secret().as_bytes())
}

/// Create the session layer with `PostgreSQL` store and signed cookies.
///
/// The sessions table must already exist; the migrations create it.
#[must_use]
pub fn create_session_layer(
    pool: &PgPool,
    config: &StorefrontConfig,
) -> SessionManagerLayer<PostgresStore, tower_sessions::service::SignedCookie> {
    let store = PostgresStore::new(pool.clone());

    let is_secure = config.base_url.starts_with("https://");

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(is_secure)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
        .with_signed(signing_key(config))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use secrecy::SecretString;

    use super::*;
    use crate::config::SentryConfig;

    fn config_with_secret(secret: String) -> StorefrontConfig {
        StorefrontConfig {
            database_url: SecretString::from("postgres://localhost/test"),
            host: "127.0.0.1".parse().expect("addr"),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            session_secret: SecretString::from(secret),
            statement_timeout: Duration::from_millis(5000),
            sentry: SentryConfig::default(),
        }
    }

    #[test]
    fn test_signing_key_derived_from_secret() {
        let first = signing_key(&config_with_secret("k".repeat(32)));
        let again = signing_key(&config_with_secret("k".repeat(32)));
        let other = signing_key(&config_with_secret("x".repeat(32)));

        // Same secret signs consistently across restarts; a different
        // secret must not validate old cookies.
        assert_eq!(first.master(), again.master());
        assert_ne!(first.master(), other.master());
    }
}
