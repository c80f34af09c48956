//! Shared application state.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::StorefrontConfig;
use crate::services::authz::CapabilityCache;
use crate::services::events::AuthEvents;

/// Shared application state, cheap to clone.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pool: PgPool,
    auth_events: AuthEvents,
    capabilities: CapabilityCache,
}

impl AppState {
    #[must_use]
    pub fn new(
        config: StorefrontConfig,
        pool: PgPool,
        auth_events: AuthEvents,
        capabilities: CapabilityCache,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                auth_events,
                capabilities,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    #[must_use]
    pub fn auth_events(&self) -> &AuthEvents {
        &self.inner.auth_events
    }

    #[must_use]
    pub fn capabilities(&self) -> &CapabilityCache {
        &self.inner.capabilities
    }
}
