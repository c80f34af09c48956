//! Authorization: session-lifetime capability cache.
//!
//! The role attribute lives on `profiles` and is denormalized per user. It
//! is resolved into a [`Capabilities`] set once and cached for the session
//! lifetime instead of being refetched on every view; identity-change events
//! invalidate the cached entry.

use std::time::Duration;

use moka::future::Cache;
use sqlx::PgPool;
use tokio::sync::broadcast::error::RecvError;

use tangerine_core::{Capabilities, UserId};

use crate::db::RepositoryError;
use crate::db::profiles::ProfileRepository;
use crate::services::events::AuthEvents;

/// Cached capability resolution for users.
#[derive(Clone)]
pub struct CapabilityCache {
    cache: Cache<UserId, Capabilities>,
}

impl CapabilityCache {
    /// Create a cache whose entries live at most `ttl` (the session lifetime).
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: Cache::builder()
                .max_capacity(10_000)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// The capability set for a user, resolving the role on a cache miss.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the role lookup fails.
    pub async fn capabilities_for(
        &self,
        user_id: UserId,
        pool: &PgPool,
    ) -> Result<Capabilities, RepositoryError> {
        if let Some(capabilities) = self.cache.get(&user_id).await {
            return Ok(capabilities);
        }

        let role = ProfileRepository::new(pool).role(user_id).await?;
        let capabilities = Capabilities::for_role(role);
        self.cache.insert(user_id, capabilities).await;

        Ok(capabilities)
    }

    /// Drop the cached entry for a user.
    pub async fn invalidate(&self, user_id: UserId) {
        self.cache.invalidate(&user_id).await;
    }
}

/// Invalidate cached capabilities whenever an identity changes.
///
/// Runs until the event source is dropped; spawn it once at startup.
pub async fn invalidate_on_auth_events(cache: CapabilityCache, events: AuthEvents) {
    let mut rx = events.subscribe();
    // Holding the sender here would keep the channel open forever.
    drop(events);
    loop {
        match rx.recv().await {
            Ok(event) => {
                tracing::debug!(user_id = %event.user_id(), "invalidating cached capabilities");
                cache.invalidate(event.user_id()).await;
            }
            Err(RecvError::Lagged(skipped)) => {
                // Missed events mean stale entries; clear everything.
                tracing::warn!(skipped, "auth event stream lagged, flushing capability cache");
                cache.cache.invalidate_all();
            }
            Err(RecvError::Closed) => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::events::AuthEvent;

    #[tokio::test]
    async fn test_invalidation_task_clears_entries() {
        let cache = CapabilityCache::new(Duration::from_secs(60));
        let user = UserId::new(1);
        cache
            .cache
            .insert(user, Capabilities { manage_products: true })
            .await;

        let events = AuthEvents::new();
        let task = tokio::spawn(invalidate_on_auth_events(cache.clone(), events.clone()));

        events.publish(AuthEvent::SignedOut(user));
        // Give the task a moment to drain the event.
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(cache.cache.get(&user).await, None);

        drop(events);
        let _ = task.await;
    }

    #[tokio::test]
    async fn test_task_exits_when_source_dropped() {
        let cache = CapabilityCache::new(Duration::from_secs(60));
        let events = AuthEvents::new();
        let task = tokio::spawn(invalidate_on_auth_events(cache, events.clone()));

        drop(events);
        assert!(task.await.is_ok());
    }
}
