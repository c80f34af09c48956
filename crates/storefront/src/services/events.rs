//! Identity-change notifications.
//!
//! An explicit broadcast channel replaces the ambient "auth state changed"
//! callback registry: interested parties call [`AuthEvents::subscribe`] and
//! drop the receiver to unsubscribe.

use tokio::sync::broadcast;

use tangerine_core::UserId;

/// Channel capacity; invalidation consumers drain quickly, so a small
/// backlog is plenty.
const CHANNEL_CAPACITY: usize = 64;

/// An identity change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    /// A user signed in.
    SignedIn(UserId),
    /// A user signed out.
    SignedOut(UserId),
}

impl AuthEvent {
    /// The user whose identity changed.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        match self {
            Self::SignedIn(id) | Self::SignedOut(id) => *id,
        }
    }
}

/// Broadcast source for identity changes.
#[derive(Debug, Clone)]
pub struct AuthEvents {
    tx: broadcast::Sender<AuthEvent>,
}

impl AuthEvents {
    /// Create a new event source.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Subscribe to identity changes. Dropping the receiver unsubscribes.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.tx.subscribe()
    }

    /// Publish an identity change. Lossy when nobody is subscribed.
    pub fn publish(&self, event: AuthEvent) {
        let _ = self.tx.send(event);
    }
}

impl Default for AuthEvents {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscribers_receive_events() {
        let events = AuthEvents::new();
        let mut rx = events.subscribe();

        events.publish(AuthEvent::SignedIn(UserId::new(1)));
        events.publish(AuthEvent::SignedOut(UserId::new(1)));

        assert_eq!(rx.recv().await, Ok(AuthEvent::SignedIn(UserId::new(1))));
        assert_eq!(rx.recv().await, Ok(AuthEvent::SignedOut(UserId::new(1))));
    }

    #[test]
    fn test_publish_without_subscribers_is_lossy() {
        let events = AuthEvents::new();
        // Must not panic or error out.
        events.publish(AuthEvent::SignedIn(UserId::new(2)));
    }

    #[test]
    fn test_event_user_id() {
        assert_eq!(
            AuthEvent::SignedOut(UserId::new(3)).user_id(),
            UserId::new(3)
        );
    }
}
