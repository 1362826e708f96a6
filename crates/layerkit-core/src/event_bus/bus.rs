//! Subscriber bus implementation.
//!
//! Provides the generic `SubscriberBus` used by stores to notify views
//! synchronously after every state transition.

use parking_lot::RwLock;
use std::sync::Arc;
use uuid::Uuid;

/// Subscription handle for unsubscribing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    /// Create a new unique subscription ID
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", &self.0.to_string()[..8])
    }
}

/// Type alias for subscriber callbacks
type Handler<E> = Arc<dyn Fn(&E) + Send + Sync>;

/// Ordered set of synchronous subscribers
///
/// Handlers run on the publishing thread in subscription order. The handler
/// list is copied before dispatch, so a handler may subscribe or unsubscribe
/// while being called; the change applies from the next publish.
pub struct SubscriberBus<E> {
    handlers: RwLock<Vec<(SubscriptionId, Handler<E>)>>,
}

impl<E> SubscriberBus<E> {
    /// Create an empty bus
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(Vec::new()),
        }
    }

    /// Register a handler
    ///
    /// The handler is called on the publishing thread, so it should return
    /// quickly.
    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let id = SubscriptionId::new();
        self.handlers.write().push((id, Arc::new(handler)));
        tracing::debug!("Subscription {} added", id);
        id
    }

    /// Remove a handler
    ///
    /// Returns true if the subscription was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.write();
        let before = handlers.len();
        handlers.retain(|(sub, _)| *sub != id);
        let removed = handlers.len() != before;
        if removed {
            tracing::debug!("Subscription {} removed", id);
        }
        removed
    }

    /// Call every handler with `event`
    ///
    /// Returns the number of handlers invoked.
    pub fn publish(&self, event: &E) -> usize {
        let handlers: Vec<Handler<E>> = self
            .handlers
            .read()
            .iter()
            .map(|(_, h)| Arc::clone(h))
            .collect();

        for handler in &handlers {
            handler(event);
        }
        handlers.len()
    }

    /// Get the number of active subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.handlers.read().len()
    }
}

impl<E> Default for SubscriberBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for SubscriberBus<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriberBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
