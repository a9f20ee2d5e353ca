//! Change notification bus decoupling mutation from re-display.
//!
//! Views subscribe to a per-entity event name and reload when it fires;
//! dialogs publish after a successful save. The bus is an explicit
//! dependency handed to components as an `Arc`, created once at application
//! start and never torn down. Payloads are opaque to the bus.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;

/// Fixed acknowledgement payload published after successful saves.
///
/// Consumers never inspect it; the event name alone carries the meaning.
pub const ACKNOWLEDGEMENT: &str = "OK";

type Handler = Arc<dyn Fn(&Value) + Send + Sync>;

struct Subscriber {
    id: u64,
    handler: Handler,
}

/// Handle returned by [`ChangeNotificationBus::subscribe`].
///
/// Owned exclusively by the component that created it and released through
/// [`ChangeNotificationBus::unsubscribe`] when that component is torn down.
#[derive(Debug)]
pub struct Subscription {
    event: String,
    id: u64,
}

impl Subscription {
    /// Event name this subscription listens to.
    #[must_use]
    pub fn event(&self) -> &str {
        self.event.as_str()
    }
}

/// Named-event publish/subscribe registry.
#[derive(Default)]
pub struct ChangeNotificationBus {
    next_id: AtomicU64,
    registry: Mutex<HashMap<String, Vec<Subscriber>>>,
}

impl ChangeNotificationBus {
    /// Create an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn registry(&self) -> MutexGuard<'_, HashMap<String, Vec<Subscriber>>> {
        // Handlers never run under the lock, so a poisoned registry is
        // still structurally sound.
        self.registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a handler for `event` and return its handle.
    ///
    /// Handlers fire in subscription order, once per publish, for as long
    /// as the subscription stays active.
    pub fn subscribe(
        &self,
        event: impl Into<String>,
        handler: impl Fn(&Value) + Send + Sync + 'static,
    ) -> Subscription {
        let event = event.into();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.registry()
            .entry(event.clone())
            .or_default()
            .push(Subscriber {
                id,
                handler: Arc::new(handler),
            });
        tracing::trace!(event, id, "subscription registered");
        Subscription { event, id }
    }

    /// Release a subscription.
    ///
    /// Idempotent: releasing an already-released handle is a no-op.
    pub fn unsubscribe(&self, subscription: &Subscription) {
        let mut registry = self.registry();
        if let Some(subscribers) = registry.get_mut(&subscription.event) {
            subscribers.retain(|subscriber| subscriber.id != subscription.id);
            if subscribers.is_empty() {
                registry.remove(&subscription.event);
            }
        }
    }

    /// Synchronously notify all current subscribers of `event`.
    ///
    /// Subscribers are invoked in registration order. A subscriber released
    /// during delivery (by itself or by an earlier handler) does not fire
    /// for the publish in progress. Publishing with no subscribers is a
    /// no-op.
    pub fn publish(&self, event: &str, payload: &Value) {
        let snapshot: Vec<(u64, Handler)> = {
            let registry = self.registry();
            registry.get(event).map_or_else(Vec::new, |subscribers| {
                subscribers
                    .iter()
                    .map(|subscriber| (subscriber.id, Arc::clone(&subscriber.handler)))
                    .collect()
            })
        };
        tracing::trace!(event, subscribers = snapshot.len(), "publishing");

        for (id, handler) in snapshot {
            // Re-check liveness so handlers detached mid-delivery stay quiet.
            let still_subscribed = self
                .registry()
                .get(event)
                .is_some_and(|subscribers| subscribers.iter().any(|s| s.id == id));
            if still_subscribed {
                handler(payload);
            }
        }
    }
}
