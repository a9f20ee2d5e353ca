//! Read-only detail and list views with reload-on-notification semantics.
//!
//! A view fetches its state through the entity service on activation,
//! subscribes to the entity's change event, and re-issues the same fetch
//! when notified — a full reload, not an incremental patch. Deactivation
//! must release the bus subscription (the routing adapter that feeds
//! `activate` owns the route subscription). A response that lands after
//! teardown is discarded via a liveness flag rather than applied to dead
//! state; in-flight fetches are never cancelled.
//!
//! Bus handlers run synchronously inside `publish`, so they only queue a
//! reload signal; the owning task applies pending reloads through
//! `process_notifications`.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use request_options::RequestOptions;
use tokio::sync::mpsc;

use super::entity::{Entity, EntityId};
use super::entity_service::EntityService;
use super::error::{ClientResult, Error};
use super::events::{ChangeNotificationBus, Subscription};
use super::routing::RouteParams;

struct ReloadSignal {
    live: Arc<AtomicBool>,
    pending: mpsc::UnboundedReceiver<()>,
    sender: mpsc::UnboundedSender<()>,
}

impl ReloadSignal {
    fn new() -> Self {
        let (sender, pending) = mpsc::unbounded_channel();
        Self {
            live: Arc::new(AtomicBool::new(true)),
            pending,
            sender,
        }
    }

    /// Subscribe to `event`, queueing one signal per notification while the
    /// owning view is live.
    fn subscribe(&self, bus: &ChangeNotificationBus, event: &str) -> Subscription {
        let live = Arc::clone(&self.live);
        let sender = self.sender.clone();
        bus.subscribe(event, move |_| {
            if live.load(Ordering::SeqCst) {
                // Receiver dropped means the view is gone; nothing to do.
                let _ = sender.send(());
            }
        })
    }

    /// Drain all queued signals, reporting whether any arrived.
    fn drain(&mut self) -> bool {
        let mut any = false;
        while self.pending.try_recv().is_ok() {
            any = true;
        }
        any
    }

    fn is_live(&self) -> bool {
        self.live.load(Ordering::SeqCst)
    }

    fn retire(&self) {
        self.live.store(false, Ordering::SeqCst);
    }

    fn revive(&self) {
        self.live.store(true, Ordering::SeqCst);
    }
}

/// Read-only view over a single entity resolved from the route.
pub struct DetailView<T: Entity> {
    service: EntityService<T>,
    bus: Arc<ChangeNotificationBus>,
    entity: Option<T>,
    entity_id: Option<EntityId>,
    subscription: Option<Subscription>,
    signal: ReloadSignal,
}

impl<T: Entity> DetailView<T> {
    /// Build an inactive view over the given service and bus.
    #[must_use]
    pub fn new(service: EntityService<T>, bus: Arc<ChangeNotificationBus>) -> Self {
        Self {
            service,
            bus,
            entity: None,
            entity_id: None,
            subscription: None,
            signal: ReloadSignal::new(),
        }
    }

    /// Entity currently displayed.
    #[must_use]
    pub const fn entity(&self) -> Option<&T> {
        self.entity.as_ref()
    }

    /// Activate the view: resolve the routed identifier, load the entity,
    /// and subscribe to the entity's change event.
    ///
    /// # Errors
    ///
    /// Fails when the view is already active, when the route carries no
    /// usable `id`, or when the initial fetch fails.
    pub async fn activate(&mut self, params: &RouteParams) -> ClientResult<()> {
        if self.subscription.is_some() {
            return Err(Error::invalid_request("view is already active"));
        }
        let id = params
            .id()
            .ok_or_else(|| Error::invalid_request("detail route carries no identifier"))?;

        self.signal.revive();
        self.entity_id = Some(id);
        self.load(id).await?;
        self.subscription = Some(self.signal.subscribe(&self.bus, T::CHANGE_EVENT));
        Ok(())
    }

    /// Apply queued change notifications by re-issuing the fetch once.
    ///
    /// Returns whether a reload happened.
    ///
    /// # Errors
    ///
    /// Surfaces fetch failures from the reload.
    pub async fn process_notifications(&mut self) -> ClientResult<bool> {
        if !self.signal.drain() {
            return Ok(false);
        }
        if let Some(id) = self.entity_id {
            self.load(id).await?;
        }
        Ok(true)
    }

    /// Deactivate the view, releasing its bus subscription.
    ///
    /// Signals queued before teardown are discarded; they must not carry
    /// over into a later activation.
    pub fn deactivate(&mut self) {
        self.signal.retire();
        if let Some(subscription) = self.subscription.take() {
            self.bus.unsubscribe(&subscription);
        }
        self.signal.drain();
        self.entity = None;
        self.entity_id = None;
    }

    async fn load(&mut self, id: EntityId) -> ClientResult<()> {
        let response = self.service.find(id).await?;
        // The response may outlive the view; never apply it to a torn-down one.
        if self.signal.is_live() {
            self.entity = Some(response.body);
        }
        Ok(())
    }
}

/// Read-only view over an entity listing.
pub struct ListView<T: Entity> {
    service: EntityService<T>,
    bus: Arc<ChangeNotificationBus>,
    entities: Vec<T>,
    total: Option<u64>,
    options: Option<RequestOptions>,
    subscription: Option<Subscription>,
    signal: ReloadSignal,
}

impl<T: Entity> ListView<T> {
    /// Build an inactive view over the given service and bus.
    #[must_use]
    pub fn new(service: EntityService<T>, bus: Arc<ChangeNotificationBus>) -> Self {
        Self {
            service,
            bus,
            entities: Vec::new(),
            total: None,
            options: None,
            subscription: None,
            signal: ReloadSignal::new(),
        }
    }

    /// Entities currently displayed, in server order.
    #[must_use]
    pub fn entities(&self) -> &[T] {
        self.entities.as_slice()
    }

    /// Collection size reported by the server's `X-Total-Count` header,
    /// when the listing was paged.
    #[must_use]
    pub const fn total_count(&self) -> Option<u64> {
        self.total
    }

    /// Activate the view: load the listing with the given options and
    /// subscribe to the entity's change event. Reloads reuse the same
    /// options.
    ///
    /// # Errors
    ///
    /// Fails when the view is already active or when the initial fetch
    /// fails.
    pub async fn activate(&mut self, options: Option<RequestOptions>) -> ClientResult<()> {
        if self.subscription.is_some() {
            return Err(Error::invalid_request("view is already active"));
        }

        self.signal.revive();
        self.options = options;
        self.load().await?;
        self.subscription = Some(self.signal.subscribe(&self.bus, T::CHANGE_EVENT));
        Ok(())
    }

    /// Apply queued change notifications by re-issuing the fetch once.
    ///
    /// Multiple queued notifications coalesce into a single reload.
    ///
    /// # Errors
    ///
    /// Surfaces fetch failures from the reload.
    pub async fn process_notifications(&mut self) -> ClientResult<bool> {
        if !self.signal.drain() {
            return Ok(false);
        }
        self.load().await?;
        Ok(true)
    }

    /// Deactivate the view, releasing its bus subscription.
    ///
    /// Signals queued before teardown are discarded; they must not carry
    /// over into a later activation.
    pub fn deactivate(&mut self) {
        self.signal.retire();
        if let Some(subscription) = self.subscription.take() {
            self.bus.unsubscribe(&subscription);
        }
        self.signal.drain();
        self.entities.clear();
        self.total = None;
    }

    async fn load(&mut self) -> ClientResult<()> {
        let response = self.service.query(self.options.as_ref()).await?;
        if self.signal.is_live() {
            self.total = response
                .context
                .header("X-Total-Count")
                .and_then(|value| value.parse().ok());
            self.entities = response.body;
        }
        Ok(())
    }
}
