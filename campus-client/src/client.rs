//! Client configuration and the typed entry point.
//!
//! [`CampusClient`] wires one transport and one change-notification bus
//! behind typed accessors, replacing the per-entity service duplication of
//! the generated application with instantiations of the generic
//! [`EntityService`].

use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::domain::dialog::EntityDialog;
use crate::domain::entity::Entity;
use crate::domain::entity_service::EntityService;
use crate::domain::events::ChangeNotificationBus;
use crate::domain::ports::Transport;
use crate::domain::views::{DetailView, ListView};
use crate::domain::{Building, BuildingDataDefinition, Info, Notification};
use crate::outbound::HttpTransport;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Builder-style configuration for creating a [`CampusClient`].
pub struct ClientConfig {
    api_root: Url,
    timeout: Duration,
    user_agent: Option<String>,
}

impl ClientConfig {
    /// Configuration for the given api root with default timeout and
    /// identity.
    #[must_use]
    pub const fn new(api_root: Url) -> Self {
        Self {
            api_root,
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
        }
    }

    /// Override the per-request timeout enforced by the transport.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the outbound user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Configured api root.
    #[must_use]
    pub const fn api_root(&self) -> &Url {
        &self.api_root
    }
}

/// Typed entry point over one shared transport and notification bus.
///
/// Created once at application start; the bus lives for the process
/// lifetime and is handed to dialogs and views as an explicit dependency.
#[derive(Clone)]
pub struct CampusClient {
    transport: Arc<dyn Transport>,
    bus: Arc<ChangeNotificationBus>,
}

impl CampusClient {
    /// Build a client backed by the reqwest transport adapter.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying HTTP client cannot be
    /// constructed.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let transport = match config.user_agent {
            Some(ref user_agent) => {
                HttpTransport::with_user_agent(config.api_root, config.timeout, user_agent)?
            }
            None => HttpTransport::new(config.api_root, config.timeout)?,
        };
        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// Build a client over an explicit transport (test doubles included).
    #[must_use]
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            bus: Arc::new(ChangeNotificationBus::new()),
        }
    }

    /// Shared change-notification bus.
    #[must_use]
    pub fn bus(&self) -> Arc<ChangeNotificationBus> {
        Arc::clone(&self.bus)
    }

    /// Service for an arbitrary entity type.
    #[must_use]
    pub fn service<T: Entity>(&self) -> EntityService<T> {
        EntityService::new(Arc::clone(&self.transport))
    }

    /// Service for campus buildings.
    #[must_use]
    pub fn buildings(&self) -> EntityService<Building> {
        self.service()
    }

    /// Service for building data definitions.
    #[must_use]
    pub fn building_data_definitions(&self) -> EntityService<BuildingDataDefinition> {
        self.service()
    }

    /// Service for notifications.
    #[must_use]
    pub fn notifications(&self) -> EntityService<Notification> {
        self.service()
    }

    /// Service for informational records.
    #[must_use]
    pub fn infos(&self) -> EntityService<Info> {
        self.service()
    }

    /// Closed dialog coordinator for an entity type.
    #[must_use]
    pub fn dialog<T: Entity>(&self) -> EntityDialog<T> {
        EntityDialog::new(self.service(), self.bus())
    }

    /// Inactive detail view for an entity type.
    #[must_use]
    pub fn detail_view<T: Entity>(&self) -> DetailView<T> {
        DetailView::new(self.service(), self.bus())
    }

    /// Inactive list view for an entity type.
    #[must_use]
    pub fn list_view<T: Entity>(&self) -> ListView<T> {
        ListView::new(self.service(), self.bus())
    }
}
