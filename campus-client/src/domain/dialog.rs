//! Transient create/edit dialog coordinator.
//!
//! A plain state machine, deliberately free of any UI toolkit: the modal
//! binding becomes an adapter around this type. States move
//! `Closed → Opening → Editing → {Saving → Closed} | {Cancelled → Closed}`.
//! A successful save publishes the entity's change event with the fixed
//! acknowledgement payload; a failed save leaves the dialog open and
//! publishes nothing.

use std::sync::Arc;

use serde_json::json;

use super::entity::Entity;
use super::entity_service::EntityService;
use super::error::{ClientResult, Error};
use super::events::{ACKNOWLEDGEMENT, ChangeNotificationBus};
use super::routing::RouteParams;

/// Observable state of a dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogState {
    /// No interaction in progress.
    Closed,
    /// Resolving the entity to edit.
    Opening,
    /// Draft available for edits.
    Editing,
    /// Save round trip in flight.
    Saving,
}

/// Value a dialog resolves with when it closes.
#[derive(Debug, Clone, PartialEq)]
pub enum Dismissal<T> {
    /// Closed after a successful save; carries the persisted entity.
    Saved(T),
    /// Closed without saving.
    Cancelled,
}

/// Coordinator for one create/edit interaction.
pub struct EntityDialog<T: Entity> {
    service: EntityService<T>,
    bus: Arc<ChangeNotificationBus>,
    state: DialogState,
    draft: Option<T>,
}

impl<T: Entity> EntityDialog<T> {
    /// Build a closed dialog over the given service and bus.
    #[must_use]
    pub fn new(service: EntityService<T>, bus: Arc<ChangeNotificationBus>) -> Self {
        Self {
            service,
            bus,
            state: DialogState::Closed,
            draft: None,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> DialogState {
        self.state
    }

    /// Draft under edit, once the dialog is open.
    #[must_use]
    pub const fn draft(&self) -> Option<&T> {
        self.draft.as_ref()
    }

    /// Mutable access to the draft for user edits.
    pub fn draft_mut(&mut self) -> Option<&mut T> {
        self.draft.as_mut()
    }

    /// Open the dialog from a route-parameter map.
    ///
    /// An `id` parameter selects edit mode and resolves the entity through
    /// the service first; its absence selects create mode with a default
    /// draft. When the fetch fails, the dialog stays `Closed` and the error
    /// propagates to the caller.
    ///
    /// # Errors
    ///
    /// Fails when the dialog is not `Closed`, or when resolving the routed
    /// entity fails (e.g. not found).
    pub async fn open(&mut self, params: &RouteParams) -> ClientResult<()> {
        if self.state != DialogState::Closed {
            return Err(Error::invalid_request("dialog is already open"));
        }

        match params.id() {
            Some(id) => {
                self.state = DialogState::Opening;
                tracing::debug!(collection = T::COLLECTION, id, "opening dialog in edit mode");
                match self.service.find(id).await {
                    Ok(response) => {
                        self.draft = Some(response.body);
                        self.state = DialogState::Editing;
                        Ok(())
                    }
                    Err(error) => {
                        // Failed to open: no dialog is shown.
                        self.state = DialogState::Closed;
                        self.draft = None;
                        Err(error)
                    }
                }
            }
            None => {
                tracing::debug!(collection = T::COLLECTION, "opening dialog in create mode");
                self.draft = Some(T::default());
                self.state = DialogState::Editing;
                Ok(())
            }
        }
    }

    /// Persist the draft, choosing `update` or `create` from its identifier.
    ///
    /// On success the entity's change event is published with the
    /// acknowledgement payload, the dialog closes, and the persisted entity
    /// is the dismissal value. On failure the dialog stays open in
    /// `Editing`, nothing is published, and the error is not retried.
    ///
    /// # Errors
    ///
    /// Fails when a save is already in flight, when the dialog is not open,
    /// or when the service rejects the draft.
    pub async fn save(&mut self) -> ClientResult<Dismissal<T>> {
        if self.state == DialogState::Saving {
            return Err(Error::invalid_request("save already in progress"));
        }
        if self.state != DialogState::Editing {
            return Err(Error::invalid_request("dialog is not open for editing"));
        }
        let Some(draft) = self.draft.clone() else {
            return Err(Error::internal("editing dialog has no draft"));
        };

        self.state = DialogState::Saving;
        let result = if draft.id().is_some() {
            self.service.update(&draft).await
        } else {
            self.service.create(&draft).await
        };

        match result {
            Ok(response) => {
                self.bus.publish(T::CHANGE_EVENT, &json!(ACKNOWLEDGEMENT));
                self.state = DialogState::Closed;
                self.draft = None;
                tracing::debug!(
                    collection = T::COLLECTION,
                    id = response.body.id(),
                    "dialog saved and closed"
                );
                Ok(Dismissal::Saved(response.body))
            }
            Err(error) => {
                self.state = DialogState::Editing;
                Err(error)
            }
        }
    }

    /// Dismiss the dialog without saving. Publishes nothing.
    pub fn cancel(&mut self) -> Dismissal<T> {
        tracing::debug!(collection = T::COLLECTION, "dialog cancelled");
        self.state = DialogState::Closed;
        self.draft = None;
        Dismissal::Cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Building;
    use crate::domain::ports::{MockTransport, Transport, WireRequest, WireResponse};
    use serde_json::{Value, json};
    use std::sync::Mutex;

    fn json_response(status: u16, body: &Value) -> WireResponse {
        WireResponse {
            status,
            headers: Vec::new(),
            body: serde_json::to_vec(body).expect("test body should serialise"),
        }
    }

    fn dialog_over(transport: MockTransport) -> (EntityDialog<Building>, Arc<ChangeNotificationBus>) {
        let bus = Arc::new(ChangeNotificationBus::new());
        let service = EntityService::new(Arc::new(transport) as Arc<dyn Transport>);
        (EntityDialog::new(service, Arc::clone(&bus)), bus)
    }

    fn record_event(bus: &ChangeNotificationBus, event: &str) -> Arc<Mutex<Vec<Value>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        // The views hold their subscriptions; tests just leak this one.
        let _subscription = bus.subscribe(event, move |payload| {
            sink.lock().unwrap().push(payload.clone());
        });
        seen
    }

    #[tokio::test]
    async fn opening_without_id_enters_editing_with_a_default_draft() {
        let (mut dialog, _bus) = dialog_over(MockTransport::new());

        dialog
            .open(&RouteParams::new())
            .await
            .expect("create-mode open should succeed");

        assert_eq!(dialog.state(), DialogState::Editing);
        assert_eq!(dialog.draft(), Some(&Building::default()));
    }

    #[tokio::test]
    async fn opening_with_id_resolves_the_entity_first() {
        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .withf(|request: &WireRequest| request.path == "buildings/123")
            .times(1)
            .return_once(|_| Ok(json_response(200, &json!({ "id": 123, "name": "Hall A" }))));
        let (mut dialog, _bus) = dialog_over(transport);

        dialog
            .open(&RouteParams::new().with("id", "123"))
            .await
            .expect("edit-mode open should succeed");

        assert_eq!(dialog.state(), DialogState::Editing);
        assert_eq!(dialog.draft().and_then(|draft| draft.id), Some(123));
    }

    #[tokio::test]
    async fn failed_fetch_leaves_the_dialog_closed() {
        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .times(1)
            .return_once(|_| Ok(json_response(404, &json!({ "title": "Not Found" }))));
        let (mut dialog, _bus) = dialog_over(transport);

        let error = dialog
            .open(&RouteParams::new().with("id", "123"))
            .await
            .expect_err("open should fail");

        assert_eq!(error.code(), crate::domain::ErrorCode::NotFound);
        assert_eq!(dialog.state(), DialogState::Closed, "no dialog is shown");
        assert!(dialog.draft().is_none(), "no editing state was entered");
    }

    #[tokio::test]
    async fn saving_a_draft_without_id_creates_and_publishes() {
        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .withf(|request: &WireRequest| request.method == crate::domain::ports::Method::Post)
            .times(1)
            .return_once(|_| Ok(json_response(201, &json!({ "id": 123, "name": "Hall A" }))));
        let (mut dialog, bus) = dialog_over(transport);
        let published = record_event(&bus, Building::CHANGE_EVENT);

        dialog.open(&RouteParams::new()).await.expect("open");
        if let Some(draft) = dialog.draft_mut() {
            draft.name = Some("Hall A".to_owned());
        }

        let dismissal = dialog.save().await.expect("save should succeed");
        let Dismissal::Saved(persisted) = dismissal else {
            panic!("expected a saved dismissal");
        };
        assert_eq!(persisted.id, Some(123));
        assert_eq!(dialog.state(), DialogState::Closed);
        assert_eq!(
            *published.lock().unwrap(),
            vec![json!(ACKNOWLEDGEMENT)],
            "one acknowledgement should be broadcast",
        );
    }

    #[tokio::test]
    async fn saving_a_draft_with_id_updates() {
        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .withf(|request: &WireRequest| request.path == "buildings/7")
            .times(1)
            .return_once(|_| Ok(json_response(200, &json!({ "id": 7, "name": "Hall B" }))));
        transport
            .expect_execute()
            .withf(|request: &WireRequest| request.method == crate::domain::ports::Method::Put)
            .times(1)
            .return_once(|_| Ok(json_response(200, &json!({ "id": 7, "name": "Hall B2" }))));
        let (mut dialog, _bus) = dialog_over(transport);

        dialog
            .open(&RouteParams::new().with("id", "7"))
            .await
            .expect("open");
        if let Some(draft) = dialog.draft_mut() {
            draft.name = Some("Hall B2".to_owned());
        }

        let dismissal = dialog.save().await.expect("save should succeed");
        assert!(matches!(dismissal, Dismissal::Saved(ref b) if b.name.as_deref() == Some("Hall B2")));
    }

    #[tokio::test]
    async fn failed_save_keeps_the_dialog_open_and_publishes_nothing() {
        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .times(1)
            .return_once(|_| Ok(json_response(400, &json!({ "title": "validation failed" }))));
        let (mut dialog, bus) = dialog_over(transport);
        let published = record_event(&bus, Building::CHANGE_EVENT);

        dialog.open(&RouteParams::new()).await.expect("open");
        let error = dialog.save().await.expect_err("save should fail");

        assert_eq!(error.code(), crate::domain::ErrorCode::InvalidRequest);
        assert_eq!(
            dialog.state(),
            DialogState::Editing,
            "dialog stays open after a rejected save",
        );
        assert!(dialog.draft().is_some(), "draft survives for another attempt");
        assert!(published.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn cancelling_closes_without_publishing() {
        let (mut dialog, bus) = dialog_over(MockTransport::new());
        let published = record_event(&bus, Building::CHANGE_EVENT);

        dialog.open(&RouteParams::new()).await.expect("open");
        let dismissal = dialog.cancel();

        assert_eq!(dismissal, Dismissal::Cancelled);
        assert_eq!(dialog.state(), DialogState::Closed);
        assert!(published.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_requires_an_open_dialog() {
        let (mut dialog, _bus) = dialog_over(MockTransport::new());
        let error = dialog.save().await.expect_err("closed dialog cannot save");
        assert_eq!(error.code(), crate::domain::ErrorCode::InvalidRequest);
    }
}
