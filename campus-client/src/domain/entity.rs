//! Entity contract shared by every administrative record.
//!
//! An entity with a defined identifier exists server-side; one without does
//! not. The `from_server`/`to_server` pair is the single normalisation seam
//! per entity type: every inbound body and outbound payload passes through
//! it exactly once, so adapting a divergent wire shape (date encodings,
//! nested reference shapes) never touches more than one place.

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Server-assigned numeric identifier.
pub type EntityId = i64;

/// Contract implemented by every administrative entity model.
pub trait Entity: Clone + Default + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// REST collection segment under the api root, e.g. `buildings`.
    const COLLECTION: &'static str;

    /// Change-notification event name scoped to this entity type.
    const CHANGE_EVENT: &'static str;

    /// Identifier of the persisted record; `None` for unsaved drafts.
    fn id(&self) -> Option<EntityId>;

    /// Normalise a payload received from the server.
    ///
    /// Pure structural copy. The default is the identity conversion, which
    /// is correct for every entity whose wire shape matches the model.
    #[must_use]
    fn from_server(wire: Self) -> Self {
        wire
    }

    /// Produce the payload sent to the server.
    ///
    /// Mirror seam of [`Entity::from_server`]; also a pure copy by default.
    #[must_use]
    fn to_server(&self) -> Self {
        self.clone()
    }
}

/// Status and header context of a transport response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseContext {
    /// HTTP status code of the response.
    pub status: u16,
    /// Response headers in wire order.
    pub headers: Vec<(String, String)>,
}

impl ResponseContext {
    /// First header value with the given name, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A normalised fetch result: status/header context paired with a body.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityResponse<T> {
    /// Status and headers of the underlying response.
    pub context: ResponseContext,
    /// Normalised body.
    pub body: T,
}
