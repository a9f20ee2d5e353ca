//! Building entity model.

use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId};

/// A campus building as exchanged with the administration API.
///
/// Every field besides the identifier is optional on the wire; a missing
/// identifier marks an unsaved draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Building {
    /// Server-assigned identifier; `None` until persisted.
    pub id: Option<EntityId>,
    /// Display name of the building.
    pub name: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
}

impl Entity for Building {
    const COLLECTION: &'static str = "buildings";
    const CHANGE_EVENT: &'static str = "buildingListModification";

    fn id(&self) -> Option<EntityId> {
        self.id
    }
}

/// Minimal embedded shape of a building inside another entity.
///
/// Deliberately a projection, so unknown fields from richer server payloads
/// are ignored rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingRef {
    /// Identifier of the referenced building.
    pub id: Option<EntityId>,
    /// Display name, when the server includes it.
    pub name: Option<String>,
}
