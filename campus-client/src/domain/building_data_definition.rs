//! Building data definition entity model.

use serde::{Deserialize, Serialize};

use super::building::BuildingRef;
use super::entity::{Entity, EntityId};

/// Definition of one measurable datum attached to a building.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct BuildingDataDefinition {
    /// Server-assigned identifier; `None` until persisted.
    pub id: Option<EntityId>,
    /// Human-readable label of the datum.
    pub label: Option<String>,
    /// Building this definition belongs to.
    pub building: Option<BuildingRef>,
}

impl Entity for BuildingDataDefinition {
    const COLLECTION: &'static str = "building-data-definitions";
    const CHANGE_EVENT: &'static str = "buildingDataDefinitionListModification";

    fn id(&self) -> Option<EntityId> {
        self.id
    }
}
