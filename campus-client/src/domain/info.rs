//! Informational record entity model.

use serde::{Deserialize, Serialize};

use super::building::BuildingRef;
use super::entity::{Entity, EntityId};

/// An informational record published for a building.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Info {
    /// Server-assigned identifier; `None` until persisted.
    pub id: Option<EntityId>,
    /// Free-form content of the record.
    pub text: Option<String>,
    /// Definition categorising this record.
    pub definition: Option<InfoDefinitionRef>,
    /// Building the record concerns.
    pub building: Option<BuildingRef>,
}

impl Entity for Info {
    const COLLECTION: &'static str = "infos";
    const CHANGE_EVENT: &'static str = "infoListModification";

    fn id(&self) -> Option<EntityId> {
        self.id
    }
}

/// Minimal embedded shape of an informational record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoRef {
    /// Identifier of the referenced record.
    pub id: Option<EntityId>,
}

/// Minimal embedded shape of an informational record definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoDefinitionRef {
    /// Identifier of the definition.
    pub id: Option<EntityId>,
    /// Label of the definition, when the server includes it.
    pub label: Option<String>,
}
