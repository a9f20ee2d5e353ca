//! Notification entity model and its classification tag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::building::BuildingRef;
use super::entity::{Entity, EntityId};
use super::info::InfoRef;

/// Classification of a notification.
///
/// Closed set: the server only ever emits these three tokens, and any other
/// value is a format violation surfaced as a decode failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NotificationType {
    /// Informational broadcast.
    Info,
    /// Error condition requiring attention.
    Error,
    /// Scheduled check or inspection.
    Check,
}

/// A notification raised against a building.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Notification {
    /// Server-assigned identifier; `None` until persisted.
    pub id: Option<EntityId>,
    /// Moment the notification was raised.
    pub date: Option<DateTime<Utc>>,
    /// Classification tag.
    #[serde(rename = "type")]
    pub kind: Option<NotificationType>,
    /// Short human-readable title.
    pub title: Option<String>,
    /// Informational records attached to this notification.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub infos: Vec<InfoRef>,
    /// Building the notification concerns.
    pub building: Option<BuildingRef>,
}

impl Entity for Notification {
    const COLLECTION: &'static str = "notifications";
    const CHANGE_EVENT: &'static str = "notificationListModification";

    fn id(&self) -> Option<EntityId> {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::info("INFO", NotificationType::Info)]
    #[case::error("ERROR", NotificationType::Error)]
    #[case::check("CHECK", NotificationType::Check)]
    fn decodes_declared_type_tags(#[case] token: &str, #[case] expected: NotificationType) {
        let notification: Notification =
            serde_json::from_str(&format!(r#"{{ "id": 1, "type": "{token}" }}"#))
                .expect("declared tags should decode");
        assert_eq!(notification.kind, Some(expected));
    }

    #[test]
    fn rejects_undeclared_type_tags() {
        let result = serde_json::from_str::<Notification>(r#"{ "id": 1, "type": "WARNING" }"#);
        assert!(result.is_err(), "unknown type tags are a format violation");
    }

    #[test]
    fn decodes_embedded_references() {
        let notification: Notification = serde_json::from_str(
            r#"{
                "id": 5,
                "date": "2018-03-04T10:00:00Z",
                "type": "CHECK",
                "title": "Fire drill",
                "infos": [{ "id": 9 }],
                "building": { "id": 2, "name": "Hall B" }
            }"#,
        )
        .expect("payload should decode");

        assert_eq!(notification.infos.len(), 1);
        assert_eq!(
            notification.building.as_ref().and_then(|b| b.id),
            Some(2),
            "embedded building reference should carry its identifier",
        );
    }
}
