//! Route-parameter map driving dialogs and detail views.

use std::collections::HashMap;

use super::entity::EntityId;

/// Parameters extracted from the active route.
///
/// Presence of an `id` key selects edit mode in dialogs and identifies the
/// record a detail view shows. Values arrive as strings from the routing
/// layer; numeric interpretation happens here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    params: HashMap<String, String>,
}

impl RouteParams {
    /// Empty parameter map (create-mode routes carry no `id`).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one parameter, replacing any previous value for the key.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Raw value of a parameter.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Entity identifier carried by the route, when present and numeric.
    #[must_use]
    pub fn id(&self) -> Option<EntityId> {
        self.get("id").and_then(|raw| raw.parse().ok())
    }
}

impl<K, V> FromIterator<(K, V)> for RouteParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            params: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}
