use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stored value of one `navigation_config` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationTarget {
    #[serde(default)]
    pub target_screen_id: String,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

const fn enabled_by_default() -> bool {
    true
}

impl NavigationTarget {
    #[must_use]
    pub fn new(target_screen_id: impl Into<String>) -> Self {
        Self { target_screen_id: target_screen_id.into(), enabled: true }
    }

    /// Only enabled edges with a non-blank target navigate anywhere.
    #[must_use]
    pub fn active_target(&self) -> Option<&str> {
        (self.enabled && !self.target_screen_id.trim().is_empty())
            .then_some(self.target_screen_id.as_str())
    }

    /// Lenient reader for stored entries: accepts the object form and a bare
    /// target id string. Anything else is ignored.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(target) => Some(Self::new(target.clone())),
            Value::Object(_) => serde_json::from_value(value.clone()).ok(),
            _ => None,
        }
    }

    #[must_use]
    pub fn to_value(&self) -> Value {
        serde_json::json!({ "targetScreenId": self.target_screen_id, "enabled": self.enabled })
    }
}

/// A directed `(source, element) -> target` edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationEdge {
    pub source_screen_id: String,
    pub element_id: String,
    pub target_screen_id: String,
    pub enabled: bool,
}
