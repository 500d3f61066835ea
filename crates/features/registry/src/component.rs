use pforge_domain::ConfigMap;
use serde::Serialize;
use std::fmt::Debug;

/// Shared interface of every capability handle a screen definition carries.
pub trait ScreenComponent: Debug + Send + Sync + 'static {
    /// Stable component name, used in logs and diagnostics.
    fn name(&self) -> &str;
}

/// Produces a textual preview of a screen from its resolved configuration.
///
/// Output is markup-agnostic; visual layout belongs to the caller.
pub trait ScreenRenderer: ScreenComponent {
    fn render(&self, config: &ConfigMap) -> String;
}

/// Describes the editable fields of a screen.
pub trait ConfigEditor: ScreenComponent {
    fn fields(&self) -> Vec<EditorField>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Color,
    Text,
    Number,
    Toggle,
    List,
    Navigation,
    Other,
}

impl FieldKind {
    /// Guesses a field kind from a config key and its default value.
    #[must_use]
    pub fn infer(key: &str, value: &serde_json::Value) -> Self {
        use serde_json::Value;

        if key == pforge_domain::constants::NAVIGATION_CONFIG {
            return Self::Navigation;
        }
        match value {
            Value::String(_) if key.ends_with("_color") => Self::Color,
            Value::String(_) => Self::Text,
            Value::Number(_) => Self::Number,
            Value::Bool(_) => Self::Toggle,
            Value::Array(_) => Self::List,
            Value::Null | Value::Object(_) => Self::Other,
        }
    }
}

/// One editable configuration key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditorField {
    pub key: String,
    pub kind: FieldKind,
    pub label: String,
}

impl EditorField {
    /// Builds a field whose label is the key with underscores turned into spaces.
    pub fn new(key: impl Into<String>, kind: FieldKind) -> Self {
        let key = key.into();
        let label = key.replace('_', " ");
        Self { key, kind, label }
    }
}
