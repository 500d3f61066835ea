use pforge_domain::constants::NAVIGATION_CONFIG;
use pforge_domain::{ConfigMap, Value};
use pforge_navigation::NavigationGraph;
use pforge_registry::{ConfigEditor, EditorField, FieldKind, ScreenComponent, ScreenRenderer};
use std::fmt::Write;

/// Plain-text preview: a title line, one `key: value` line per setting in config
/// order, then the navigation edges.
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    screen_id: String,
    title: String,
}

impl TemplateRenderer {
    #[must_use]
    pub fn new(screen_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self { screen_id: screen_id.into(), title: title.into() }
    }
}

impl ScreenComponent for TemplateRenderer {
    fn name(&self) -> &str {
        &self.screen_id
    }
}

impl ScreenRenderer for TemplateRenderer {
    fn render(&self, config: &ConfigMap) -> String {
        let mut out = format!("== {} ==\n", self.title);
        for (key, value) in config.iter().filter(|(key, _)| *key != NAVIGATION_CONFIG) {
            let _ = writeln!(out, "{key}: {}", display(value));
        }

        let graph = NavigationGraph::from_config(self.screen_id.clone(), config);
        for edge in graph.edges() {
            let marker = if edge.enabled { "" } else { " (disabled)" };
            let _ = writeln!(out, "[{}] -> {}{marker}", edge.element_id, edge.target_screen_id);
        }
        out
    }
}

fn display(value: &Value) -> String {
    match value {
        Value::String(s) if s.is_empty() => "(unset)".to_owned(),
        Value::String(s) => s.clone(),
        Value::Array(items) => format!("[{} items]", items.len()),
        Value::Null => "(unset)".to_owned(),
        other => other.to_string(),
    }
}

/// Editable fields derived from a screen's defaults.
#[derive(Debug, Clone)]
pub struct FieldEditor {
    screen_id: String,
    fields: Vec<EditorField>,
}

impl FieldEditor {
    #[must_use]
    pub fn from_defaults(screen_id: impl Into<String>, defaults: &ConfigMap) -> Self {
        let fields =
            defaults.iter().map(|(key, value)| EditorField::new(key.clone(), FieldKind::infer(key, value))).collect();
        Self { screen_id: screen_id.into(), fields }
    }
}

impl ScreenComponent for FieldEditor {
    fn name(&self) -> &str {
        &self.screen_id
    }
}

impl ConfigEditor for FieldEditor {
    fn fields(&self) -> Vec<EditorField> {
        self.fields.clone()
    }
}
