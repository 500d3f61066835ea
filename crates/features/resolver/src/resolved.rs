use pforge_domain::ConfigMap;
use pforge_domain::constants::NAVIGATION_CONFIG;
use serde::Serialize;

/// A source that contributed to a resolved configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    Defaults,
    /// Brand-owned values (logo, palette) on a brand-owning screen.
    Brand,
    /// Palette-derived global colors on an ordinary screen.
    Palette,
    Override,
    Session,
}

/// The effective configuration of one (client, screen) pair. Never persisted as such.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedConfig {
    pub client_id: String,
    pub screen_id: String,
    pub config: ConfigMap,
    /// Contributing layers, lowest precedence first.
    pub layers: Vec<Layer>,
    /// The saved override could not be loaded; the screen renders from defaults.
    pub degraded: bool,
}

impl ResolvedConfig {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.config.get(key)
    }

    /// Convenience for string values; `None` for missing or non-string keys.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.config.get(key).and_then(serde_json::Value::as_str)
    }

    #[must_use]
    pub fn navigation_config(&self) -> Option<&ConfigMap> {
        self.config.get(NAVIGATION_CONFIG).and_then(serde_json::Value::as_object)
    }

    #[must_use]
    pub fn has_layer(&self, layer: Layer) -> bool {
        self.layers.contains(&layer)
    }

    #[must_use]
    pub fn into_config(self) -> ConfigMap {
        self.config
    }
}
