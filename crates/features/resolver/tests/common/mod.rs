use pforge_domain::brand::{BrandPalette, ClientBrandConfig};
use pforge_domain::screen::ScreenCapabilities;
use pforge_domain::{ConfigMap, Value, json};
use pforge_event_bus::EventBus;
use pforge_gateway::MemoryGateway;
use pforge_registry::{
    ConfigEditor, EditorField, ScreenComponent, ScreenRegistry, ScreenRenderer, ScreenSpec,
};
use pforge_resolver::ConfigResolver;
use std::sync::Arc;

#[derive(Debug)]
pub struct Plain;

impl ScreenComponent for Plain {
    fn name(&self) -> &str {
        "plain"
    }
}

impl ScreenRenderer for Plain {
    fn render(&self, config: &ConfigMap) -> String {
        format!("{config:?}")
    }
}

impl ConfigEditor for Plain {
    fn fields(&self) -> Vec<EditorField> {
        Vec::new()
    }
}

pub fn map(value: Value) -> ConfigMap {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

fn spec(defaults: Value, caps: ScreenCapabilities) -> ScreenSpec {
    ScreenSpec::builder()
        .renderer(Arc::new(Plain))
        .editor(Arc::new(Plain))
        .default_config(map(defaults))
        .capabilities(caps)
        .build()
        .unwrap()
}

pub fn registry() -> ScreenRegistry {
    let registry = ScreenRegistry::new();
    registry.register(
        "logo",
        spec(
            json!({
                "logo_size": 120,
                "logo_position": "center",
                "logo_url": "",
                "navigation_config": {},
                "title": "not part of the brand screen",
            }),
            ScreenCapabilities::OWNS_BRAND_COLORS | ScreenCapabilities::ENTRY,
        ),
    );
    registry.register(
        "home",
        spec(
            json!({
                "top_bar_title": "Welcome",
                "background_color": "#000000",
                "primary_color": "#000000",
                "accent_color": "#123456",
                "button_color": "",
            }),
            ScreenCapabilities::empty(),
        ),
    );
    registry.register("menu", spec(json!({ "items": [] }), ScreenCapabilities::empty()));
    registry
}

pub fn acme() -> ClientBrandConfig {
    ClientBrandConfig {
        client_id: "acme".into(),
        app_name: "Acme".into(),
        logo_url: "https://cdn/acme.png".into(),
        palette: BrandPalette {
            primary: "#111111".into(),
            background: "#ffffff".into(),
            ..Default::default()
        },
        approach_id: None,
    }
}

pub fn setup() -> (ConfigResolver<MemoryGateway>, Arc<MemoryGateway>, EventBus) {
    let gateway = Arc::new(MemoryGateway::new());
    gateway.create_client(acme()).unwrap();
    let events = EventBus::new();
    let resolver = ConfigResolver::new(registry(), Arc::clone(&gateway), events.clone());
    (resolver, gateway, events)
}
