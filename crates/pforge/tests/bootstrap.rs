use pforge::domain::brand::{BrandPalette, ClientBrandConfig};
use pforge::domain::config::EngineConfig;
use pforge::features::registry::{RegistryError, ScreenSpec};
use pforge::{
    CatalogScreen, FieldEditor, Platform, PlatformError, TemplateRenderer, bootstrap, bootstrap_with,
    builtin_screens,
};
use pforge::domain::ConfigMap;
use pforge_gateway::MemoryGateway;
use std::sync::Arc;

fn orphan() -> CatalogScreen {
    let spec = ScreenSpec::builder()
        .renderer(Arc::new(TemplateRenderer::new("orphan", "Orphan")))
        .editor(Arc::new(FieldEditor::from_defaults("orphan", &ConfigMap::new())))
        .dependencies(["nowhere"])
        .build()
        .unwrap();
    CatalogScreen { id: "orphan", spec }
}

fn platform() -> Platform {
    bootstrap(&EngineConfig::default()).unwrap()
}

#[test]
fn builtin_catalog_registers_in_declaration_order() {
    let platform = platform();
    assert_eq!(platform.registry().ids(), ["logo", "login", "home", "menu", "profile", "cards"]);
    assert!(platform.report().is_ok());
    assert_eq!(platform.report().checked, 6);
    assert_eq!(platform.registry().entry_screen().unwrap().id, "logo");
}

#[test]
fn missing_dependency_is_reported_but_tolerated() {
    let mut screens = builtin_screens().unwrap();
    screens.push(orphan());
    let platform = bootstrap_with(&EngineConfig::default(), screens).unwrap();

    assert_eq!(platform.report().failures, [("orphan".to_owned(), vec!["nowhere".to_owned()])]);
    assert!(!platform.validator().validate("orphan"));
    assert!(platform.validator().validate("home"));
}

#[test]
fn strict_mode_rejects_missing_dependencies() {
    let mut config = EngineConfig::default();
    config.bootstrap.strict_dependencies = true;

    let err = bootstrap_with(&config, [orphan()]).unwrap_err();
    assert!(matches!(
        err,
        PlatformError::Registry { source: RegistryError::DependencyMissing { .. }, .. }
    ));
}

#[test]
fn duplicate_registration_keeps_the_last_spec() {
    let mut screens = builtin_screens().unwrap();
    let mut replacement = orphan();
    replacement.id = "menu";
    replacement.spec.dependencies.clear();
    screens.push(replacement);

    let platform = bootstrap_with(&EngineConfig::default(), screens).unwrap();
    assert_eq!(platform.registry().len(), 6);
    assert!(platform.registry().get("menu").unwrap().default_config.is_empty());
}

#[tokio::test]
async fn sessions_open_on_the_entry_screen_with_brand_colors() {
    let platform = platform();
    let gateway = Arc::new(MemoryGateway::new());
    gateway
        .create_client(ClientBrandConfig {
            client_id: "acme".into(),
            app_name: "Acme".into(),
            logo_url: "https://cdn/acme.png".into(),
            palette: BrandPalette {
                primary: "#0055AA".into(),
                secondary: "#333333".into(),
                accent: "#FF9900".into(),
                background: "#FFFFFF".into(),
            },
            approach_id: None,
        })
        .unwrap();

    let mut session = platform.open_session(Arc::clone(&gateway), "acme").await.unwrap();
    let entry = platform.registry().entry_screen().unwrap();
    let logo = session.activate(&entry.id).await.unwrap();
    assert_eq!(logo.get_str("logo_url"), Some("https://cdn/acme.png"));
    assert_eq!(logo.get_str("primary_color"), Some("#0055AA"));
    assert_eq!(session.navigate("logo_image").as_deref(), Some("login"));

    session.activate("home").await.unwrap();
    let preview = session.preview().unwrap();
    assert!(preview.starts_with("== Home ==\n"));
    assert!(preview.contains("top_bar_bg_color: #0055AA"));
    assert!(preview.contains("[menu_button] -> menu"));
}

#[tokio::test]
async fn blank_client_is_a_session_error() {
    let platform = platform();
    let err = platform.open_session(Arc::new(MemoryGateway::new()), "").await.unwrap_err();
    assert!(matches!(err, PlatformError::Session { .. }));
}
