use pforge_domain::brand::{BrandPatch, ClientBrandConfig, ColorRole};
use pforge_domain::screen::ApproachScreen;
use pforge_domain::{ConfigMap, json};
use pforge_gateway::{ApproachDirectory, ConfigGateway, FileGateway, GatewayError};

async fn store() -> (tempfile::TempDir, FileGateway) {
    let dir = tempfile::tempdir().unwrap();
    let gateway = FileGateway::open(dir.path().join("store")).await.unwrap();
    gateway.create_client(ClientBrandConfig::unbranded("acme")).await.unwrap();
    (dir, gateway)
}

#[tokio::test]
async fn overrides_survive_reopen() {
    let (dir, gateway) = store().await;
    let mut settings = ConfigMap::new();
    settings.insert("top_bar_title".into(), json!("Hi"));
    settings.insert("navigation_config".into(), json!({ "cta": { "targetScreenId": "home", "enabled": true } }));
    gateway.save("acme", "login", settings.clone()).await.unwrap();

    let reopened = FileGateway::open(dir.path().join("store")).await.unwrap();
    assert_eq!(reopened.load("acme", "login").await.unwrap(), settings);
    assert!(reopened.load("acme", "home").await.unwrap().is_empty());
}

#[tokio::test]
async fn brand_patch_is_persisted() {
    let (_dir, gateway) = store().await;
    let mut patch = BrandPatch { app_name: Some("Acme".into()), ..Default::default() };
    patch.palette.set(ColorRole::Primary, "#ABCDEF");

    let updated = gateway.update_brand("acme", patch).await.unwrap();
    assert_eq!(updated.palette.primary, "#ABCDEF");
    assert_eq!(gateway.load_brand("acme").await.unwrap(), updated);
}

#[tokio::test]
async fn no_temp_files_are_left_behind() {
    let (_dir, gateway) = store().await;
    for i in 0..3 {
        let mut settings = ConfigMap::new();
        settings.insert("n".into(), json!(i));
        gateway.save("acme", "home", settings).await.unwrap();
    }

    let screens = gateway.root().join("clients/acme/screens");
    let names: Vec<_> = std::fs::read_dir(screens)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["home.json"]);
}

#[tokio::test]
async fn ids_cannot_escape_the_root() {
    let (_dir, gateway) = store().await;
    let err = gateway.save("acme", "../../evil", ConfigMap::new()).await.unwrap_err();
    assert!(matches!(err, GatewayError::InvalidKey { .. }));
    let err = gateway.load_brand("..").await.unwrap_err();
    assert!(matches!(err, GatewayError::InvalidKey { .. }));
}

#[tokio::test]
async fn client_lifecycle() {
    let (_dir, gateway) = store().await;
    assert!(matches!(
        gateway.create_client(ClientBrandConfig::unbranded("acme")).await,
        Err(GatewayError::Conflict { .. })
    ));
    gateway.create_client(ClientBrandConfig::unbranded("beta")).await.unwrap();
    assert_eq!(gateway.list_clients().await.unwrap(), ["acme", "beta"]);

    gateway.save("acme", "home", ConfigMap::new()).await.unwrap();
    gateway.save("acme", "menu", ConfigMap::new()).await.unwrap();
    assert_eq!(gateway.delete_client("acme").await.unwrap(), 2);
    assert!(gateway.load("acme", "home").await.unwrap_err().is_not_found());
    assert_eq!(gateway.list_clients().await.unwrap(), ["beta"]);
}

#[tokio::test]
async fn approach_documents_round_trip_in_order() {
    let (_dir, gateway) = store().await;
    gateway
        .put_approach("flow", vec![ApproachScreen::new("menu", 5, "Menu"), ApproachScreen::new("logo", 1, "Logo")])
        .await
        .unwrap();
    let screens = gateway.approach_screens("flow").await.unwrap();
    assert_eq!(screens[0].screen_id, "logo");
    assert!(gateway.approach_screens("missing").await.unwrap().is_empty());
}
