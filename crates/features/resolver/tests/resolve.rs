mod common;

use common::{acme, map, setup};
use pforge_domain::json;
use pforge_event_bus::EventReceiverExt;
use pforge_gateway::{ConfigGateway, GatewayOp};
use pforge_resolver::{BrandChanged, Layer, ResolverError};
use std::time::Duration;

#[tokio::test]
async fn palette_colors_apply_without_override() {
    let (resolver, _, _) = setup();
    let resolved = resolver.resolve("acme", "home", &acme(), None).await.unwrap();

    assert_eq!(resolved.get_str("background_color"), Some("#ffffff"));
    assert_eq!(resolved.get_str("primary_color"), Some("#111111"));
    assert_eq!(resolved.get_str("accent_color"), Some("#123456"));
    assert_eq!(resolved.layers, [Layer::Defaults, Layer::Palette]);
    assert!(!resolved.degraded);
}

#[tokio::test]
async fn saved_values_win_except_global_colors() {
    let (resolver, gateway, _) = setup();
    gateway
        .save(
            "acme",
            "home",
            map(json!({ "top_bar_title": "Hi", "primary_color": "#stale0", "button_color": "#ff0000" })),
        )
        .await
        .unwrap();

    let resolved = resolver.resolve("acme", "home", &acme(), None).await.unwrap();
    assert_eq!(resolved.get_str("top_bar_title"), Some("Hi"));
    assert_eq!(resolved.get_str("button_color"), Some("#ff0000"));
    assert_eq!(resolved.get_str("primary_color"), Some("#111111"));
    assert!(resolved.has_layer(Layer::Override));
}

#[tokio::test]
async fn entry_screen_uses_narrow_keys_and_brand() {
    let (resolver, gateway, _) = setup();
    gateway
        .save(
            "acme",
            "logo",
            map(json!({ "logo_size": 200, "logo_url": "https://old", "primary_color": "#999999" })),
        )
        .await
        .unwrap();

    let resolved = resolver.resolve("acme", "logo", &acme(), None).await.unwrap();
    assert_eq!(resolved.get("logo_size"), Some(&json!(200)));
    assert_eq!(resolved.get_str("logo_position"), Some("center"));
    assert_eq!(resolved.get_str("logo_url"), Some("https://cdn/acme.png"));
    assert_eq!(resolved.get_str("primary_color"), Some("#111111"));
    assert!(resolved.get("title").is_none());
    assert!(resolved.has_layer(Layer::Brand));
}

#[tokio::test]
async fn entry_screen_colors_write_back_into_brand() {
    let (resolver, gateway, events) = setup();
    let mut rx = events.subscribe::<BrandChanged>().unwrap();

    let config = map(json!({
        "primary_color": "#ABCDEF",
        "logo_size": 80,
        "navigation_config": { "start": { "targetScreenId": "home", "enabled": true } },
    }));
    let outcome = resolver.try_save("acme", "logo", &config).await.unwrap();

    assert_eq!(gateway.stored_brand("acme").unwrap().palette.primary, "#ABCDEF");
    assert_eq!(outcome.brand.unwrap().palette.primary, "#ABCDEF");

    let stored = gateway.stored_override("acme", "logo").unwrap();
    assert!(!stored.contains_key("primary_color"));
    assert!(!stored.contains_key("logo_size"));
    assert!(stored.contains_key("navigation_config"));

    let event = rx.recv_event().await.unwrap();
    assert_eq!(event.client_id, "acme");
    assert_eq!(event.palette.primary, "#ABCDEF");
}

#[tokio::test]
async fn unchanged_entry_colors_do_not_touch_brand() {
    let (resolver, gateway, events) = setup();
    let mut rx = events.subscribe::<BrandChanged>().unwrap();
    let config = map(json!({ "primary_color": "#111111" }));

    let outcome = resolver.try_save("acme", "logo", &config).await.unwrap();
    assert!(outcome.brand.is_none());
    assert!(rx.drain().is_empty());
    assert_eq!(gateway.stored_brand("acme").unwrap(), acme());
}

#[tokio::test]
async fn ordinary_saves_strip_global_colors() {
    let (resolver, gateway, _) = setup();
    let config = map(json!({
        "top_bar_title": "Hi",
        "background_color": "#eeeeee",
        "primary_color": "#eeeeee",
        "secondary_color": "#eeeeee",
        "accent_color": "#eeeeee",
        "button_color": "#00ff00",
    }));
    assert!(resolver.save("acme", "home", &config).await);

    let stored = gateway.stored_override("acme", "home").unwrap();
    assert_eq!(stored, map(json!({ "top_bar_title": "Hi", "button_color": "#00ff00" })));
}

#[tokio::test]
async fn load_failure_degrades_to_defaults() {
    let (resolver, gateway, _) = setup();
    gateway.save("acme", "home", map(json!({ "top_bar_title": "Hi" }))).await.unwrap();
    gateway.faults().fail(GatewayOp::Load, "store offline");

    let resolved = resolver.resolve("acme", "home", &acme(), None).await.unwrap();
    assert!(resolved.degraded);
    assert_eq!(resolved.get_str("top_bar_title"), Some("Welcome"));
    assert_eq!(resolved.get_str("background_color"), Some("#ffffff"));
}

#[tokio::test]
async fn save_failure_is_reported_as_false() {
    let (resolver, gateway, _) = setup();
    gateway.faults().fail(GatewayOp::Save, "store offline");

    assert!(!resolver.save("acme", "home", &map(json!({ "top_bar_title": "Hi" }))).await);
    let err = resolver.try_save("acme", "home", &map(json!({}))).await.unwrap_err();
    assert!(matches!(err, ResolverError::Gateway { .. }));
}

#[tokio::test]
async fn blank_ids_and_unknown_screens_are_rejected() {
    let (resolver, _, _) = setup();
    let brand = acme();
    assert!(matches!(
        resolver.resolve("", "home", &brand, None).await,
        Err(ResolverError::Validation { .. })
    ));
    assert!(matches!(
        resolver.resolve("acme", " ", &brand, None).await,
        Err(ResolverError::Validation { .. })
    ));
    assert!(matches!(
        resolver.resolve("acme", "ghost", &brand, None).await,
        Err(ResolverError::UnknownScreen { .. })
    ));
    assert!(!resolver.save("", "home", &map(json!({}))).await);
}

#[tokio::test]
async fn session_edits_take_precedence() {
    let (resolver, gateway, _) = setup();
    gateway.save("acme", "home", map(json!({ "top_bar_title": "Saved" }))).await.unwrap();
    let cached = map(json!({ "top_bar_title": "Editing", "primary_color": "#222222" }));

    let resolved = resolver.resolve("acme", "home", &acme(), Some(&cached)).await.unwrap();
    assert_eq!(resolved.get_str("top_bar_title"), Some("Editing"));
    assert_eq!(resolved.get_str("primary_color"), Some("#222222"));
    assert_eq!(resolved.layers.last(), Some(&Layer::Session));
}

#[tokio::test]
async fn reset_ignores_saved_state_without_deleting_it() {
    let (resolver, gateway, _) = setup();
    gateway.save("acme", "home", map(json!({ "top_bar_title": "Hi" }))).await.unwrap();

    let reset = resolver.reset_to_default("home", &acme()).unwrap();
    assert_eq!(reset["top_bar_title"], "Welcome");
    assert_eq!(reset["primary_color"], "#111111");
    assert!(gateway.stored_override("acme", "home").is_some());
    assert!(resolver.reset_to_default("ghost", &acme()).is_err());
}

#[tokio::test]
async fn concurrent_session_saves_are_last_write_wins() {
    let (resolver, gateway, _) = setup();
    gateway.faults().queue_delays(GatewayOp::Save, [Duration::from_millis(40), Duration::ZERO]);

    let first = map(json!({ "items": ["first"] }));
    let second = map(json!({ "items": ["second"] }));
    let (a, b) = tokio::join!(
        resolver.save("acme", "menu", &first),
        resolver.save("acme", "menu", &second)
    );
    assert!(a && b);
    assert_eq!(gateway.stored_override("acme", "menu").unwrap(), first);
}
