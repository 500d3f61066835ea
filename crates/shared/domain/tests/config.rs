use pforge_domain::config::{EngineConfig, LoggingConfig, SessionConfig, StoreConfig};
use serde_json::json;

#[test]
fn config_defaults_are_sane() {
    assert_eq!(SessionConfig::default().cache_capacity, 64);
    assert_eq!(StoreConfig::default().root, std::path::PathBuf::from("pforge-data"));

    let logging = LoggingConfig::default();
    assert_eq!(logging.level, "info");
    assert!(!logging.json);
    assert!(logging.directory.is_none());

    let cfg = EngineConfig::default();
    assert!(!cfg.bootstrap.strict_dependencies);
}

#[test]
fn engine_config_deserializes() {
    let raw = json!({
        "session": { "cache_capacity": 8 },
        "store": { "root": "/tmp/pforge" },
        "bootstrap": { "strict_dependencies": true },
        "logging": { "level": "debug", "json": true, "directory": "/tmp/logs" }
    });

    let cfg: EngineConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.session.cache_capacity, 8);
    assert_eq!(cfg.store.root, std::path::PathBuf::from("/tmp/pforge"));
    assert!(cfg.bootstrap.strict_dependencies);
    assert_eq!(cfg.logging.level, "debug");
    assert_eq!(cfg.logging.directory.as_deref(), Some(std::path::Path::new("/tmp/logs")));
}

#[test]
fn partial_sections_fall_back_to_defaults() {
    let cfg: EngineConfig = serde_json::from_value(json!({ "logging": { "json": true } }))
        .expect("config deserialize");
    assert!(cfg.logging.json);
    assert_eq!(cfg.logging.level, "info");
    assert_eq!(cfg.session.cache_capacity, 64);
}

#[test]
fn clones_share_until_mutated() {
    let base = EngineConfig::default();
    let mut tuned = base.clone();
    tuned.session.cache_capacity = 2;
    assert_eq!(base.session.cache_capacity, 64);
    assert_eq!(tuned.session.cache_capacity, 2);
}
