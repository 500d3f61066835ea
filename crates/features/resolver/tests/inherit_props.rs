use pforge_domain::ConfigMap;
use pforge_domain::brand::BrandPalette;
use pforge_resolver::{ROLE_KEYS, inherit};
use proptest::prelude::*;
use serde_json::Value;

fn color() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), "#[0-9a-f]{6}"]
}

fn palette() -> impl Strategy<Value = BrandPalette> {
    (color(), color(), color(), color()).prop_map(|(primary, secondary, accent, background)| {
        BrandPalette { primary, secondary, accent, background }
    })
}

fn value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        Just(Value::String(String::new())),
        "#[0-9a-f]{6}".prop_map(Value::String),
        any::<i32>().prop_map(Value::from),
    ]
}

fn settings() -> impl Strategy<Value = ConfigMap> {
    let keys: Vec<&'static str> = ROLE_KEYS
        .iter()
        .flat_map(|(_, keys)| keys.iter().copied())
        .chain(["top_bar_title", "logo_size"])
        .collect();
    proptest::collection::vec((proptest::sample::select(keys), value()), 0..12)
        .prop_map(|pairs| pairs.into_iter().map(|(k, v)| (k.to_owned(), v)).collect())
}

fn is_set(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    }
}

proptest! {
    #[test]
    fn inherit_is_idempotent(palette in palette(), settings in settings()) {
        let once = inherit(&palette, &settings);
        let twice = inherit(&palette, &once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn explicit_values_are_never_replaced(palette in palette(), settings in settings()) {
        let merged = inherit(&palette, &settings);
        for (key, value) in settings.iter().filter(|(_, v)| is_set(v)) {
            prop_assert_eq!(merged.get(key), Some(value));
        }
    }
}
