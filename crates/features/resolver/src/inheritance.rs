use pforge_domain::ConfigMap;
use pforge_domain::brand::{BrandPalette, ColorRole};
use pforge_domain::constants::{ACCENT_COLOR, BACKGROUND_COLOR, PRIMARY_COLOR, SECONDARY_COLOR};
use serde_json::Value;

/// Which screen-level style keys each palette role back-fills. Every role also fills
/// its own global key (`primary_color`, ...) when a screen left it blank.
pub const ROLE_KEYS: [(ColorRole, &[&str]); 4] = [
    (
        ColorRole::Primary,
        &[
            "button_color",
            "top_bar_bg_color",
            "bottom_bar_active_color",
            "continue_button_color",
            PRIMARY_COLOR,
        ],
    ),
    (ColorRole::Background, &[BACKGROUND_COLOR, "profile_bg_color", "tile_bg_color"]),
    (
        ColorRole::Secondary,
        &["bottom_bar_inactive_color", "tile_border_color", SECONDARY_COLOR],
    ),
    (ColorRole::Accent, &[ACCENT_COLOR, "link_color", "badge_bg_color"]),
];

/// Back-fills unset style keys of `settings` from `palette`.
///
/// A key counts as unset when it is missing, `null` or a blank string; any other value
/// is an explicit screen-level choice and is kept. Empty palette slots fill nothing.
/// Applying the result again changes nothing.
#[must_use]
pub fn inherit(palette: &BrandPalette, settings: &ConfigMap) -> ConfigMap {
    let mut merged = settings.clone();
    for (role, keys) in ROLE_KEYS {
        let Some(color) = palette.get(role) else { continue };
        for key in keys {
            if is_unset(merged.get(*key)) {
                merged.insert((*key).to_owned(), Value::String(color.to_owned()));
            }
        }
    }
    merged
}

fn is_unset(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn palette() -> BrandPalette {
        BrandPalette {
            primary: "#111111".into(),
            secondary: "#222222".into(),
            accent: String::new(),
            background: "#ffffff".into(),
        }
    }

    #[test]
    fn fills_missing_and_blank_keys() {
        let mut settings = ConfigMap::new();
        settings.insert("button_color".into(), json!(""));
        settings.insert("tile_bg_color".into(), json!(null));

        let merged = inherit(&palette(), &settings);
        assert_eq!(merged["button_color"], "#111111");
        assert_eq!(merged["top_bar_bg_color"], "#111111");
        assert_eq!(merged["tile_bg_color"], "#ffffff");
        assert_eq!(merged["tile_border_color"], "#222222");
    }

    #[test]
    fn explicit_values_win() {
        let mut settings = ConfigMap::new();
        settings.insert("button_color".into(), json!("#ff0000"));
        settings.insert("top_bar_title".into(), json!("Hi"));

        let merged = inherit(&palette(), &settings);
        assert_eq!(merged["button_color"], "#ff0000");
        assert_eq!(merged["top_bar_title"], "Hi");
    }

    #[test]
    fn empty_palette_slots_fill_nothing() {
        let merged = inherit(&palette(), &ConfigMap::new());
        assert!(!merged.contains_key("link_color"));
        assert!(!merged.contains_key("badge_bg_color"));
    }

    #[test]
    fn blank_global_keys_take_their_role_color() {
        let mut settings = ConfigMap::new();
        settings.insert(PRIMARY_COLOR.into(), json!(""));
        settings.insert(SECONDARY_COLOR.into(), json!("#abcdef"));

        let merged = inherit(&palette(), &settings);
        assert_eq!(merged[PRIMARY_COLOR], "#111111");
        assert_eq!(merged[BACKGROUND_COLOR], "#ffffff");
        assert_eq!(merged[SECONDARY_COLOR], "#abcdef");
        assert!(!merged.contains_key(ACCENT_COLOR));
    }

    #[test]
    fn input_is_not_mutated() {
        let settings = ConfigMap::new();
        let _ = inherit(&palette(), &settings);
        assert!(settings.is_empty());
    }
}
