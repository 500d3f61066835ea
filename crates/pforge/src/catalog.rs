//! Built-in screen catalog, declared in registration order.

use crate::components::{FieldEditor, TemplateRenderer};
use pforge_domain::screen::{ScreenCapabilities, ScreenMetadata};
use pforge_domain::{ConfigMap, Value, json};
use pforge_registry::{RegistryError, RegistryErrorExt, ScreenSpec};
use std::sync::Arc;

/// One catalog entry ready for [`pforge_registry::ScreenRegistry::register`].
#[derive(Debug, Clone)]
pub struct CatalogScreen {
    pub id: &'static str,
    pub spec: ScreenSpec,
}

struct Entry {
    id: &'static str,
    title: &'static str,
    category: &'static str,
    description: &'static str,
    capabilities: ScreenCapabilities,
    dependencies: &'static [&'static str],
    defaults: fn() -> Value,
}

const ENTRIES: [Entry; 6] = [
    Entry {
        id: "logo",
        title: "Logo",
        category: "brand",
        description: "Splash screen carrying the client logo and palette",
        capabilities: ScreenCapabilities::OWNS_BRAND_COLORS.union(ScreenCapabilities::ENTRY),
        dependencies: &["login"],
        defaults: logo_defaults,
    },
    Entry {
        id: "login",
        title: "Login",
        category: "auth",
        description: "Credential form",
        capabilities: ScreenCapabilities::empty(),
        dependencies: &["home"],
        defaults: login_defaults,
    },
    Entry {
        id: "home",
        title: "Home",
        category: "main",
        description: "Top bar, tiles and bottom navigation",
        capabilities: ScreenCapabilities::empty(),
        dependencies: &["menu", "profile", "cards"],
        defaults: home_defaults,
    },
    Entry {
        id: "menu",
        title: "Menu",
        category: "main",
        description: "Side menu with links",
        capabilities: ScreenCapabilities::empty(),
        dependencies: &["home", "login"],
        defaults: menu_defaults,
    },
    Entry {
        id: "profile",
        title: "Profile",
        category: "account",
        description: "Customer profile summary",
        capabilities: ScreenCapabilities::empty(),
        dependencies: &["home"],
        defaults: profile_defaults,
    },
    Entry {
        id: "cards",
        title: "Cards",
        category: "products",
        description: "Card product tiles with badges",
        capabilities: ScreenCapabilities::empty(),
        dependencies: &["home"],
        defaults: cards_defaults,
    },
];

/// Builds the built-in screens in declaration order.
///
/// # Errors
/// Returns [`RegistryError::Validation`] if an entry cannot be turned into a spec.
pub fn builtin_screens() -> Result<Vec<CatalogScreen>, RegistryError> {
    ENTRIES.iter().map(Entry::build).collect()
}

impl Entry {
    fn build(&self) -> Result<CatalogScreen, RegistryError> {
        let defaults = object(self.id, (self.defaults)())?;
        let spec = ScreenSpec::builder()
            .renderer(Arc::new(TemplateRenderer::new(self.id, self.title)))
            .editor(Arc::new(FieldEditor::from_defaults(self.id, &defaults)))
            .default_config(defaults)
            .dependencies(self.dependencies.iter().copied())
            .metadata(
                ScreenMetadata::new(self.title)
                    .with_category(self.category)
                    .with_description(self.description),
            )
            .capabilities(self.capabilities)
            .build()
            .context(self.id)?;
        Ok(CatalogScreen { id: self.id, spec })
    }
}

fn object(id: &'static str, value: Value) -> Result<ConfigMap, RegistryError> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(RegistryError::Validation {
            message: "default config must be an object".into(),
            context: Some(id.into()),
        }),
    }
}

fn logo_defaults() -> Value {
    json!({
        "logo_size": 120,
        "logo_position": "center",
        "logo_url": "",
        "navigation_config": {
            "logo_image": { "targetScreenId": "login", "enabled": true },
        },
    })
}

fn login_defaults() -> Value {
    json!({
        "title": "Sign in",
        "username_placeholder": "Username",
        "password_placeholder": "Password",
        "button_text": "Log in",
        "button_color": "",
        "link_color": "",
        "remember_me": true,
        "navigation_config": {
            "login_button": { "targetScreenId": "home", "enabled": true },
        },
    })
}

fn home_defaults() -> Value {
    json!({
        "top_bar_title": "Welcome",
        "top_bar_bg_color": "",
        "bottom_bar_active_color": "",
        "bottom_bar_inactive_color": "",
        "tile_bg_color": "",
        "tiles": ["Accounts", "Cards", "Payments", "Offers"],
        "navigation_config": {
            "menu_button": { "targetScreenId": "menu", "enabled": true },
            "profile_button": { "targetScreenId": "profile", "enabled": true },
            "cards_tile": { "targetScreenId": "cards", "enabled": true },
        },
    })
}

fn menu_defaults() -> Value {
    json!({
        "title": "Menu",
        "items": ["Home", "Cards", "Profile", "Log out"],
        "link_color": "",
        "navigation_config": {
            "home_item": { "targetScreenId": "home", "enabled": true },
            "logout_item": { "targetScreenId": "login", "enabled": true },
        },
    })
}

fn profile_defaults() -> Value {
    json!({
        "title": "Profile",
        "profile_bg_color": "",
        "show_avatar": true,
        "fields": ["Name", "Email", "Phone"],
        "navigation_config": {
            "back_button": { "targetScreenId": "home", "enabled": true },
        },
    })
}

fn cards_defaults() -> Value {
    json!({
        "title": "Your cards",
        "columns": 2,
        "tile_bg_color": "",
        "tile_border_color": "",
        "badge_bg_color": "",
        "continue_button_color": "",
        "cards": ["Classic", "Gold", "Platinum"],
        "navigation_config": {
            "back_button": { "targetScreenId": "home", "enabled": true },
        },
    })
}
