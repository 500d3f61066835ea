use crate::error::{ResolverError, ResolverErrorExt};
use crate::events::BrandChanged;
use crate::resolved::{Layer, ResolvedConfig};
use pforge_domain::ConfigMap;
use pforge_domain::brand::{BrandPatch, ClientBrandConfig, ColorRole};
use pforge_domain::constants::{
    BRAND_SCREEN_KEYS, BRAND_SCREEN_OVERRIDE_KEYS, LOGO_URL, NAVIGATION_CONFIG, is_global_color_key,
};
use pforge_event_bus::EventBus;
use pforge_kernel::gateway::ConfigGateway;
use pforge_registry::{ScreenDefinition, ScreenRegistry};
use serde_json::Value;
use std::sync::Arc;
use strum::IntoEnumIterator;
use tracing::{debug, error, instrument, warn};

/// What a successful save wrote.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveOutcome {
    /// Settings stored as the screen override.
    pub persisted: ConfigMap,
    /// The updated brand, when the save wrote brand-owned values.
    pub brand: Option<ClientBrandConfig>,
}

/// Layers registry defaults, saved overrides, brand colors and session edits.
#[derive(Debug)]
pub struct ConfigResolver<G> {
    registry: ScreenRegistry,
    gateway: Arc<G>,
    events: EventBus,
}

impl<G> Clone for ConfigResolver<G> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            gateway: Arc::clone(&self.gateway),
            events: self.events.clone(),
        }
    }
}

impl<G: ConfigGateway> ConfigResolver<G> {
    #[must_use]
    pub const fn new(registry: ScreenRegistry, gateway: Arc<G>, events: EventBus) -> Self {
        Self { registry, gateway, events }
    }

    #[must_use]
    pub const fn registry(&self) -> &ScreenRegistry {
        &self.registry
    }

    #[must_use]
    pub const fn gateway(&self) -> &Arc<G> {
        &self.gateway
    }

    #[must_use]
    pub const fn events(&self) -> &EventBus {
        &self.events
    }

    /// Computes the effective configuration of `screen_id` for `client_id`.
    ///
    /// A failed override load is logged and the screen resolves from defaults plus brand
    /// (`degraded = true`). `cached` holds unsaved session edits and wins over everything.
    ///
    /// # Errors
    /// [`ResolverError::Validation`] for blank ids, [`ResolverError::UnknownScreen`] for an
    /// unregistered screen.
    #[instrument(skip_all, fields(client_id = %client_id, screen_id = %screen_id))]
    pub async fn resolve(
        &self,
        client_id: &str,
        screen_id: &str,
        brand: &ClientBrandConfig,
        cached: Option<&ConfigMap>,
    ) -> Result<ResolvedConfig, ResolverError> {
        let definition = self.definition(client_id, screen_id)?;

        let (saved, degraded) = match self.gateway.load(client_id, screen_id).await {
            Ok(saved) => (saved, false),
            Err(err) => {
                error!(error = %err, "Override load failed, resolving from defaults");
                (ConfigMap::new(), true)
            },
        };

        let (mut config, mut layers) = compose(&definition, brand, &saved);
        if let Some(cached) = cached {
            config.extend(cached.iter().map(|(k, v)| (k.clone(), v.clone())));
            layers.push(Layer::Session);
        }

        debug!(keys = config.len(), ?layers, degraded, "Screen resolved");
        Ok(ResolvedConfig {
            client_id: client_id.to_owned(),
            screen_id: screen_id.to_owned(),
            config,
            layers,
            degraded,
        })
    }

    /// Persists `config`, reporting failure as `false`. See [`Self::try_save`].
    pub async fn save(&self, client_id: &str, screen_id: &str, config: &ConfigMap) -> bool {
        match self.try_save(client_id, screen_id, config).await {
            Ok(_) => true,
            Err(err) => {
                error!(client_id, screen_id, error = %err, "Save failed");
                false
            },
        }
    }

    /// Persists `config` for the pair.
    ///
    /// * Brand-owning screen: changed colors and logo url go to the client brand (a
    ///   palette change publishes [`BrandChanged`]); only `navigation_config` is stored
    ///   as the override.
    /// * Other screens: the four palette-owned color keys are stripped and the rest
    ///   replaces the stored override.
    ///
    /// # Errors
    /// Validation and unknown-screen errors as for [`Self::resolve`], plus
    /// [`ResolverError::Gateway`] for any failed gateway call.
    #[instrument(skip_all, fields(client_id = %client_id, screen_id = %screen_id))]
    pub async fn try_save(
        &self,
        client_id: &str,
        screen_id: &str,
        config: &ConfigMap,
    ) -> Result<SaveOutcome, ResolverError> {
        let definition = self.definition(client_id, screen_id)?;

        if !definition.owns_brand_colors() {
            let persisted: ConfigMap = config
                .iter()
                .filter(|(key, _)| !is_global_color_key(key))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            self.gateway
                .save(client_id, screen_id, persisted.clone())
                .await
                .context("saving override")?;
            debug!(keys = persisted.len(), "Override saved");
            return Ok(SaveOutcome { persisted, brand: None });
        }

        let current = self.gateway.load_brand(client_id).await.context("loading brand")?;
        let patch = brand_patch(&current, config);
        let brand = if patch.is_empty() {
            None
        } else {
            let palette_changed = patch.touches_palette();
            let updated =
                self.gateway.update_brand(client_id, patch).await.context("updating brand")?;
            if palette_changed {
                self.publish_brand_changed(&updated);
            }
            Some(updated)
        };

        let persisted = pick(config, &[NAVIGATION_CONFIG]);
        self.gateway
            .save(client_id, screen_id, persisted.clone())
            .await
            .context("saving navigation")?;
        debug!(brand_updated = brand.is_some(), "Brand screen saved");
        Ok(SaveOutcome { persisted, brand })
    }

    /// Registry defaults merged with the current brand, ignoring anything saved.
    /// Stored overrides are untouched until the next explicit save.
    ///
    /// # Errors
    /// [`ResolverError::UnknownScreen`] for an unregistered screen.
    pub fn reset_to_default(
        &self,
        screen_id: &str,
        brand: &ClientBrandConfig,
    ) -> Result<ConfigMap, ResolverError> {
        let definition = self.registry.get(screen_id).ok_or_else(|| ResolverError::UnknownScreen {
            screen_id: screen_id.to_owned(),
            context: Some("reset".into()),
        })?;
        Ok(compose(&definition, brand, &ConfigMap::new()).0)
    }

    fn definition(
        &self,
        client_id: &str,
        screen_id: &str,
    ) -> Result<Arc<ScreenDefinition>, ResolverError> {
        if client_id.trim().is_empty() {
            return Err(ResolverError::blank("client id"));
        }
        if screen_id.trim().is_empty() {
            return Err(ResolverError::blank("screen id"));
        }
        self.registry.get(screen_id).ok_or_else(|| ResolverError::UnknownScreen {
            screen_id: screen_id.to_owned(),
            context: None,
        })
    }

    fn publish_brand_changed(&self, brand: &ClientBrandConfig) {
        let event =
            BrandChanged { client_id: brand.client_id.clone(), palette: brand.palette.clone() };
        match self.events.publish(event) {
            Ok(delivered) => debug!(client_id = %brand.client_id, delivered, "Brand change published"),
            Err(err) => warn!(client_id = %brand.client_id, error = %err, "Brand change not published"),
        }
    }
}

/// Defaults, saved values and brand for one screen, without session edits.
fn compose(
    definition: &ScreenDefinition,
    brand: &ClientBrandConfig,
    saved: &ConfigMap,
) -> (ConfigMap, Vec<Layer>) {
    let mut layers = vec![Layer::Defaults];

    if definition.owns_brand_colors() {
        let mut config = pick(&definition.default_config, &BRAND_SCREEN_KEYS);
        let kept = pick(saved, &BRAND_SCREEN_OVERRIDE_KEYS);
        if !kept.is_empty() {
            config.extend(kept);
            layers.push(Layer::Override);
        }
        if !brand.logo_url.trim().is_empty() {
            config.insert(LOGO_URL.to_owned(), Value::String(brand.logo_url.clone()));
        }
        for (role, color) in brand.palette.colors() {
            config.insert(role.global_key().to_owned(), Value::String(color.to_owned()));
        }
        layers.push(Layer::Brand);
        return (config, layers);
    }

    let mut config = definition.defaults();
    if !saved.is_empty() {
        config.extend(
            saved
                .iter()
                .filter(|(key, _)| !is_global_color_key(key))
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        layers.push(Layer::Override);
    }

    let mut palette_applied = false;
    for (role, color) in brand.palette.colors() {
        config.insert(role.global_key().to_owned(), Value::String(color.to_owned()));
        palette_applied = true;
    }
    if palette_applied {
        layers.push(Layer::Palette);
    }
    (config, layers)
}

/// Brand-owned values in `config` that differ from `current`. Blank values are ignored.
fn brand_patch(current: &ClientBrandConfig, config: &ConfigMap) -> BrandPatch {
    let mut patch = BrandPatch::default();
    for role in ColorRole::iter() {
        if let Some(color) = non_blank(config, role.global_key())
            && current.palette.get(role) != Some(color)
        {
            patch.palette.set(role, color);
        }
    }
    if let Some(url) = non_blank(config, LOGO_URL)
        && url != current.logo_url
    {
        patch.logo_url = Some(url.to_owned());
    }
    patch
}

fn non_blank<'a>(config: &'a ConfigMap, key: &str) -> Option<&'a str> {
    config.get(key).and_then(Value::as_str).filter(|s| !s.trim().is_empty())
}

fn pick(source: &ConfigMap, keys: &[&str]) -> ConfigMap {
    source.iter().filter(|(k, _)| keys.contains(&k.as_str())).map(|(k, v)| (k.clone(), v.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pforge_domain::brand::BrandPalette;
    use serde_json::json;

    fn brand() -> ClientBrandConfig {
        ClientBrandConfig {
            client_id: "acme".into(),
            logo_url: "https://cdn/acme.png".into(),
            palette: BrandPalette { primary: "#111111".into(), ..Default::default() },
            ..Default::default()
        }
    }

    #[test]
    fn brand_patch_only_carries_changes() {
        let mut config = ConfigMap::new();
        config.insert("primary_color".into(), json!("#111111"));
        config.insert("accent_color".into(), json!("#00ff00"));
        config.insert("background_color".into(), json!(""));
        config.insert("logo_url".into(), json!("https://cdn/acme.png"));

        let patch = brand_patch(&brand(), &config);
        assert_eq!(patch.palette.primary, None);
        assert_eq!(patch.palette.accent.as_deref(), Some("#00ff00"));
        assert_eq!(patch.palette.background, None);
        assert_eq!(patch.logo_url, None);
    }

    #[test]
    fn pick_keeps_only_listed_keys() {
        let mut config = ConfigMap::new();
        config.insert("navigation_config".into(), json!({}));
        config.insert("title".into(), json!("x"));
        let picked = pick(&config, &[NAVIGATION_CONFIG]);
        assert_eq!(picked.len(), 1);
        assert!(picked.contains_key(NAVIGATION_CONFIG));
    }
}
