use crate::component::{ConfigEditor, ScreenRenderer};
use crate::error::RegistryError;
use pforge_domain::ConfigMap;
use pforge_domain::screen::{ScreenCapabilities, ScreenMetadata};
use std::sync::Arc;

/// Everything a screen module hands to [`crate::ScreenRegistry::register`].
#[derive(Debug, Clone)]
pub struct ScreenSpec {
    pub renderer: Arc<dyn ScreenRenderer>,
    pub editor: Arc<dyn ConfigEditor>,
    pub default_config: ConfigMap,
    pub dependencies: Vec<String>,
    pub metadata: ScreenMetadata,
    pub capabilities: ScreenCapabilities,
}

impl ScreenSpec {
    pub fn builder() -> ScreenSpecBuilder {
        ScreenSpecBuilder::default()
    }
}

#[must_use]
#[derive(Debug, Default)]
pub struct ScreenSpecBuilder {
    renderer: Option<Arc<dyn ScreenRenderer>>,
    editor: Option<Arc<dyn ConfigEditor>>,
    default_config: ConfigMap,
    dependencies: Vec<String>,
    metadata: ScreenMetadata,
    capabilities: ScreenCapabilities,
}

impl ScreenSpecBuilder {
    pub fn renderer(mut self, renderer: Arc<dyn ScreenRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn editor(mut self, editor: Arc<dyn ConfigEditor>) -> Self {
        self.editor = Some(editor);
        self
    }

    pub fn default_config(mut self, config: ConfigMap) -> Self {
        self.default_config = config;
        self
    }

    pub fn dependencies<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = dependencies.into_iter().map(Into::into).collect();
        self
    }

    pub fn metadata(mut self, metadata: ScreenMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn capabilities(mut self, capabilities: ScreenCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// # Errors
    /// Returns [`RegistryError::Validation`] when a capability handle is missing or a
    /// dependency id is blank.
    pub fn build(self) -> Result<ScreenSpec, RegistryError> {
        let renderer = self.renderer.ok_or_else(|| RegistryError::Validation {
            message: "Renderer not provided".into(),
            context: None,
        })?;
        let editor = self.editor.ok_or_else(|| RegistryError::Validation {
            message: "Config editor not provided".into(),
            context: None,
        })?;
        if self.dependencies.iter().any(|dep| dep.trim().is_empty()) {
            return Err(RegistryError::Validation {
                message: "Dependency ids must not be blank".into(),
                context: None,
            });
        }

        Ok(ScreenSpec {
            renderer,
            editor,
            default_config: self.default_config,
            dependencies: self.dependencies,
            metadata: self.metadata,
            capabilities: self.capabilities,
        })
    }
}

/// A registered screen. Immutable once stored; shared as `Arc<ScreenDefinition>`.
#[derive(Debug, Clone)]
pub struct ScreenDefinition {
    pub id: String,
    pub renderer: Arc<dyn ScreenRenderer>,
    pub editor: Arc<dyn ConfigEditor>,
    pub default_config: ConfigMap,
    pub dependencies: Vec<String>,
    pub metadata: ScreenMetadata,
    pub capabilities: ScreenCapabilities,
}

impl ScreenDefinition {
    pub fn new(id: impl Into<String>, spec: ScreenSpec) -> Self {
        Self {
            id: id.into(),
            renderer: spec.renderer,
            editor: spec.editor,
            default_config: spec.default_config,
            dependencies: spec.dependencies,
            metadata: spec.metadata,
            capabilities: spec.capabilities,
        }
    }

    /// A fresh deep copy of the default configuration.
    #[must_use]
    pub fn defaults(&self) -> ConfigMap {
        self.default_config.clone()
    }

    #[must_use]
    pub const fn owns_brand_colors(&self) -> bool {
        self.capabilities.contains(ScreenCapabilities::OWNS_BRAND_COLORS)
    }

    #[must_use]
    pub const fn is_entry(&self) -> bool {
        self.capabilities.contains(ScreenCapabilities::ENTRY)
    }
}
