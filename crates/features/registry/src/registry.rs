use crate::definition::{ScreenDefinition, ScreenSpec};
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, warn};

/// Outcome of [`ScreenRegistry::register`].
#[derive(Debug, Clone)]
pub enum Registration {
    Inserted,
    /// The id was already registered; the returned definition was replaced.
    Replaced { previous: Arc<ScreenDefinition> },
}

impl Registration {
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::Replaced { .. })
    }
}

#[derive(Debug, Default)]
struct RegistryInner {
    order: Vec<String>,
    screens: FxHashMap<String, Arc<ScreenDefinition>>,
}

/// Thread-safe, cheaply cloneable screen catalog.
///
/// Built once at process start and handed to the resolver and validator. Clones share
/// the same catalog.
#[derive(Debug, Clone, Default)]
pub struct ScreenRegistry {
    inner: Arc<RwLock<RegistryInner>>,
}

impl ScreenRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `spec` under `id`. A duplicate id overwrites the existing definition and
    /// is logged as a registration conflict; it is never an error.
    pub fn register(&self, id: impl Into<String>, spec: ScreenSpec) -> Registration {
        let id = id.into();
        let definition = Arc::new(ScreenDefinition::new(id.clone(), spec));

        let mut inner = self.inner.write();
        match inner.screens.insert(id.clone(), definition) {
            Some(previous) => {
                warn!(screen_id = %id, "Registration conflict: replacing existing screen definition");
                Registration::Replaced { previous }
            },
            None => {
                debug!(screen_id = %id, "Screen registered");
                inner.order.push(id);
                Registration::Inserted
            },
        }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<Arc<ScreenDefinition>> {
        self.inner.read().screens.get(id).cloned()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.inner.read().screens.contains_key(id)
    }

    /// Definitions in first-registration order. Replacements keep their original slot.
    #[must_use]
    pub fn list_all(&self) -> Vec<Arc<ScreenDefinition>> {
        let inner = self.inner.read();
        inner.order.iter().filter_map(|id| inner.screens.get(id).cloned()).collect()
    }

    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        self.inner.read().order.clone()
    }

    /// The first registered screen flagged as a session entry point.
    #[must_use]
    pub fn entry_screen(&self) -> Option<Arc<ScreenDefinition>> {
        self.list_all().into_iter().find(|def| def.is_entry())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().screens.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{ConfigEditor, EditorField, ScreenComponent, ScreenRenderer};
    use pforge_domain::ConfigMap;
    use pforge_domain::screen::ScreenCapabilities;

    #[derive(Debug)]
    struct Blank;

    impl ScreenComponent for Blank {
        fn name(&self) -> &str {
            "blank"
        }
    }

    impl ScreenRenderer for Blank {
        fn render(&self, _config: &ConfigMap) -> String {
            String::new()
        }
    }

    impl ConfigEditor for Blank {
        fn fields(&self) -> Vec<EditorField> {
            Vec::new()
        }
    }

    fn spec(caps: ScreenCapabilities) -> ScreenSpec {
        ScreenSpec::builder()
            .renderer(Arc::new(Blank))
            .editor(Arc::new(Blank))
            .capabilities(caps)
            .build()
            .unwrap()
    }

    #[test]
    fn duplicate_ids_replace_but_keep_order() {
        let registry = ScreenRegistry::new();
        assert!(!registry.register("a", spec(ScreenCapabilities::empty())).is_conflict());
        registry.register("b", spec(ScreenCapabilities::empty()));
        let outcome = registry.register("a", spec(ScreenCapabilities::ENTRY));

        assert!(outcome.is_conflict());
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.ids(), vec!["a".to_owned(), "b".to_owned()]);
        assert!(registry.get("a").unwrap().is_entry());
    }

    #[test]
    fn entry_screen_is_found_by_capability() {
        let registry = ScreenRegistry::new();
        registry.register("home", spec(ScreenCapabilities::empty()));
        assert!(registry.entry_screen().is_none());
        registry.register("logo", spec(ScreenCapabilities::ENTRY));
        assert_eq!(registry.entry_screen().unwrap().id, "logo");
    }

    #[test]
    fn builder_requires_handles() {
        let err = ScreenSpec::builder().renderer(Arc::new(Blank)).build().unwrap_err();
        assert!(matches!(err, crate::RegistryError::Validation { .. }));

        let err = ScreenSpec::builder()
            .renderer(Arc::new(Blank))
            .editor(Arc::new(Blank))
            .dependencies([" "])
            .build()
            .unwrap_err();
        assert!(matches!(err, crate::RegistryError::Validation { .. }));
    }
}
