use crate::catalog::{CatalogScreen, builtin_screens};
use crate::error::{PlatformError, PlatformErrorExt};
use pforge_domain::config::EngineConfig;
use pforge_event_bus::EventBus;
use pforge_kernel::gateway::{ApproachDirectory, ConfigGateway};
use pforge_registry::{DependencyReport, DependencyValidator, ScreenRegistry};
use pforge_resolver::ConfigResolver;
use pforge_session::EditorSession;
use std::sync::Arc;
use tracing::{info, warn};

/// The bootstrapped engine: a populated registry, its dependency report and the
/// shared event bus. Gateways are supplied per resolver or session.
#[derive(Debug, Clone)]
pub struct Platform {
    config: EngineConfig,
    registry: ScreenRegistry,
    validator: DependencyValidator,
    report: DependencyReport,
    events: EventBus,
}

/// Registers the built-in catalog and validates dependencies.
///
/// # Errors
/// [`PlatformError::Registry`] when the catalog cannot be built, or when a dependency
/// is missing and `bootstrap.strict_dependencies` is set.
pub fn bootstrap(config: &EngineConfig) -> Result<Platform, PlatformError> {
    let screens = builtin_screens().context("built-in catalog")?;
    bootstrap_with(config, screens)
}

/// Registers `screens` in the given order, then runs dependency validation over the
/// whole registry. Nothing is resolved before this returns.
///
/// # Errors
/// [`PlatformError::Registry`] for a missing dependency under strict mode.
pub fn bootstrap_with(
    config: &EngineConfig,
    screens: impl IntoIterator<Item = CatalogScreen>,
) -> Result<Platform, PlatformError> {
    let registry = ScreenRegistry::new();
    let mut conflicts = 0usize;
    for screen in screens {
        if registry.register(screen.id, screen.spec).is_conflict() {
            conflicts += 1;
        }
    }

    let validator = DependencyValidator::new(registry.clone());
    let report = validator.validate_all();
    if !report.is_ok() {
        if config.bootstrap.strict_dependencies {
            report.clone().into_result().context("strict dependency check")?;
        }
        warn!(failures = report.failures.len(), "Bootstrap continues with unresolved dependencies");
    }

    info!(screens = registry.len(), conflicts, "Screen registry bootstrapped");
    Ok(Platform { config: config.clone(), registry, validator, report, events: EventBus::new() })
}

impl Platform {
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub const fn registry(&self) -> &ScreenRegistry {
        &self.registry
    }

    #[must_use]
    pub const fn validator(&self) -> &DependencyValidator {
        &self.validator
    }

    /// Outcome of the bootstrap-time dependency check.
    #[must_use]
    pub const fn report(&self) -> &DependencyReport {
        &self.report
    }

    #[must_use]
    pub const fn events(&self) -> &EventBus {
        &self.events
    }

    /// A resolver over `gateway` sharing this platform's registry and event bus.
    #[must_use]
    pub fn resolver<G: ConfigGateway>(&self, gateway: Arc<G>) -> ConfigResolver<G> {
        ConfigResolver::new(self.registry.clone(), gateway, self.events.clone())
    }

    /// Opens an editing session for `client_id`, sized by `session.cache_capacity`.
    ///
    /// # Errors
    /// [`PlatformError::Session`] for a blank client id or zero capacity.
    pub async fn open_session<G: ConfigGateway + ApproachDirectory>(
        &self,
        gateway: Arc<G>,
        client_id: &str,
    ) -> Result<EditorSession<G>, PlatformError> {
        let session =
            EditorSession::open(self.resolver(gateway), client_id, self.config.session.cache_capacity)
                .await
                .context("open session")?;
        Ok(session)
    }
}
