use crate::error::RegistryError;
use crate::registry::ScreenRegistry;
use serde::Serialize;
use tracing::warn;

/// Result of checking every registered screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DependencyReport {
    pub checked: usize,
    /// `(screen_id, missing dependency ids)` for each failing screen, in registration order.
    pub failures: Vec<(String, Vec<String>)>,
}

impl DependencyReport {
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }

    /// Converts the first failure into an error.
    ///
    /// # Errors
    /// Returns [`RegistryError::DependencyMissing`] if any screen failed.
    pub fn into_result(self) -> Result<Self, RegistryError> {
        match self.failures.first() {
            Some((screen_id, missing)) => Err(RegistryError::DependencyMissing {
                screen_id: screen_id.clone(),
                missing: missing.clone(),
                context: Some(format!("{} of {} screens failed", self.failures.len(), self.checked).into()),
            }),
            None => Ok(self),
        }
    }
}

/// Checks that a screen's declared dependencies are themselves registered.
#[derive(Debug, Clone)]
pub struct DependencyValidator {
    registry: ScreenRegistry,
}

impl DependencyValidator {
    #[must_use]
    pub const fn new(registry: ScreenRegistry) -> Self {
        Self { registry }
    }

    /// `true` iff every declared dependency of `screen_id` is registered.
    /// Failures are logged; an unknown `screen_id` is also `false`.
    #[must_use]
    pub fn validate(&self, screen_id: &str) -> bool {
        match self.check(screen_id) {
            Ok(()) => true,
            Err(err) => {
                warn!(screen_id, error = %err, "Dependency validation failed");
                false
            },
        }
    }

    /// # Errors
    /// [`RegistryError::UnknownScreen`] if `screen_id` is not registered,
    /// [`RegistryError::DependencyMissing`] listing every unregistered dependency.
    pub fn check(&self, screen_id: &str) -> Result<(), RegistryError> {
        let definition = self.registry.get(screen_id).ok_or_else(|| RegistryError::UnknownScreen {
            screen_id: screen_id.to_owned(),
            context: Some("dependency check".into()),
        })?;

        let missing = self.missing(&definition.dependencies);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(RegistryError::DependencyMissing {
                screen_id: screen_id.to_owned(),
                missing,
                context: None,
            })
        }
    }

    /// Validates every registered screen, logging each failure.
    #[must_use]
    pub fn validate_all(&self) -> DependencyReport {
        let screens = self.registry.list_all();
        let mut report = DependencyReport { checked: screens.len(), failures: Vec::new() };

        for definition in screens {
            let missing = self.missing(&definition.dependencies);
            if !missing.is_empty() {
                warn!(screen_id = %definition.id, missing = ?missing, "Screen has unregistered dependencies");
                report.failures.push((definition.id.clone(), missing));
            }
        }
        report
    }

    fn missing(&self, dependencies: &[String]) -> Vec<String> {
        dependencies.iter().filter(|dep| !self.registry.contains(dep)).cloned().collect()
    }
}
