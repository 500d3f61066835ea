use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level engine configuration shared across crates.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfigInner {
    pub session: SessionConfig,
    pub store: StoreConfig,
    pub bootstrap: BootstrapConfig,
    pub logging: LoggingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct EngineConfig {
    #[serde(flatten, default)]
    inner: Arc<EngineConfigInner>,
}

impl Deref for EngineConfig {
    type Target = EngineConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for EngineConfig {
    fn deref_mut(&mut self) -> &mut EngineConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Editing session knobs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Max resolved screens cached per session.
    pub cache_capacity: u64,
}

/// File-backed store location.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub root: PathBuf,
}

#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Fail bootstrap when a screen declares an unregistered dependency.
    pub strict_dependencies: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
    pub directory: Option<PathBuf>,
}

// --- Default ---

impl Default for SessionConfig {
    fn default() -> Self {
        Self { cache_capacity: 64 }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { root: PathBuf::from("pforge-data") }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), json: false, directory: None }
    }
}
