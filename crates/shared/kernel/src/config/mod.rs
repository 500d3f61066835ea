use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable prefix for overrides (`PFORGE__STORE__ROOT`).
pub const ENV_PREFIX: &str = "PFORGE";
/// Config file looked up when no explicit path is given. Optional.
pub const DEFAULT_CONFIG_FILE: &str = "pforge";

/// Custom error type for config loading.
#[pforge_derive::pforge_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Layered configuration loader: a file source plus `PFORGE__*` environment overrides.
///
/// 1. **Base File**: an explicit `path` must exist. Without one, a `pforge.{toml,json,yaml}`
///    file in the working directory is used when present.
/// 2. **Environment Overrides**: variables prefixed with `PFORGE__`, nested with double
///    underscores (`PFORGE__SESSION__CACHE_CAPACITY` maps to `session.cache_capacity`).
///
/// # Errors
/// Fails when an explicit file is missing or the merged sources do not deserialize into `T`.
///
/// # Example
/// ```rust
/// use pforge_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     level: String,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    build::<T>(path.map(|p| p.as_ref().to_path_buf()), None)
}

/// Same as [`load_config`] but reads overrides from `vars` instead of the process environment.
/// Keys keep the `PFORGE__` prefix.
///
/// # Errors
/// See [`load_config`].
pub fn load_config_with_env<T>(
    path: Option<impl AsRef<Path>>,
    vars: config::Map<String, String>,
) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    build::<T>(path.map(|p| p.as_ref().to_path_buf()), Some(vars))
}

fn build<T>(path: Option<PathBuf>, vars: Option<config::Map<String, String>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let required = path.is_some();
    let effective_path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(required))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .source(vars),
        );

    info!(path = %effective_path.display(), required, "Loading config");

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
