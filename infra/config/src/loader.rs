use crate::error::{ConfigErrorExt, Result};
use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::info;

/// Prefix of environment overrides for the shell settings (`MCS__LOGGING__LEVEL`).
pub const SETTINGS_ENV_PREFIX: &str = "MCS";
const SETTINGS_ENV_SEPARATOR: &str = "__";
const DEFAULT_SETTINGS_FILE: &str = "mcs-shell";

/// Layered loader for the shell's own settings.
///
/// 1. **Base File**: an explicitly given file is required; without one, `mcs-shell.{toml,json,..}`
///    in the working directory is read if present.
/// 2. **Environment Overrides**: variables prefixed with `MCS__`, nested with double
///    underscores (`MCS__LOCATION__PORT` maps to `location.port`).
#[derive(Debug, Default)]
pub struct SettingsLoader {
    file: Option<PathBuf>,
    env: Option<HashMap<String, String>>,
}

impl SettingsLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn file(mut self, path: impl AsRef<Path>) -> Self {
        self.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Replaces the process environment as the override source.
    #[must_use]
    pub fn env_overrides(mut self, vars: HashMap<String, String>) -> Self {
        self.env = Some(vars);
        self
    }

    /// Builds the layered configuration and deserializes it into `T`.
    ///
    /// # Errors
    /// Returns [`crate::ConfigError::Settings`] if an explicitly given file is missing, a source
    /// is malformed, or the merged values do not match `T`.
    pub fn load<T>(self) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let file = match &self.file {
            Some(path) => {
                info!("Loading settings from {}", path.display());
                File::from(path.as_path()).required(true)
            },
            None => File::with_name(DEFAULT_SETTINGS_FILE).required(false),
        };

        let env = Environment::with_prefix(SETTINGS_ENV_PREFIX)
            .separator(SETTINGS_ENV_SEPARATOR)
            .convert_case(config::Case::Snake)
            .try_parsing(true)
            .source(self.env);

        let settings = Config::builder()
            .add_source(file)
            .add_source(env)
            .build()
            .context("Failed to build settings")?
            .try_deserialize::<T>()
            .context("Failed to deserialize settings")?;

        Ok(settings)
    }
}

/// Loads settings from `path` (or the default file) with `MCS__` environment overrides.
///
/// # Errors
/// See [`SettingsLoader::load`].
///
/// # Example
/// ```rust
/// use mcs_config::load_settings;
/// use mcs_domain::config::ShellSettings;
///
/// let settings: ShellSettings = load_settings(None::<&str>).unwrap_or_default();
/// assert_eq!(settings.logging.level, "info");
/// ```
pub fn load_settings<T>(path: Option<impl AsRef<Path>>) -> Result<T>
where
    T: DeserializeOwned,
{
    let loader = SettingsLoader::new();
    match path {
        Some(path) => loader.file(path).load(),
        None => loader.load(),
    }
}
