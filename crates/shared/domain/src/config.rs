use crate::keys::{DEFAULT_API_BASE, DEFAULT_BUILD_PREFIX, DEFAULT_MQTT_PATH};
use crate::layout::LayoutFlags;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Parameters handed to the message-bus client before it connects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionOptions {
    pub host: String,
    pub port: u16,
    pub path: String,
    pub use_ssl: bool,
    pub client_id: String,
}

impl ConnectionOptions {
    /// WebSocket URL of the broker endpoint.
    #[must_use]
    pub fn url(&self) -> String {
        let scheme = if self.use_ssl { "wss" } else { "ws" };
        format!("{scheme}://{}:{}{}", self.host, self.port, self.path)
    }
}

/// Host and port the dashboard was served from. Used as connection fallbacks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub host: String,
    pub port: u16,
}

/// Dashboard-wide options: chrome layout plus the simulator API base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardOptions {
    pub mode: String,
    pub theme_class: String,
    pub cover_class: String,
    pub content_class: String,
    pub layout: LayoutFlags,
    pub api_base: String,
    pub auth: bool,
    pub compact: bool,
}

/// Settings of the shell process itself (not the dashboard configuration).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ShellSettings {
    /// JSON document holding the runtime configuration table.
    pub runtime_config: Option<PathBuf>,
    pub build_prefix: BuildPrefix,
    pub location: Location,
    pub logging: LoggingSettings,
}

/// Prefix that marks build-time entries.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct BuildPrefix(pub String);

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub directory: Option<PathBuf>,
    pub json: bool,
}

// --- Default ---

impl Default for Location {
    fn default() -> Self {
        Self { host: "localhost".to_owned(), port: 80 }
    }
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            mode: String::new(),
            theme_class: String::new(),
            cover_class: String::new(),
            content_class: String::new(),
            layout: LayoutFlags::empty(),
            api_base: DEFAULT_API_BASE.to_owned(),
            auth: false,
            compact: false,
        }
    }
}

impl Default for BuildPrefix {
    fn default() -> Self {
        Self(DEFAULT_BUILD_PREFIX.to_owned())
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self { level: "info".to_owned(), directory: None, json: false }
    }
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        let location = Location::default();
        Self {
            host: location.host,
            port: location.port,
            path: DEFAULT_MQTT_PATH.to_owned(),
            use_ssl: false,
            client_id: String::new(),
        }
    }
}
