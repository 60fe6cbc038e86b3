//! # Config
//!
//! Layered configuration for the mission-control shell.
//!
//! * [`ConfigResolver`] answers named lookups from three layers in a fixed order: the
//!   [`BuildTable`] baked in at build time, the [`RuntimeTable`] injected after deployment, and
//!   the caller's fallback. Lookups never fail.
//! * [`SettingsLoader`] reads the shell's own settings from a file with `MCS__` environment
//!   overrides.
//!
//! ## Example
//!
//! ```rust
//! use mcs_config::{BuildTable, ConfigResolver};
//!
//! let resolver = ConfigResolver::builder()
//!     .build_table(BuildTable::from_pairs([("MCS_SO_MQTT_PORT", "")]))
//!     .build();
//!
//! // Presence in the build-time table wins, even when empty.
//! assert_eq!(resolver.resolve("SO_MQTT_PORT", "1884"), "");
//! ```

mod error;
mod loader;
mod resolver;
mod tables;

pub use crate::error::{ConfigError, ConfigErrorExt, Result};
pub use crate::loader::{SETTINGS_ENV_PREFIX, SettingsLoader, load_settings};
pub use crate::resolver::{ConfigResolver, ConfigResolverBuilder, Layer, Resolved};
pub use crate::tables::{BuildTable, CAPTURE_PREFIX, RuntimeTable, is_truthy, render};
