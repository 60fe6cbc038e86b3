use crate::tables::{BuildTable, RuntimeTable, is_truthy, render};
use mcs_domain::keys::DEFAULT_BUILD_PREFIX;
use serde::Serialize;
use std::str::FromStr;
use tracing::trace;

/// Which layer answered a lookup.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    strum_macros::Display,
    strum_macros::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Layer {
    Build,
    Runtime,
    Fallback,
}

/// A resolved value together with the layer it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub value: String,
    pub layer: Layer,
}

/// Resolves named configuration values across three layers, in fixed order:
///
/// 1. the build-time table, keyed `<prefix><name>`; presence wins, even with an empty value;
/// 2. the runtime table, keyed `<name>`; only truthy values count;
/// 3. the caller-supplied fallback.
///
/// Resolution is total: a value is always produced.
///
/// # Example
/// ```rust
/// use mcs_config::{BuildTable, ConfigResolver, RuntimeTable};
///
/// let runtime = RuntimeTable::from_json_str(r#"{ "SO_MQTT_PORT": 1883 }"#).unwrap();
/// let resolver = ConfigResolver::builder().build_table(BuildTable::empty()).runtime(runtime).build();
///
/// assert_eq!(resolver.resolve("SO_MQTT_PORT", "1884"), "1883");
/// assert_eq!(resolver.resolve("SO_MQTT_PATH", "/mqtt"), "/mqtt");
/// ```
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    prefix: String,
    build: BuildTable,
    runtime: Option<RuntimeTable>,
}

impl Default for ConfigResolver {
    fn default() -> Self {
        Self { prefix: DEFAULT_BUILD_PREFIX.to_owned(), build: BuildTable::empty(), runtime: None }
    }
}

impl ConfigResolver {
    #[must_use = "builders do nothing unless you call .build()"]
    pub fn builder() -> ConfigResolverBuilder {
        ConfigResolverBuilder::default()
    }

    /// Resolves `name`, returning `fallback` unchanged when no layer overrides it.
    #[must_use]
    pub fn resolve(&self, name: &str, fallback: &str) -> String {
        self.resolve_with_layer(name, fallback).value
    }

    /// Like [`ConfigResolver::resolve`], also reporting which layer answered.
    #[must_use]
    pub fn resolve_with_layer(&self, name: &str, fallback: &str) -> Resolved {
        let prefixed = format!("{}{name}", self.prefix);
        if let Some(value) = self.build.get(&prefixed) {
            trace!(name, layer = %Layer::Build, "Config value resolved");
            return Resolved { value: value.to_owned(), layer: Layer::Build };
        }

        if let Some(value) = self.runtime.as_ref().and_then(|t| t.get(name)).filter(|v| is_truthy(v))
        {
            trace!(name, layer = %Layer::Runtime, "Config value resolved");
            return Resolved { value: render(value), layer: Layer::Runtime };
        }

        trace!(name, layer = %Layer::Fallback, "Config value resolved");
        Resolved { value: fallback.to_owned(), layer: Layer::Fallback }
    }

    /// Resolves `name` and parses it, keeping `fallback` when the resolved text does not parse.
    ///
    /// Surrounding whitespace is ignored, but the whole value must parse: unlike a lenient
    /// leading-digits integer parse, `"1883abc"` and `1883.5` keep `fallback` rather than
    /// yielding `1883`.
    #[must_use]
    pub fn resolve_parsed<T>(&self, name: &str, fallback: T) -> T
    where
        T: FromStr + ToString,
    {
        let resolved = self.resolve_with_layer(name, &fallback.to_string());
        if resolved.layer == Layer::Fallback {
            return fallback;
        }
        resolved.value.trim().parse().unwrap_or_else(|_| {
            trace!(name, value = %resolved.value, "Config value did not parse, using fallback");
            fallback
        })
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[must_use]
    pub const fn build_table(&self) -> &BuildTable {
        &self.build
    }

    #[must_use]
    pub const fn runtime(&self) -> Option<&RuntimeTable> {
        self.runtime.as_ref()
    }

    /// Mutable access to the runtime table, creating an empty one if none was supplied.
    pub fn runtime_mut(&mut self) -> &mut RuntimeTable {
        self.runtime.get_or_insert_with(RuntimeTable::new)
    }

    /// Swaps the runtime layer, e.g. after the served document was refreshed.
    pub fn replace_runtime(&mut self, runtime: Option<RuntimeTable>) -> Option<RuntimeTable> {
        std::mem::replace(&mut self.runtime, runtime)
    }
}

/// A fluent builder for [`ConfigResolver`].
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Default)]
pub struct ConfigResolverBuilder {
    prefix: Option<String>,
    build: BuildTable,
    runtime: Option<RuntimeTable>,
}

impl ConfigResolverBuilder {
    /// Overrides the build-time key prefix (default `MCS_`).
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn build_table(mut self, table: BuildTable) -> Self {
        self.build = table;
        self
    }

    pub fn runtime(mut self, table: RuntimeTable) -> Self {
        self.runtime = Some(table);
        self
    }

    pub fn maybe_runtime(mut self, table: Option<RuntimeTable>) -> Self {
        self.runtime = table;
        self
    }

    #[must_use]
    pub fn build(self) -> ConfigResolver {
        ConfigResolver {
            prefix: self.prefix.unwrap_or_else(|| DEFAULT_BUILD_PREFIX.to_owned()),
            build: self.build,
            runtime: self.runtime,
        }
    }
}
