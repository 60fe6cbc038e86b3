use crate::error::{ConfigError, ConfigErrorExt, Result};
use fxhash::FxHashMap;
use mcs_domain::keys::DEFAULT_BUILD_PREFIX;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::debug;

include!(concat!(env!("OUT_DIR"), "/build_env.rs"));

/// Prefix of every key in the captured build-time table.
pub const CAPTURE_PREFIX: &str = DEFAULT_BUILD_PREFIX;
const SETTINGS_PREFIX: &str = "MCS__";

/// Immutable key/value table baked in at build time.
///
/// Keys carry the build prefix (`MCS_SO_MQTT`). Presence of a key is what matters: an entry
/// with an empty value still answers the lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildTable {
    entries: FxHashMap<String, String>,
}

impl BuildTable {
    /// An empty table: every lookup falls through.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Table captured from the compile-time environment of this crate.
    ///
    /// Every `MCS_*` variable visible to the build (except `MCS__*` settings overrides) is
    /// included verbatim. The build script reruns on every build, so the table always matches
    /// the environment of the latest build of this crate.
    #[must_use]
    pub fn captured() -> Self {
        Self::from_pairs(CAPTURED.iter().copied())
    }

    /// Checks that lookups with `prefix` can hit the [`BuildTable::captured`] table.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidPrefix`] when `prefix` does not start with `MCS_`, or
    /// names the `MCS__` settings namespace.
    pub fn check_prefix(prefix: &str) -> Result<()> {
        if prefix.starts_with(CAPTURE_PREFIX) && !prefix.starts_with(SETTINGS_PREFIX) {
            Ok(())
        } else {
            Err(ConfigError::InvalidPrefix {
                prefix: prefix.to_owned(),
                required: CAPTURE_PREFIX,
                context: None,
            })
        }
    }

    /// Snapshot of the current process environment, keeping only `prefix`-ed variables.
    #[must_use]
    pub fn from_env(prefix: &str) -> Self {
        Self::from_vars(prefix, std::env::vars())
    }

    /// Keeps the `prefix`-ed entries of `vars`, keys and values verbatim.
    pub fn from_vars<K, V>(prefix: &str, vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::from_pairs(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .filter(|(key, _): &(String, String)| key.starts_with(prefix)),
        )
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self { entries: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }

    /// Looks up a fully prefixed key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by key.
    #[must_use]
    pub fn entries(&self) -> Vec<(&str, &str)> {
        let mut out: Vec<_> =
            self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        out.sort_unstable();
        out
    }
}

/// Mutable table supplied after deployment, typically a served `configs.json` document.
///
/// Values may be strings, booleans or numbers. Only truthy values take part in resolution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuntimeTable {
    entries: Map<String, Value>,
}

impl RuntimeTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON object document.
    ///
    /// # Errors
    /// Returns [`ConfigError::Json`] for malformed JSON and [`ConfigError::Document`] when the
    /// top-level value is not an object.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw).context("Parsing runtime document")?;
        Self::from_value(value)
    }

    /// Wraps an already parsed JSON value.
    ///
    /// # Errors
    /// Returns [`ConfigError::Document`] when `value` is not an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(entries) => Ok(Self { entries }),
            other => Err(ConfigError::Document {
                message: format!("expected a JSON object, found {}", kind_of(&other)).into(),
                context: None,
            }),
        }
    }

    /// Reads a runtime document from disk.
    ///
    /// A missing file is not an error: it yields `Ok(None)` so the resolver runs without a
    /// runtime layer.
    ///
    /// # Errors
    /// Returns an error when the file exists but cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = path.as_ref();
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "Runtime document not found, skipping layer");
                return Ok(None);
            },
            Err(err) => {
                return Err(err)
                    .context(format!("Reading runtime document {}", path.display()));
            },
        };

        let table =
            Self::from_json_str(&raw).context(format!("Runtime document {}", path.display()))?;
        debug!(path = %path.display(), entries = table.len(), "Runtime document loaded");
        Ok(Some(table))
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    /// Replaces or inserts an entry.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.entries.remove(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Loose truthiness of a runtime value: `null`, `false`, `0` and `""` are falsy.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Renders a runtime value the way it would print as text: strings verbatim, integral numbers
/// without a fraction.
#[must_use]
pub fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                n.as_f64().map_or_else(|| n.to_string(), |f| f.to_string())
            }
        },
        other => other.to_string(),
    }
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
