use mcs_config::{BuildTable, ConfigErrorExt, ConfigResolver, Layer, Result, RuntimeTable};
use mcs_domain::config::{ConnectionOptions, DashboardOptions, Location, ShellSettings};
use mcs_domain::keys;
use serde::Serialize;
use tracing::{debug, info};

/// Every generated message-bus client id starts with this.
pub const CLIENT_ID_PREFIX: &str = "mcs-";
const CLIENT_ID_LEN: usize = 10;

/// Derives the broker connection parameters.
///
/// Host and port fall back to where the dashboard was served from. A port that does not parse
/// keeps the location port. TLS is on only for the exact value `"true"`.
#[must_use]
pub fn connection_options(resolver: &ConfigResolver, location: &Location) -> ConnectionOptions {
    ConnectionOptions {
        host: resolver.resolve(keys::SO_MQTT, &location.host),
        port: resolver.resolve_parsed(keys::SO_MQTT_PORT, location.port),
        path: resolver.resolve(keys::SO_MQTT_PATH, keys::DEFAULT_MQTT_PATH),
        use_ssl: resolver.resolve(keys::SO_MQTT_SSL, keys::DEFAULT_MQTT_SSL) == "true",
        client_id: client_id(),
    }
}

#[must_use]
pub fn dashboard_options(resolver: &ConfigResolver) -> DashboardOptions {
    DashboardOptions {
        api_base: resolver.resolve(keys::SO_API, keys::DEFAULT_API_BASE),
        ..DashboardOptions::default()
    }
}

/// A fresh, random message-bus client id.
#[must_use]
pub fn client_id() -> String {
    format!("{CLIENT_ID_PREFIX}{}", nanoid::nanoid!(CLIENT_ID_LEN))
}

/// Where one configuration key got its value from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeySource {
    pub key: &'static str,
    pub layer: Layer,
    pub value: String,
}

/// Everything the dashboard needs before it mounts.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub url: String,
    pub connection: ConnectionOptions,
    pub dashboard: DashboardOptions,
    pub sources: Vec<KeySource>,
}

/// Resolver plus the location it falls back to.
#[derive(Debug, Clone)]
pub struct Bootstrap {
    resolver: ConfigResolver,
    location: Location,
}

impl Bootstrap {
    #[must_use]
    pub const fn new(resolver: ConfigResolver, location: Location) -> Self {
        Self { resolver, location }
    }

    /// Builds the resolver from the compile-time table and the runtime document named in
    /// `settings`. A runtime document that does not exist is skipped.
    ///
    /// # Errors
    /// Returns an error when the build prefix cannot match the compile-time table, or when the
    /// runtime document cannot be read or is not a JSON object.
    pub fn from_settings(settings: &ShellSettings) -> Result<Self> {
        BuildTable::check_prefix(&settings.build_prefix.0).context("Shell settings build_prefix")?;
        let runtime = match &settings.runtime_config {
            Some(path) => RuntimeTable::load(path)
                .context(format!("Loading runtime configuration {}", path.display()))?,
            None => None,
        };
        let build = BuildTable::captured();

        debug!(
            prefix = %settings.build_prefix.0,
            build_entries = build.len(),
            runtime_entries = runtime.as_ref().map_or(0, RuntimeTable::len),
            "Configuration layers ready"
        );

        let resolver = ConfigResolver::builder()
            .prefix(settings.build_prefix.0.clone())
            .build_table(build)
            .maybe_runtime(runtime)
            .build();
        Ok(Self::new(resolver, settings.location.clone()))
    }

    #[must_use]
    pub const fn resolver(&self) -> &ConfigResolver {
        &self.resolver
    }

    #[must_use]
    pub const fn location(&self) -> &Location {
        &self.location
    }

    #[must_use]
    pub fn connection_options(&self) -> ConnectionOptions {
        connection_options(&self.resolver, &self.location)
    }

    #[must_use]
    pub fn dashboard_options(&self) -> DashboardOptions {
        dashboard_options(&self.resolver)
    }

    /// Resolves every known key, recording the layer that answered.
    #[must_use]
    pub fn sources(&self) -> Vec<KeySource> {
        keys::ALL
            .iter()
            .map(|&key| {
                let resolved = self.resolver.resolve_with_layer(key, &self.fallback(key));
                KeySource { key, layer: resolved.layer, value: resolved.value }
            })
            .collect()
    }

    #[must_use]
    pub fn report(&self) -> Report {
        let connection = self.connection_options();
        info!(
            host = %connection.host,
            port = connection.port,
            ssl = connection.use_ssl,
            "Connection options resolved"
        );
        Report {
            url: connection.url(),
            connection,
            dashboard: self.dashboard_options(),
            sources: self.sources(),
        }
    }

    fn fallback(&self, key: &str) -> String {
        match key {
            keys::SO_MQTT => self.location.host.clone(),
            keys::SO_MQTT_PORT => self.location.port.to_string(),
            keys::SO_MQTT_PATH => keys::DEFAULT_MQTT_PATH.to_owned(),
            keys::SO_MQTT_SSL => keys::DEFAULT_MQTT_SSL.to_owned(),
            keys::SO_API => keys::DEFAULT_API_BASE.to_owned(),
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcs_config::ConfigError;
    use mcs_domain::config::BuildPrefix;

    fn resolver(build: &[(&str, &str)], runtime: &str) -> ConfigResolver {
        ConfigResolver::builder()
            .build_table(BuildTable::from_pairs(build.iter().copied()))
            .runtime(RuntimeTable::from_json_str(runtime).unwrap())
            .build()
    }

    fn served_from(host: &str, port: u16) -> Location {
        Location { host: host.to_owned(), port }
    }

    #[test]
    fn connection_falls_back_to_location() {
        let options = connection_options(&resolver(&[], "{}"), &served_from("dash.local", 8080));

        assert_eq!(options.host, "dash.local");
        assert_eq!(options.port, 8080);
        assert_eq!(options.path, "/mqtt");
        assert!(!options.use_ssl);
        assert_eq!(options.url(), "ws://dash.local:8080/mqtt");
    }

    #[test]
    fn runtime_document_overrides_location() {
        let runtime = r#"{ "SO_MQTT": "broker.example", "SO_MQTT_PORT": 1883, "SO_MQTT_SSL": "true" }"#;
        let options = connection_options(&resolver(&[], runtime), &served_from("dash.local", 80));

        assert_eq!(options.url(), "wss://broker.example:1883/mqtt");
    }

    #[test]
    fn build_table_wins_over_runtime_document() {
        let resolver = resolver(
            &[("MCS_SO_MQTT_PATH", "/ws"), ("MCS_SO_API", "")],
            r#"{ "SO_MQTT_PATH": "/other", "SO_API": "/v2" }"#,
        );

        let options = connection_options(&resolver, &Location::default());
        assert_eq!(options.path, "/ws");
        assert_eq!(dashboard_options(&resolver).api_base, "");
    }

    #[test]
    fn ssl_requires_exact_true() {
        for value in [r#""TRUE""#, r#""yes""#, "1", "true"] {
            let runtime = format!(r#"{{ "SO_MQTT_SSL": {value} }}"#);
            let options = connection_options(&resolver(&[], &runtime), &Location::default());
            assert_eq!(options.use_ssl, value == "true", "SO_MQTT_SSL = {value}");
        }
    }

    #[test]
    fn unparsable_port_keeps_location_port() {
        let resolver = resolver(&[("MCS_SO_MQTT_PORT", "")], r#"{ "SO_MQTT_PORT": "x" }"#);
        assert_eq!(connection_options(&resolver, &served_from("h", 9001)).port, 9001);
    }

    #[test]
    fn client_ids_are_prefixed_and_unique() {
        let (a, b) = (client_id(), client_id());
        assert!(a.starts_with(CLIENT_ID_PREFIX));
        assert_eq!(a.len(), CLIENT_ID_PREFIX.len() + CLIENT_ID_LEN);
        assert_ne!(a, b);
    }

    #[test]
    fn foreign_build_prefix_is_rejected() {
        let settings =
            ShellSettings { build_prefix: BuildPrefix("VITE_".to_owned()), ..ShellSettings::default() };

        let err = Bootstrap::from_settings(&settings).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPrefix { context: Some(_), .. }));
        assert!(Bootstrap::from_settings(&ShellSettings::default()).is_ok());
    }

    #[test]
    fn report_lists_every_key_with_its_layer() {
        let bootstrap = Bootstrap::new(
            resolver(&[("MCS_SO_API", "/sim")], r#"{ "SO_MQTT": "broker", "SO_MQTT_PORT": 0 }"#),
            served_from("dash.local", 443),
        );
        let report = bootstrap.report();

        let layer = |key: &str| report.sources.iter().find(|s| s.key == key).map(|s| s.layer);
        assert_eq!(report.sources.len(), keys::ALL.len());
        assert_eq!(layer(keys::SO_API), Some(Layer::Build));
        assert_eq!(layer(keys::SO_MQTT), Some(Layer::Runtime));
        assert_eq!(layer(keys::SO_MQTT_PORT), Some(Layer::Fallback));
        assert_eq!(report.url, "ws://broker:443/mqtt");
        assert_eq!(report.dashboard.api_base, "/sim");
    }
}
