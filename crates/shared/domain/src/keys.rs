//! Names of the dashboard configuration entries.
//!
//! These are the bare names passed to the resolver; the build-time table stores them with the
//! build prefix in front (`MCS_SO_MQTT`), the runtime document stores them as-is.

/// Message-bus broker host.
pub const SO_MQTT: &str = "SO_MQTT";
/// Message-bus broker port.
pub const SO_MQTT_PORT: &str = "SO_MQTT_PORT";
/// WebSocket path of the broker endpoint.
pub const SO_MQTT_PATH: &str = "SO_MQTT_PATH";
/// `"true"` enables TLS for the broker connection. Any other value disables it.
pub const SO_MQTT_SSL: &str = "SO_MQTT_SSL";
/// Base path of the simulator REST API.
pub const SO_API: &str = "SO_API";

/// Default prefix of the build-time table.
pub const DEFAULT_BUILD_PREFIX: &str = "MCS_";

pub const DEFAULT_MQTT_PATH: &str = "/mqtt";
pub const DEFAULT_API_BASE: &str = "/api";
pub const DEFAULT_MQTT_SSL: &str = "false";

/// Every key the dashboard bootstrap reads.
pub const ALL: [&str; 5] = [SO_MQTT, SO_MQTT_PORT, SO_MQTT_PATH, SO_MQTT_SSL, SO_API];
