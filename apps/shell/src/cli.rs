//! # CLI Argument Definitions
//!
//! Command-line interface of the `mcs-shell` binary. Flags given here take precedence over the
//! settings file and `MCS__*` environment overrides.

use clap::Parser;
use mcs_domain::config::ShellSettings;
use std::path::PathBuf;

/// Resolves and prints the dashboard bootstrap configuration.
#[derive(Debug, Parser)]
#[command(name = "mcs-shell")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Resolves the mission-control dashboard bootstrap configuration")]
pub struct Cli {
    /// Shell settings file (TOML, YAML or JSON). `mcs-shell.*` in the working directory is
    /// picked up when present.
    #[arg(short, long, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Runtime configuration document (a JSON object of entries).
    #[arg(short, long, value_name = "PATH")]
    pub runtime_config: Option<PathBuf>,

    /// Host the dashboard is served from; the broker host falls back to it.
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Port the dashboard is served from; the broker port falls back to it.
    #[arg(long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Overlays the flags onto loaded settings.
    pub fn apply(&self, settings: &mut ShellSettings) {
        if let Some(path) = &self.runtime_config {
            settings.runtime_config = Some(path.clone());
        }
        if let Some(host) = &self.host {
            settings.location.host.clone_from(host);
        }
        if let Some(port) = self.port {
            settings.location.port = port;
        }
    }
}
