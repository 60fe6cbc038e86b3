#![allow(clippy::print_stdout)]

use anyhow::{Context, Result};
use clap::Parser;
use mcs_config::load_settings;
use mcs_domain::config::ShellSettings;
use mcs_logger::Logger;
use mcs_shell::{Bootstrap, Cli, Report};
use tracing::info;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings: ShellSettings =
        load_settings(cli.settings.as_deref()).context("Critical: Shell settings are malformed")?;
    cli.apply(&mut settings);

    let _logger = Logger::builder()
        .name(env!("CARGO_PKG_NAME"))
        .level_str(&settings.logging.level)?
        .directory(settings.logging.directory.clone())
        .json(settings.logging.json)
        .init()?;

    let bootstrap =
        Bootstrap::from_settings(&settings).context("Failed to prepare configuration layers")?;
    let report = bootstrap.report();
    info!(url = %report.url, client_id = %report.connection.client_id, "Bootstrap resolved");

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_report(&report);
    }

    Ok(())
}

fn render_report(report: &Report) {
    println!("{:<10} {}", "Broker", report.url);
    println!("{:<10} {}", "Client", report.connection.client_id);
    println!("{:<10} {}", "API", report.dashboard.api_base);
    println!();
    println!("{:<15} {:<10} {:<40}", "Key", "Layer", "Value");
    println!("{:-<65}", "");
    for source in &report.sources {
        println!("{:<15} {:<10} {:<40}", source.key, source.layer.as_ref(), source.value);
    }
}
