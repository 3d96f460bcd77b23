//! `planet-alert`: which planets can be seen tonight from one location.
//!
//! One invocation runs one pass for one location and exits. The digest goes to the
//! console, or to an HTML file with `--output`. Exit status is 0 when nothing is
//! reportable as well.
use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use planet_alert::config::AppConfig;
use planet_alert::dispatch::{ConsoleDispatcher, DigestDispatcher, HtmlFileDispatcher};
use planet_alert::observers::locations::known_location_names;
use planet_alert::{Instant, PlanetAlert, RunOutcome};

#[derive(Parser)]
#[command(
    name = "planet-alert",
    version,
    about = "Report the planets above the horizon during the coming dark period"
)]
struct Cli {
    /// Configuration file (default: ./planet-alert.yaml when present)
    #[arg(long)]
    config: Option<Utf8PathBuf>,
    /// Observing location, overrides the configuration and PLANET_ALERT_LOCATION
    #[arg(long)]
    location: Option<String>,
    /// Reference instant, RFC 3339 (default: now)
    #[arg(long)]
    now: Option<String>,
    /// Write the HTML digest to this file instead of printing it
    #[arg(long)]
    output: Option<Utf8PathBuf>,
    /// Sampling step of the crossing scan, in minutes
    #[arg(long)]
    step_minutes: Option<f64>,
    /// Print the known locations and exit
    #[arg(long)]
    list_locations: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    if let Err(err) = run(Cli::parse()) {
        error!("{err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;

    if cli.list_locations {
        for name in known_location_names(&config.locations) {
            println!("{name}");
        }
        return Ok(());
    }

    if let Some(location) = cli.location {
        config.location = location;
    }
    if let Some(output) = cli.output {
        config.output = Some(output);
    }
    if let Some(step) = cli.step_minutes {
        config.search.step_minutes = step;
    }

    config.validate().context("invalid configuration")?;
    let alert = PlanetAlert::from_config(&config)?;

    let now = match cli.now.as_deref() {
        Some(text) => Instant::parse(text, alert.site().time_zone)?,
        None => alert.now(),
    };

    let dispatcher: Box<dyn DigestDispatcher> = match &config.output {
        Some(path) => match &config.template {
            Some(template) => Box::new(
                HtmlFileDispatcher::with_template_file(path.clone(), template)
                    .with_context(|| format!("reading template {template}"))?,
            ),
            None => Box::new(HtmlFileDispatcher::new(path.clone(), None)),
        },
        None => Box::new(ConsoleDispatcher),
    };

    if let RunOutcome::Dispatched { rows } = alert.run(&now, dispatcher.as_ref())? {
        info!(location = %alert.site().display_name, rows, "done");
    }
    Ok(())
}
