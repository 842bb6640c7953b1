use anyhow::Context;
use clap::{Parser, Subcommand};
use std::sync::Arc;

use nowcast_core::{
    AppController, Config, Coordinate, CycleOutcome, OpenWeatherClient, UnitSystem,
};

use crate::output::TerminalSurface;
use crate::platform::{AlwaysGranted, AssumeOnline, NoopSettings, StaticLocationProvider};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "nowcast", version, about = "Current weather for where you are")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and an optional home coordinate.
    Configure,

    /// Run one fetch cycle and print the result.
    Show {
        /// Latitude, overriding the configured home coordinate.
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Longitude, overriding the configured home coordinate.
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,

        /// Unit system sent to the API: metric or imperial.
        #[arg(long)]
        units: Option<String>,

        /// Locale used for the temperature-unit label, e.g. "en_US".
        #[arg(long)]
        locale: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show {
                lat,
                lon,
                units,
                locale,
            } => show(lat, lon, units, locale).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key);

    let set_home = inquire::Confirm::new("Set a home coordinate for `nowcast show`?")
        .with_default(config.home.is_some())
        .prompt()
        .unwrap_or(false);

    if set_home {
        let latitude: f64 = inquire::CustomType::new("Latitude:")
            .with_error_message("Please enter a number")
            .prompt()
            .context("Failed to read latitude")?;
        let longitude: f64 = inquire::CustomType::new("Longitude:")
            .with_error_message("Please enter a number")
            .prompt()
            .context("Failed to read longitude")?;

        let coordinate = Coordinate::new(latitude, longitude)
            .map_err(|e| anyhow::anyhow!("Invalid coordinate: {e}"))?;
        config.set_home(coordinate);
    }

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

async fn show(
    lat: Option<f64>,
    lon: Option<f64>,
    units: Option<String>,
    locale: Option<String>,
) -> anyhow::Result<()> {
    let config = Config::load()?;
    let api_key = config.require_api_key()?;

    let coordinate = match (lat, lon) {
        (Some(lat), Some(lon)) => {
            Coordinate::new(lat, lon).map_err(|e| anyhow::anyhow!("Invalid coordinate: {e}"))?
        }
        _ => config.home_coordinate()?.ok_or_else(|| {
            anyhow::anyhow!(
                "No coordinate available.\n\
                 Hint: pass `--lat <f> --lon <f>` or set a home coordinate via `nowcast configure`."
            )
        })?,
    };

    let units = match units {
        Some(s) => UnitSystem::try_from(s.as_str())?,
        None => config.units,
    };

    let locale = locale
        .or_else(|| config.locale.clone())
        .or_else(|| std::env::var("LC_ALL").ok())
        .or_else(|| std::env::var("LANG").ok())
        .unwrap_or_default();

    let client = OpenWeatherClient::new(api_key)
        .map_err(|e| anyhow::anyhow!("Failed to build weather client: {e}"))?;

    let controller = AppController::new(
        Arc::new(StaticLocationProvider::new(coordinate)),
        Arc::new(AlwaysGranted),
        Arc::new(AssumeOnline),
        Arc::new(client),
        Arc::new(TerminalSurface),
        Arc::new(NoopSettings),
        units,
        locale,
    );

    match controller.refresh().await {
        CycleOutcome::Rendered(_) => Ok(()),
        CycleOutcome::Failed(err) => Err(anyhow::anyhow!("{err}")),
        // One cycle per invocation; nothing can be in flight.
        CycleOutcome::Ignored => Ok(()),
    }
}
