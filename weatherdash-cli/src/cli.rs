use anyhow::Context;
use clap::{Parser, Subcommand};
use weatherdash_core::{
    AcquireError, Acquisition, Config, Coordinates, LocationSource, OpenWeatherClient,
    Orchestrator, Query,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherdash", version, about = "Weather dashboard CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure,

    /// Show the dashboard for a city.
    Show {
        /// City name; defaults to the last resolved city, then "Delhi".
        city: Option<String>,
    },

    /// Show the dashboard for the device position.
    Here {
        /// Latitude reported by the platform location service.
        #[arg(long, requires = "lon")]
        lat: Option<f64>,

        /// Longitude reported by the platform location service.
        #[arg(long, requires = "lat")]
        lon: Option<f64>,
    },
}

/// Position handed over by the platform; both coordinates or nothing.
struct CliLocation {
    position: Option<Coordinates>,
}

impl LocationSource for CliLocation {
    fn current_position(&self) -> Option<Coordinates> {
        self.position
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city } => {
                let mut cfg = Config::load()?;
                let orch = orchestrator(&cfg)?;

                let name = city
                    .or_else(|| cfg.default_city.clone())
                    .unwrap_or_else(|| "Delhi".to_string());

                let outcome = orch.acquire(&Query::city(name)).await;
                finish(&mut cfg, outcome)
            }
            Command::Here { lat, lon } => {
                let mut cfg = Config::load()?;
                let orch = orchestrator(&cfg)?;

                let locator = CliLocation {
                    position: lat.zip(lon).map(|(lat, lon)| Coordinates { lat, lon }),
                };

                let outcome = orch.acquire_here(&locator).await;
                finish(&mut cfg, outcome)
            }
        }
    }
}

fn orchestrator(cfg: &Config) -> anyhow::Result<Orchestrator<OpenWeatherClient>> {
    let client = OpenWeatherClient::new(cfg.api_key()?.to_string(), cfg.timeout())?;
    Ok(Orchestrator::new(client))
}

fn finish(cfg: &mut Config, outcome: Result<Acquisition, AcquireError>) -> anyhow::Result<()> {
    let acq = outcome?;

    render::dashboard(&acq);

    // Remember the provider-resolved name, not the user's input string.
    cfg.set_default_city(&acq.current.name);
    cfg.save().context("Failed to remember the resolved city")?;

    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let api_key = inquire::Password::new("OpenWeather API key:")
        .with_display_mode(inquire::PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let mut cfg = Config::load()?;
    cfg.api_key = Some(api_key);
    cfg.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}
