use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};
use serde::Serialize;
use std::io::Write;
use weather_core::{DEFAULT_BASE_URL, WeatherApiClient, WeatherService};

use crate::{render, settings::Settings};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "WeatherAPI.com forecasts and city search")]
pub struct Cli {
    /// Print the raw JSON result instead of the human-readable view.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the WeatherAPI.com API key (and optionally a base URL).
    Configure,

    /// Show the 7-day forecast for a place name or "lat,lon" query.
    Show {
        /// Free-text place name or coordinate pair.
        query: String,
    },

    /// Show the forecast for a city together with its resolved location.
    City {
        /// City name.
        name: String,
    },

    /// Show the forecast for a coordinate pair.
    Coords {
        #[arg(allow_hyphen_values = true)]
        lat: f64,
        #[arg(allow_hyphen_values = true)]
        lon: f64,
    },

    /// Search for cities matching a name.
    Search {
        query: String,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        if let Command::Configure = self.command {
            return configure();
        }

        let config = Settings::load()?.client_config()?;
        let client = WeatherApiClient::new(config);

        let mut stdout = std::io::stdout().lock();
        self.execute(&client, &mut stdout).await
    }

    /// Run a lookup command against `service`, writing the result to `out`.
    pub async fn execute(&self, service: &dyn WeatherService, out: &mut impl Write) -> Result<()> {
        let text = match &self.command {
            Command::Configure => return configure(),
            Command::Show { query } => {
                let data = service.get_weather(query).await?;
                self.format(&data, render::forecast)?
            }
            Command::City { name } => {
                let result = service.get_weather_by_city(name).await?;
                self.format(&result, render::city_weather)?
            }
            Command::Coords { lat, lon } => {
                let data = service.get_weather_by_coords(*lat, *lon).await?;
                self.format(&data, render::forecast)?
            }
            Command::Search { query } => {
                let cities = service.search_city(query).await?;
                self.format(&cities, |c| render::locations(c))?
            }
        };

        out.write_all(text.as_bytes()).context("Failed to write output")?;
        Ok(())
    }

    fn format<T: Serialize>(&self, value: &T, human: impl Fn(&T) -> String) -> Result<String> {
        if self.json {
            let mut text =
                serde_json::to_string_pretty(value).context("Failed to serialize result")?;
            text.push('\n');
            Ok(text)
        } else {
            Ok(human(value))
        }
    }
}

fn configure() -> Result<()> {
    let mut settings = Settings::load()?;

    let api_key = Password::new("WeatherAPI.com API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let current_base = settings.base_url.clone().unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let base_url = Text::new("Base URL:")
        .with_default(&current_base)
        .prompt()
        .context("Failed to read base URL")?;

    settings.api_key = Some(api_key.trim().to_string());
    settings.base_url = (base_url.trim() != DEFAULT_BASE_URL).then(|| base_url.trim().to_string());

    let path = settings.save()?;
    tracing::info!(path = %path.display(), "Settings saved");
    println!("Saved settings to {}", path.display());

    Ok(())
}
