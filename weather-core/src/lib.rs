//! Client for the WeatherAPI.com forecast and city search endpoints.
//!
//! This crate defines:
//! - Client configuration (API key, base URL)
//! - The [`WeatherService`] operations and their HTTP implementation
//! - Forecast and location models
//! - A small closed error taxonomy and injectable diagnostics
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod model;

pub use client::{WeatherApiClient, WeatherService, coords_query};
pub use config::{ClientConfig, ConfigError, DEFAULT_BASE_URL};
pub use diagnostics::{DiagnosticEvent, DiagnosticSink, Endpoint, TracingSink};
pub use error::WeatherError;
pub use model::{CityWeather, CurrentConditions, ForecastDay, Location, WeatherData};
