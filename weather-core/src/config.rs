use serde::{Deserialize, Serialize};
use std::{env, fmt};
use thiserror::Error;

/// Base URL of the WeatherAPI.com v1 REST API.
pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "WEATHER_API_KEY";

/// Environment variable overriding the base URL.
pub const BASE_URL_VAR: &str = "WEATHER_API_BASE_URL";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Environment variable {0} is not set")]
    MissingVar(&'static str),
}

/// Settings injected into [`crate::WeatherApiClient`].
///
/// The API key is only ever sent as the `key` query parameter; `Debug`
/// output redacts it.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_key: String,

    /// Example TOML:
    /// base_url = "https://api.weatherapi.com/v1"
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self { api_key: api_key.into(), base_url: default_base_url() }
    }

    /// Point the client at another host, e.g. a stub server in tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Read the key (required) and base URL (optional) from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup(API_KEY_VAR).ok_or(ConfigError::MissingVar(API_KEY_VAR))?;
        let config = Self::new(api_key);

        Ok(match lookup(BASE_URL_VAR).filter(|url| !url.trim().is_empty()) {
            Some(url) => config.with_base_url(url),
            None => config,
        })
    }

    /// Base URL without a trailing slash, ready for `{base}/{endpoint}`.
    pub(crate) fn endpoint(&self, name: &str) -> String {
        format!("{}/{name}", self.base_url.trim_end_matches('/'))
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}
