use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};
use weather_core::{
    ClientConfig,
    config::{API_KEY_VAR, BASE_URL_VAR},
};

/// Settings stored on disk by `weather configure`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Settings {
    /// Example TOML:
    /// api_key = "..."
    /// base_url = "https://api.weatherapi.com/v1"
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

impl Settings {
    /// Load settings from disk, or return empty settings if none were saved yet.
    pub fn load() -> Result<Self> {
        let path = Self::file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))
    }

    /// Save settings to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create settings directory: {}", parent.display())
            })?;
        }

        let toml = toml::to_string_pretty(self).context("Failed to serialize settings to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write settings file: {}", path.display()))?;

        Ok(path)
    }

    pub fn file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Build the client config, letting the environment override saved values.
    pub fn client_config(&self) -> Result<ClientConfig> {
        self.client_config_with(|name| env::var(name).ok())
    }

    fn client_config_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Result<ClientConfig> {
        let api_key = lookup(API_KEY_VAR)
            .or_else(|| self.api_key.clone())
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                anyhow!(
                    "No API key configured.\n\
                     Hint: run `weather configure` or set {API_KEY_VAR}."
                )
            })?;

        let config = ClientConfig::new(api_key);
        let base_url = lookup(BASE_URL_VAR)
            .or_else(|| self.base_url.clone())
            .filter(|url| !url.trim().is_empty());

        Ok(match base_url {
            Some(url) => config.with_base_url(url),
            None => config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weather_core::DEFAULT_BASE_URL;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn missing_key_gives_configure_hint() {
        let err = Settings::default().client_config_with(no_env).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("No API key configured"));
        assert!(msg.contains("weather configure"));
    }

    #[test]
    fn saved_key_is_used_with_default_base_url() {
        let settings = Settings { api_key: Some("FILE_KEY".into()), base_url: None };
        let cfg = settings.client_config_with(no_env).expect("config should resolve");
        assert_eq!(cfg.api_key, "FILE_KEY");
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn environment_overrides_saved_values() {
        let settings = Settings {
            api_key: Some("FILE_KEY".into()),
            base_url: Some("http://file.example/v1".into()),
        };
        let cfg = settings
            .client_config_with(|name| match name {
                API_KEY_VAR => Some("ENV_KEY".into()),
                BASE_URL_VAR => Some("http://env.example/v1".into()),
                _ => None,
            })
            .expect("config should resolve");

        assert_eq!(cfg.api_key, "ENV_KEY");
        assert_eq!(cfg.base_url, "http://env.example/v1");
    }

    #[test]
    fn blank_saved_key_counts_as_missing() {
        let settings = Settings { api_key: Some("   ".into()), base_url: None };
        assert!(settings.client_config_with(no_env).is_err());
    }

    #[test]
    fn settings_toml_roundtrip() {
        let settings = Settings { api_key: Some("K".into()), base_url: None };
        let text = toml::to_string_pretty(&settings).expect("should serialize");
        let back: Settings = toml::from_str(&text).expect("should parse");
        assert_eq!(back, settings);
    }
}
