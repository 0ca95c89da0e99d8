//! Application configuration management.
//!
//! Configuration is stored at `~/.config/vaxtrack/config.json`; the token
//! slot and any other per-install data live under the data directory.
//! The API base URL resolves from the `VAXTRACK_API_URL` environment
//! variable, then the config file, then the built-in default.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for config/data directory paths
const APP_NAME: &str = "vaxtrack";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Default backend base URL (the dev backend the console talks to)
const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";

/// Environment variable overriding the backend base URL
const API_URL_ENV: &str = "VAXTRACK_API_URL";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_base_url: Option<String>,
    pub last_username: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Resolved backend base URL, without a trailing slash.
    pub fn api_base_url(&self) -> String {
        let url = std::env::var(API_URL_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .or_else(|| self.api_base_url.clone())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        url.trim_end_matches('/').to_string()
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory holding the token slot and other per-install data.
    pub fn data_dir(&self) -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_falls_back_to_default() {
        let config = Config::default();
        // Ignore any ambient override when asserting the default.
        if std::env::var(API_URL_ENV).is_err() {
            assert_eq!(config.api_base_url(), DEFAULT_API_BASE_URL);
        }
    }

    #[test]
    fn base_url_strips_trailing_slash() {
        let config = Config {
            api_base_url: Some("https://vax.example.org/api/".into()),
            last_username: None,
        };
        if std::env::var(API_URL_ENV).is_err() {
            assert_eq!(config.api_base_url(), "https://vax.example.org/api");
        }
    }
}
