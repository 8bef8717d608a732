use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const API_URL_ENV: &str = "TIMETRACK_API_URL";
pub const LOG_LEVEL_ENV: &str = "TIMETRACK_LOG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Base URL of the time-tracking API, e.g. "http://127.0.0.1:5001"
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Default `tracing` filter when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_api_url() -> String {
    "http://127.0.0.1:5001".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            log_level: default_log_level(),
        }
    }
}

impl TrackerConfig {
    fn app_dir(base: Option<PathBuf>, kind: &str) -> Result<PathBuf> {
        Ok(base
            .with_context(|| format!("Cannot determine {} directory", kind))?
            .join("timetrack-tui"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::app_dir(dirs::config_dir(), "config")?.join("config.toml"))
    }

    pub fn log_path() -> Result<PathBuf> {
        Ok(Self::app_dir(dirs::cache_dir(), "cache")?.join("timetrack.log"))
    }

    /// Load config from disk, then apply environment overrides. Returns the
    /// default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config at {}", path.display()))?;
            Self::parse(&raw)
                .with_context(|| format!("Failed to parse config at {}", path.display()))?
        } else {
            Self::default()
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Replace values with non-empty overrides from `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.api_url = url.trim().to_string();
        }
        if let Some(level) = lookup(LOG_LEVEL_ENV).filter(|v| !v.trim().is_empty()) {
            self.log_level = level.trim().to_string();
        }
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(&path, raw)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = TrackerConfig::parse("api_url = \"http://tracker.lan:5001\"\n").unwrap();
        assert_eq!(config.api_url, "http://tracker.lan:5001");
        assert_eq!(config.log_level, "info");

        assert_eq!(TrackerConfig::parse("").unwrap(), TrackerConfig::default());
    }

    #[test]
    fn env_overrides_win_over_file() {
        let mut config = TrackerConfig::default();
        config.apply_overrides(|key| match key {
            API_URL_ENV => Some(" http://10.0.0.2:5001 ".to_string()),
            LOG_LEVEL_ENV => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.api_url, "http://10.0.0.2:5001");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn round_trips_through_toml() {
        let config = TrackerConfig {
            api_url: "http://localhost:9000".to_string(),
            log_level: "debug,timetrack_client=trace".to_string(),
        };
        let raw = toml::to_string_pretty(&config).unwrap();
        assert_eq!(TrackerConfig::parse(&raw).unwrap(), config);
    }
}
