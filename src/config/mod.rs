//! This module handles the application's configuration, including loading and
//! saving settings to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use pacific_quote::config::{self, Config};
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.quote_api_url = Some("https://sales.example.com/api/quote".to_string());
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

use crate::error::Result;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

/// Environment variable overriding the quote submission endpoint.
pub const ENV_API_URL: &str = "PACIFIC_QUOTE_API_URL";

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTPS endpoint that receives quote-request payloads.
    pub quote_api_url: Option<String>,
}

fn get_default_config_path() -> Option<PathBuf> {
    paths::get_app_config_dir().map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

/// Resolves the quote submission endpoint.
///
/// The `PACIFIC_QUOTE_API_URL` environment variable wins over the config
/// file; an empty value is treated as unset.
pub fn resolve_api_url(config: &Config) -> Option<String> {
    if let Ok(url) = std::env::var(ENV_API_URL) {
        if !url.is_empty() {
            return Some(url);
        }
    }
    config.quote_api_url.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::tempdir;

    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn save_and_load_round_trip_preserves_api_url() {
        let config = Config {
            quote_api_url: Some("https://sales.example.com/api/quote".to_string()),
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded.quote_api_url, config.quote_api_url);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert!(loaded.quote_api_url.is_none());
    }

    #[test]
    fn save_to_path_creates_parent_directories() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let nested_dir = temp_dir.path().join("deep").join("path");
        let config_path = nested_dir.join("settings.toml");
        let config = Config {
            quote_api_url: Some("https://example.com".to_string()),
        };

        save_to_path(&config, &config_path).expect("save should create directories");
        assert!(config_path.exists());
    }

    #[test]
    fn env_var_wins_over_config_file() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::set_var(ENV_API_URL, "https://env.example.com");

        let config = Config {
            quote_api_url: Some("https://file.example.com".to_string()),
        };
        assert_eq!(
            resolve_api_url(&config),
            Some("https://env.example.com".to_string())
        );

        std::env::remove_var(ENV_API_URL);
    }

    #[test]
    fn empty_env_var_falls_back_to_config() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::set_var(ENV_API_URL, "");

        let config = Config {
            quote_api_url: Some("https://file.example.com".to_string()),
        };
        assert_eq!(
            resolve_api_url(&config),
            Some("https://file.example.com".to_string())
        );

        std::env::remove_var(ENV_API_URL);
    }

    #[test]
    fn unconfigured_endpoint_resolves_to_none() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::remove_var(ENV_API_URL);

        assert_eq!(resolve_api_url(&Config::default()), None);
    }
}
