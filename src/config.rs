use crate::constants::{DEFAULT_API_BASE_URL, DEFAULT_NEWS_LIMIT, DEFAULT_VIDEO_LIMIT};
use crate::errors::{NewsflowError, NewsflowResult};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf, sync::RwLock};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api_base_url: String,
    pub news_limit: u32,
    pub video_limit: u32,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            news_limit: DEFAULT_NEWS_LIMIT,
            video_limit: DEFAULT_VIDEO_LIMIT,
            log_level: "info".to_string(),
        }
    }
}

static CONFIG: Lazy<RwLock<Config>> = Lazy::new(|| RwLock::new(Config::default()));

/// Loads the config file, creating a default one on first run. The
/// `NEWSFLOW_API_URL` environment variable overrides the configured backend.
pub fn initialize_config() -> NewsflowResult<()> {
    let config_path = get_config_path()?;

    let mut config = if config_path.exists() {
        let config_str = fs::read_to_string(&config_path).map_err(|e| {
            NewsflowError::config_error(format!("Failed to read config file: {}", e))
        })?;
        serde_json::from_str(&config_str)
            .map_err(|e| NewsflowError::config_error(format!("Failed to parse config: {}", e)))?
    } else {
        let config = Config::default();
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                NewsflowError::config_error(format!("Failed to create config directory: {}", e))
            })?;
        }
        let config_str = serde_json::to_string_pretty(&config).map_err(|e| {
            NewsflowError::config_error(format!("Failed to serialize config: {}", e))
        })?;
        fs::write(&config_path, config_str).map_err(|e| {
            NewsflowError::config_error(format!("Failed to write config file: {}", e))
        })?;
        config
    };

    if let Ok(url) = env::var("NEWSFLOW_API_URL") {
        config.api_base_url = url;
    }

    validate_config(&config)?;
    *CONFIG.write().unwrap() = config;
    Ok(())
}

fn get_config_path() -> NewsflowResult<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| NewsflowError::config_error("Could not determine config directory"))?;
    Ok(config_dir.join("newsflow").join("config.json"))
}

fn validate_config(config: &Config) -> NewsflowResult<()> {
    if config.api_base_url.is_empty() {
        return Err(NewsflowError::config_error("api_base_url is required"));
    }
    if !config.api_base_url.starts_with("http://") && !config.api_base_url.starts_with("https://") {
        return Err(NewsflowError::config_error(
            "api_base_url must be an http(s) URL",
        ));
    }
    if config.news_limit == 0 || config.video_limit == 0 {
        return Err(NewsflowError::config_error(
            "request limits must be greater than 0",
        ));
    }
    Ok(())
}

pub fn get_config() -> Config {
    CONFIG.read().unwrap().clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_config_valid() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_config_rejects_empty_url() {
        let mut config = Config::default();
        config.api_base_url = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_config_rejects_non_http_url() {
        let mut config = Config::default();
        config.api_base_url = "ftp://example.com".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_config_rejects_zero_limits() {
        let mut config = Config::default();
        config.news_limit = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = Config::default();
        let serialized = serde_json::to_string_pretty(&config).unwrap();
        let parsed: Config = serde_json::from_str(&serialized).unwrap();
        assert_eq!(parsed.api_base_url, config.api_base_url);
        assert_eq!(parsed.news_limit, config.news_limit);
    }
}
