use crate::constants::{DEFAULT_FEED_URL, DEFAULT_HTTP_TIMEOUT_SECONDS, env_vars};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub mod paths;
pub mod user_prompts;
pub mod validation;

use paths::{get_config_path, get_default_log_file_path, get_log_dir_path};
use user_prompts::prompt_for_backend_url;
use validation::validate_config;

/// Configuration structure for the application.
/// Handles loading, saving, and managing application settings.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Base URL of the season backend (serves `/saisons`).
    pub backend_url: String,
    /// URL of the external results feed.
    #[serde(default = "default_feed_url")]
    pub feed_url: String,
    /// Path to the log file. If not specified, logs will be written to a default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
    /// HTTP timeout in seconds for every request. Defaults to 30 seconds.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
}

fn default_feed_url() -> String {
    DEFAULT_FEED_URL.to_string()
}

fn default_http_timeout() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECONDS
}

impl Default for Config {
    fn default() -> Self {
        Config {
            backend_url: String::new(),
            feed_url: default_feed_url(),
            log_file_path: None,
            http_timeout_seconds: default_http_timeout(),
        }
    }
}

/// Adds an https:// scheme to bare domains and upgrades http:// for remote
/// hosts. Local development servers keep plain http.
pub fn normalize_url(url: &str) -> String {
    let url = url.trim();
    let without_scheme = url
        .trim_start_matches("https://")
        .trim_start_matches("http://");
    let is_local = without_scheme.starts_with("localhost") || without_scheme.starts_with("127.0.0.1");

    if url.starts_with("https://") {
        url.to_string()
    } else if is_local {
        format!("http://{without_scheme}")
    } else {
        format!("https://{without_scheme}")
    }
}

impl Config {
    /// Loads configuration from the default config file location.
    /// If no config file exists, prompts for the backend URL and creates one.
    /// Environment variables override config file values.
    ///
    /// # Environment Variables
    /// - `CLUB_STANDINGS_BACKEND_URL` - Override backend URL
    /// - `CLUB_STANDINGS_FEED_URL` - Override results feed URL
    /// - `CLUB_STANDINGS_LOG_FILE` - Override log file path
    /// - `CLUB_STANDINGS_HTTP_TIMEOUT` - Override HTTP timeout in seconds
    pub async fn load() -> Result<Self, AppError> {
        let config_path = get_config_path();

        let mut config = if Path::new(&config_path).exists() {
            Self::load_from_path(&config_path).await?
        } else if let Ok(backend_url) = std::env::var(env_vars::BACKEND_URL) {
            Config {
                backend_url,
                ..Config::default()
            }
        } else {
            let config = Config {
                backend_url: prompt_for_backend_url().await?,
                ..Config::default()
            };
            config.save().await?;
            config
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Applies `CLUB_STANDINGS_*` environment variables on top of the loaded values.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(backend_url) = std::env::var(env_vars::BACKEND_URL) {
            self.backend_url = backend_url;
        }

        if let Ok(feed_url) = std::env::var(env_vars::FEED_URL) {
            self.feed_url = feed_url;
        }

        if let Ok(log_file_path) = std::env::var(env_vars::LOG_FILE) {
            self.log_file_path = Some(log_file_path);
        }

        if let Some(timeout) = std::env::var(env_vars::HTTP_TIMEOUT)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            self.http_timeout_seconds = timeout;
        }
    }

    /// Validates the configuration settings
    pub fn validate(&self) -> Result<(), AppError> {
        validate_config(
            &self.backend_url,
            &self.feed_url,
            &self.log_file_path,
            self.http_timeout_seconds,
        )
    }

    /// Saves current configuration to the default config file location.
    pub async fn save(&self) -> Result<(), AppError> {
        let config_path = get_config_path();
        self.save_to_path(&config_path).await
    }

    /// Returns the platform-specific path for the config file.
    pub fn get_config_path() -> String {
        paths::get_config_path()
    }

    /// Returns the platform-specific path for the log directory.
    pub fn get_log_dir_path() -> String {
        paths::get_log_dir_path()
    }

    /// Displays current configuration settings to stdout.
    pub async fn display() -> Result<(), AppError> {
        let config_path = get_config_path();

        if Path::new(&config_path).exists() {
            let config = Config::load().await?;
            println!("\nCurrent Configuration");
            println!("────────────────────────────────────");
            println!("Config Location:");
            println!("{config_path}");
            println!("────────────────────────────────────");
            println!("Backend URL:");
            println!("{}", config.backend_url);
            println!("────────────────────────────────────");
            println!("Results Feed URL:");
            println!("{}", config.feed_url);
            println!("────────────────────────────────────");
            println!("HTTP Timeout:");
            println!("{} seconds", config.http_timeout_seconds);
            println!("────────────────────────────────────");
            println!("Log File Location:");
            if let Some(custom_path) = &config.log_file_path {
                println!("{custom_path}");
            } else {
                println!("{}", get_default_log_file_path());
                println!("(Default location)");
            }
        } else {
            println!("\nNo configuration file found at:");
            println!("{config_path}");
        }

        Ok(())
    }

    /// Saves configuration to a custom file path.
    ///
    /// Creates the parent directory if it doesn't exist and normalizes both
    /// URLs with [`normalize_url`].
    ///
    /// # Errors
    /// * `AppError::Config` - If the provided path has no parent directory
    /// * `AppError::Io` - If there's an I/O error creating directories or writing the file
    /// * `AppError::TomlSerialize` - If there's an error serializing the configuration
    pub async fn save_to_path(&self, path: &str) -> Result<(), AppError> {
        let config_dir = Path::new(path).parent().ok_or_else(|| {
            AppError::config_error(format!("Path '{path}' has no parent directory"))
        })?;

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).await?;
        }

        let content = toml::to_string_pretty(&Config {
            backend_url: normalize_url(&self.backend_url),
            feed_url: normalize_url(&self.feed_url),
            log_file_path: self.log_file_path.clone(),
            http_timeout_seconds: self.http_timeout_seconds,
        })?;
        let mut file = fs::File::create(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Loads configuration from a custom file path without env overrides.
    pub async fn load_from_path(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
