use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_EXPORT_DIR: &str = "./exports";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("API_TIMEOUT_SECS must be a positive number of seconds, got {0:?}")]
    InvalidTimeout(String),
    #[error("API_BASE_URL must not be empty")]
    EmptyBaseUrl,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    /// No timeout unless configured.
    pub request_timeout: Option<Duration>,
    pub export_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: None,
            export_dir: PathBuf::from(DEFAULT_EXPORT_DIR),
        }
    }
}

impl AppConfig {
    /// Loads `.env` (if present) and reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_base_url = match lookup("API_BASE_URL") {
            Some(url) if url.trim().is_empty() => return Err(ConfigError::EmptyBaseUrl),
            Some(url) => url.trim().to_string(),
            None => DEFAULT_API_BASE_URL.to_string(),
        };

        let request_timeout = lookup("API_TIMEOUT_SECS")
            .map(|raw| parse_timeout(&raw))
            .transpose()?;

        let export_dir = lookup("EXPORT_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_EXPORT_DIR), PathBuf::from);

        Ok(Self {
            api_base_url,
            request_timeout,
            export_dir,
        })
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout(raw.to_string())),
    }
}
