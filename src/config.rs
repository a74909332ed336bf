//! Start-up configuration read from the environment (after `.env`)

use reqwest::Url;
use thiserror::Error;
use tracing::warn;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_HISTORY_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("ATM_API_URL `{0}` is not a valid http(s) URL")]
    InvalidUrl(String),
    #[error("ATM_HISTORY_PAGE_SIZE `{0}` must be a whole number of at least 1")]
    InvalidPageSize(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub history_page_size: usize,
}

impl AppConfig {
    /// Read from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read through `lookup`; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let api_base_url = match get("ATM_API_URL") {
            Some(raw) => {
                let raw = raw.trim().to_string();
                match Url::parse(&raw) {
                    Ok(url) if matches!(url.scheme(), "http" | "https") => {
                        raw.trim_end_matches('/').to_string()
                    }
                    _ => return Err(ConfigError::InvalidUrl(raw)),
                }
            }
            None => {
                warn!("ATM_API_URL not set, using {}", DEFAULT_API_URL);
                DEFAULT_API_URL.to_string()
            }
        };

        let history_page_size = match get("ATM_HISTORY_PAGE_SIZE") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(size) if size >= 1 => size,
                _ => return Err(ConfigError::InvalidPageSize(raw)),
            },
            None => DEFAULT_HISTORY_PAGE_SIZE,
        };

        Ok(Self {
            api_base_url,
            history_page_size,
        })
    }
}
