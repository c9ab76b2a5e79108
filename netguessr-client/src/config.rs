use reqwest::Url;
use std::env;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: Url,
    pub check_images: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid NETGUESSR_BASE_URL {value:?}: {reason}")]
    InvalidBaseUrl { value: String, reason: String },
    #[error("Invalid NETGUESSR_CHECK_IMAGES {0:?}, expected true or false")]
    InvalidCheckImages(String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup("NETGUESSR_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(&base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            value: base_url.clone(),
            reason: e.to_string(),
        })?;

        let check_images = match lookup("NETGUESSR_CHECK_IMAGES") {
            None => true,
            Some(value) => value
                .parse::<bool>()
                .map_err(|_| ConfigError::InvalidCheckImages(value.clone()))?,
        };

        Ok(Self {
            base_url,
            check_images,
        })
    }
}
