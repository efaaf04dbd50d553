use std::net::SocketAddr;
use std::time::Duration;

/// Server configuration, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub api_url: String,
    pub token: Option<String>,
    pub request_timeout: Duration,
    pub reset_page_on_search: bool,
    pub placeholder_image: String,
}

pub const DEFAULT_API_URL: &str = "https://recipe-full.onrender.com";
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "istockphoto-520410807-612x612.jpg";

impl Config {
    /// Load configuration from environment variables.
    /// Every variable is optional.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let listen_addr = var("COOKBOOK_LISTEN_ADDR")
            .unwrap_or_else(|| "0.0.0.0:3000".to_string())
            .parse()
            .map_err(|_| {
                ConfigError::Invalid("COOKBOOK_LISTEN_ADDR", "must be a valid socket address")
            })?;

        let api_url = var("COOKBOOK_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(ConfigError::Invalid(
                "COOKBOOK_API_URL",
                "must be an http:// or https:// URL",
            ));
        }

        let token = var("COOKBOOK_TOKEN").filter(|t| !t.trim().is_empty());

        let timeout_secs: u64 = match var("COOKBOOK_REQUEST_TIMEOUT_SECS") {
            Some(s) => s.parse().map_err(|_| {
                ConfigError::Invalid("COOKBOOK_REQUEST_TIMEOUT_SECS", "must be a valid u64")
            })?,
            None => 10,
        };
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "COOKBOOK_REQUEST_TIMEOUT_SECS",
                "must be greater than zero",
            ));
        }

        let reset_page_on_search = match var("COOKBOOK_RESET_PAGE_ON_SEARCH").as_deref() {
            None | Some("") | Some("0") | Some("false") => false,
            Some("1") | Some("true") => true,
            Some(_) => {
                return Err(ConfigError::Invalid(
                    "COOKBOOK_RESET_PAGE_ON_SEARCH",
                    "must be true or false",
                ))
            }
        };

        let placeholder_image = var("COOKBOOK_PLACEHOLDER_IMAGE")
            .unwrap_or_else(|| DEFAULT_PLACEHOLDER_IMAGE.to_string());

        Ok(Config {
            listen_addr,
            api_url,
            token,
            request_timeout: Duration::from_secs(timeout_secs),
            reset_page_on_search,
            placeholder_image,
        })
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Invalid(&'static str, &'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Invalid(var, msg) => write!(f, "Invalid value for {}: {}", var, msg),
        }
    }
}

impl std::error::Error for ConfigError {}
