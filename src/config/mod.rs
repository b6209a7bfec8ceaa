//! Configuration for the demo entry point.
//!
//! Everything comes from environment variables with fallbacks, so the binary
//! runs (and explains what is missing) without any setup.

use std::env;

use thiserror::Error;
use url::Url;

use crate::fetcher::SCRAPE_DO_ENDPOINT;

pub const ENV_API_KEY: &str = "SCRAPE_DO_API_KEY";
pub const ENV_ENDPOINT: &str = "SCRAPE_DO_ENDPOINT";
pub const ENV_TARGET_URL: &str = "SCRAPE_TARGET_URL";
pub const ENV_RENDER_JS: &str = "SCRAPE_RENDER_JS";

/// Stand-in token used when none is configured; the proxy will reject it.
pub const PLACEHOLDER_API_KEY: &str = "test_key_here";
const DEFAULT_TARGET_URL: &str =
    "https://www.vivanuncios.com.mx/s-renta-inmuebles/distrito-federal/v1c30l1029p1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    api_key: String,
    endpoint: String,
    target_url: String,
    render_js: bool,
}

impl Config {
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        target_url: impl Into<String>,
        render_js: bool,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            target_url: target_url.into(),
            render_js,
        }
    }

    /// Load from environment variables, falling back to demo defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var(ENV_API_KEY).unwrap_or_else(|_| PLACEHOLDER_API_KEY.to_string());
        let endpoint = env::var(ENV_ENDPOINT).unwrap_or_else(|_| SCRAPE_DO_ENDPOINT.to_string());
        let target_url = env::var(ENV_TARGET_URL).unwrap_or_else(|_| DEFAULT_TARGET_URL.to_string());
        let render_js = env::var(ENV_RENDER_JS)
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        Url::parse(&endpoint).map_err(|e| ConfigError::InvalidValue {
            field: ENV_ENDPOINT,
            reason: e.to_string(),
        })?;

        Ok(Self {
            api_key,
            endpoint,
            target_url,
            render_js,
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// False while the placeholder token is in use.
    pub fn has_real_api_key(&self) -> bool {
        !self.api_key.is_empty() && self.api_key != PLACEHOLDER_API_KEY
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn target_url(&self) -> &str {
        &self.target_url
    }

    pub fn render_js(&self) -> bool {
        self.render_js
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "true" | "1")
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}
