use bytes::Bytes;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Charset {
    Utf8,
    Windows1252,
    Other(String),
}

impl Charset {
    pub fn from_encoding(encoding: &'static encoding_rs::Encoding) -> Self {
        use std::ptr;

        if ptr::eq(encoding, encoding_rs::UTF_8) {
            Self::Utf8
        } else if ptr::eq(encoding, encoding_rs::WINDOWS_1252) {
            Self::Windows1252
        } else {
            Self::Other(encoding.name().to_string())
        }
    }

    pub fn encoding(&self) -> &'static encoding_rs::Encoding {
        match self {
            Self::Utf8 => encoding_rs::UTF_8,
            Self::Windows1252 => encoding_rs::WINDOWS_1252,
            Self::Other(name) => {
                encoding_rs::Encoding::for_label(name.as_bytes()).unwrap_or(encoding_rs::UTF_8)
            }
        }
    }
}

/// Flags forwarded to the scraping proxy alongside the token and target URL.
///
/// Only flags that are set end up in the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// Ask the proxy to execute JavaScript before returning the page.
    pub render: bool,
    /// Route through residential/mobile proxies (`super=true`).
    pub super_proxy: bool,
    /// Two-letter country code for geo-targeted exits.
    pub geo_code: Option<String>,
    /// Sticky session so consecutive requests share an exit IP.
    pub session_number: Option<u32>,
    /// Browser lifecycle event to wait for when rendering.
    pub wait_until: Option<String>,
}

impl FetchOptions {
    pub fn rendered(render: bool) -> Self {
        Self {
            render,
            ..Self::default()
        }
    }

    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if self.render {
            pairs.push(("render", "true".to_string()));
        }
        if self.super_proxy {
            pairs.push(("super", "true".to_string()));
        }
        if let Some(geo_code) = &self.geo_code {
            pairs.push(("geoCode", geo_code.clone()));
        }
        if let Some(session) = self.session_number {
            pairs.push(("sessionNumber", session.to_string()));
        }
        if let Some(wait_until) = &self.wait_until {
            pairs.push(("waitUntil", wait_until.clone()));
        }
        pairs
    }
}

/// A page fetched through the proxy, buffered and decoded.
#[derive(Debug)]
pub struct ProxyResponse {
    pub target_url: String,
    pub status: StatusCode,
    pub body_raw: Bytes,
    pub body_utf8: String,
    pub charset: Charset,
    pub fetched_at: DateTime<Utc>,
}
