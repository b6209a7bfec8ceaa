use crate::fetcher::{
    errors::FetchError,
    pipeline::process_response,
    types::{FetchOptions, ProxyResponse},
};
use reqwest::{
    Client, ClientBuilder,
    header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use tracing::{debug, instrument, warn};
use url::Url;

pub const SCRAPE_DO_ENDPOINT: &str = "https://api.scrape.do";

const USER_AGENT: &str = concat!("listing-scraper/", env!("CARGO_PKG_VERSION"));
const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Client for the scrape.do proxy API.
///
/// The token travels as a query parameter on every request, so the client
/// never logs full request URLs.
#[derive(Debug, Clone)]
pub struct ScrapeDoClient {
    http: Client,
    endpoint: Url,
    api_key: String,
}

impl ScrapeDoClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, FetchError> {
        Self::with_endpoint(api_key, SCRAPE_DO_ENDPOINT)
    }

    pub fn with_endpoint(api_key: impl Into<String>, endpoint: &str) -> Result<Self, FetchError> {
        let endpoint = Url::parse(endpoint)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));

        let http = ClientBuilder::new()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(FetchError::from_reqwest_error)?;

        Ok(Self {
            http,
            endpoint,
            api_key: api_key.into(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Upstream URL for `target_url`: `token`, then `url`, then any set flags.
    pub fn request_url(&self, target_url: &str, options: &FetchOptions) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("token", &self.api_key);
            query.append_pair("url", target_url);
            for (key, value) in options.query_pairs() {
                query.append_pair(key, &value);
            }
        }
        url
    }

    #[instrument(skip_all, fields(target = %target_url, render = options.render))]
    pub async fn fetch(
        &self,
        target_url: &str,
        options: &FetchOptions,
    ) -> Result<ProxyResponse, FetchError> {
        // The proxy would reject it anyway; fail before spending a credit.
        Url::parse(target_url)?;

        let response = self
            .http
            .get(self.request_url(target_url, options))
            .send()
            .await
            .map_err(FetchError::from_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "proxy rejected request");
            return Err(FetchError::Http {
                status,
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|ct| ct.to_str().ok())
            .unwrap_or("text/html")
            .to_string();

        let body_bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::Io(e.to_string()))?;

        debug!(bytes = body_bytes.len(), %content_type, "received page body");

        Ok(process_response(
            target_url.to_string(),
            status,
            body_bytes,
            &content_type,
        ))
    }

    /// Account details (plan, remaining credits) as reported by the proxy.
    #[instrument(skip_all)]
    pub async fn account_info(&self) -> Result<serde_json::Value, FetchError> {
        let mut url = self.endpoint.join("info")?;
        url.query_pairs_mut().append_pair("token", &self.api_key);

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(FetchError::from_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Http {
                status,
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| FetchError::Io(e.to_string()))
    }
}

/// Fetch `target_url` through the default proxy endpoint and return its HTML.
pub async fn fetch(target_url: &str, api_key: &str, render_js: bool) -> Result<String, FetchError> {
    let client = ScrapeDoClient::new(api_key)?;
    let response = client
        .fetch(target_url, &FetchOptions::rendered(render_js))
        .await?;
    Ok(response.body_utf8)
}
