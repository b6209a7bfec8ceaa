use thiserror::Error;
use tracing::{instrument, warn};

use crate::extractor::{ExtractError, ListingRecord, try_extract};
use crate::fetcher::{FetchError, FetchOptions, ScrapeDoClient};

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("transport error: {0}")]
    Transport(#[from] FetchError),

    #[error("parse error: {0}")]
    Parse(#[from] ExtractError),
}

/// Scrape the listings on `target_url` through the scrape.do proxy.
///
/// Never fails: fetch and parse errors are logged and reported as an empty
/// list. Use [`try_scrape`] to tell those apart from a page with no listings.
pub async fn scrape(target_url: &str, api_key: &str, render_js: bool) -> Vec<ListingRecord> {
    match try_scrape(target_url, api_key, render_js).await {
        Ok(listings) => listings,
        Err(error) => {
            warn!(%error, "scrape failed, returning no listings");
            Vec::new()
        }
    }
}

pub async fn try_scrape(
    target_url: &str,
    api_key: &str,
    render_js: bool,
) -> Result<Vec<ListingRecord>, ScrapeError> {
    let client = ScrapeDoClient::new(api_key)?;
    try_scrape_with(&client, target_url, &FetchOptions::rendered(render_js)).await
}

/// Like [`scrape`], with a caller-configured client and proxy flags.
pub async fn scrape_with(
    client: &ScrapeDoClient,
    target_url: &str,
    options: &FetchOptions,
) -> Vec<ListingRecord> {
    match try_scrape_with(client, target_url, options).await {
        Ok(listings) => listings,
        Err(error) => {
            warn!(%error, "scrape failed, returning no listings");
            Vec::new()
        }
    }
}

#[instrument(skip_all, fields(url = %target_url))]
pub async fn try_scrape_with(
    client: &ScrapeDoClient,
    target_url: &str,
    options: &FetchOptions,
) -> Result<Vec<ListingRecord>, ScrapeError> {
    let response = client.fetch(target_url, options).await?;
    Ok(try_extract(&response.body_utf8, target_url)?)
}
