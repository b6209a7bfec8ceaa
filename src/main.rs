use anyhow::Result;
use listing_scraper::{
    config::{Config, ENV_API_KEY},
    fetcher::{FetchOptions, ScrapeDoClient},
    scrape::scrape_with,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays valid JSON.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    if !config.has_real_api_key() {
        eprintln!("No {ENV_API_KEY} found in environment variables");
        eprintln!("Set it with: export {ENV_API_KEY}='your_actual_key'");
    }

    let client = ScrapeDoClient::with_endpoint(config.api_key(), config.endpoint())?;

    if std::env::args().skip(1).any(|arg| arg == "--account") {
        let info = client.account_info().await?;
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("Fetching rental listings...");
    let listings = scrape_with(
        &client,
        config.target_url(),
        &FetchOptions::rendered(config.render_js()),
    )
    .await;

    println!("{}", serde_json::to_string_pretty(&listings)?);
    println!("\nTotal listings found: {}", listings.len());
    Ok(())
}
