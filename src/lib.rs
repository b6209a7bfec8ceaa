pub mod config;
pub mod extractor;
pub mod fetcher;
pub mod scrape;

pub use extractor::{ListingRecord, extract};
pub use scrape::{ScrapeError, scrape, try_scrape};
