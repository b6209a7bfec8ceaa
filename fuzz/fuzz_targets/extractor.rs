#![no_main]

use libfuzzer_sys::fuzz_target;

use listing_scraper::extractor::extract;

fuzz_target!(|data: &[u8]| {
    let html = String::from_utf8_lossy(data);

    // The extractor should never panic regardless of input
    let _ = extract(&html, "https://example.com/search");
});
