pub mod errors;
pub mod model;
pub mod rules;

#[cfg(test)]
mod tests;

pub use errors::ExtractError;
pub use model::ListingRecord;

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::extractor::{model::ListingDraft, rules::CompiledRules};

/// Extract listings from a results page, treating any failure as "no listings".
pub fn extract(html: &str, original_url: &str) -> Vec<ListingRecord> {
    try_extract(html, original_url).unwrap_or_else(|error| {
        warn!(%error, "failed to parse listings page");
        Vec::new()
    })
}

/// Extract listings from a results page, in document order.
///
/// Relative links are resolved against `original_url`. Cards lacking a title
/// or a link are skipped.
#[instrument(skip_all, fields(url = %original_url))]
pub fn try_extract(html: &str, original_url: &str) -> Result<Vec<ListingRecord>, ExtractError> {
    let base_url = Url::parse(original_url).map_err(|source| ExtractError::InvalidBaseUrl {
        url: original_url.to_string(),
        source,
    })?;
    let rules = CompiledRules::compile()?;
    let document = Html::parse_document(html);

    let cards = find_cards(&document, &rules);
    if cards.is_empty() {
        debug!("no listing cards matched any rule");
        return Ok(Vec::new());
    }

    let listings: Vec<ListingRecord> = cards
        .iter()
        .filter_map(|card| read_card(*card, &rules, &base_url).into_record())
        .collect();

    info!(cards = cards.len(), listings = listings.len(), "extracted listings");
    Ok(listings)
}

fn find_cards<'a>(document: &'a Html, rules: &CompiledRules) -> Vec<ElementRef<'a>> {
    for selector in &rules.cards {
        let cards: Vec<_> = document.select(selector).collect();
        if !cards.is_empty() {
            return cards;
        }
    }
    document.select(&rules.card_fallback).collect()
}

fn read_card(card: ElementRef<'_>, rules: &CompiledRules, base_url: &Url) -> ListingDraft {
    let mut draft = ListingDraft::default();

    if let Some(title) = first_match(card, &rules.title) {
        draft.title = Some(element_text(title));
        draft.url = enclosing_link(title).and_then(|link| {
            let href = link.value().attr("href").unwrap_or("");
            base_url.join(href).ok()
        });
    }

    draft.price = first_match(card, &rules.price).map(element_text);
    draft.location = first_match(card, &rules.location).map(element_text);
    draft
}

/// First descendant of `card` matched by the earliest rule that matches anything.
fn first_match<'a>(card: ElementRef<'a>, selectors: &[Selector]) -> Option<ElementRef<'a>> {
    selectors
        .iter()
        .find_map(|selector| card.select(selector).next())
}

/// The element itself if it is an anchor, else its nearest anchor ancestor.
fn enclosing_link(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    if element.value().name() == "a" {
        return Some(element);
    }
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| ancestor.value().name() == "a")
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
