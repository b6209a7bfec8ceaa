use std::fs;

use crate::extractor::{ExtractError, ListingRecord, extract, try_extract};

const VIVANUNCIOS_SEARCH: &str =
    "https://www.vivanuncios.com.mx/s-renta-inmuebles/distrito-federal/v1c30l1029p1";

fn fixture(name: &str) -> String {
    fs::read_to_string(format!("src/extractor/tests/fixtures/{name}"))
        .expect("Failed to read test fixture")
}

fn record(title: &str, url: &str, price: Option<&str>, location: Option<&str>) -> ListingRecord {
    ListingRecord {
        title: title.to_string(),
        url: url.parse().unwrap(),
        price: price.map(str::to_string),
        location: location.map(str::to_string),
    }
}

#[test]
fn test_single_card_end_to_end() {
    let html = r#"
        <div class="ad-card-wide">
          <a class="ad-card-title" href="/listing/42">2BR Apartment</a>
          <span class="ad-price"> $12,000 </span>
          <span class="ad-location">Roma Norte</span>
        </div>"#;

    let listings = extract(html, "https://site.test/search");

    assert_eq!(
        listings,
        vec![record(
            "2BR Apartment",
            "https://site.test/listing/42",
            Some("$12,000"),
            Some("Roma Norte"),
        )]
    );
}

#[test]
fn test_ad_card_wide_layout() {
    let listings = extract(&fixture("ad_card_wide.html"), VIVANUNCIOS_SEARCH);

    assert_eq!(
        listings,
        vec![
            record(
                "Departamento en Roma Norte",
                "https://www.vivanuncios.com.mx/a-renta-inmuebles/cuauhtemoc/departamento-roma-norte/1001",
                Some("$18,500"),
                Some("Roma Norte, Cuauhtémoc"),
            ),
            // span.ad-price outranks div.price even though the div comes first
            record(
                "Casa con jardín en Coyoacán",
                "https://www.vivanuncios.com.mx/a-renta-inmuebles/coyoacan/casa/1002",
                Some("$31,000"),
                None,
            ),
            // An anchor without href resolves to the page itself
            record("Loft en Juárez", VIVANUNCIOS_SEARCH, None, Some("Juárez")),
        ]
    );
}

#[test]
fn test_title_without_link_is_dropped() {
    let listings = extract(&fixture("ad_card_wide.html"), VIVANUNCIOS_SEARCH);
    assert!(
        listings
            .iter()
            .all(|l| l.title != "Estudio amueblado sin enlace")
    );
}

#[test]
fn test_first_card_rule_wins() {
    // The sponsored tileV2 in the sidebar is ignored once ad-card-wide matched.
    let listings = extract(&fixture("ad_card_wide.html"), VIVANUNCIOS_SEARCH);
    assert!(listings.iter().all(|l| l.title != "Anuncio patrocinado"));
}

#[test]
fn test_tile_layout_resolves_relative_links() {
    let listings = extract(&fixture("tile_v2.html"), "https://site.test/renta/search");

    assert_eq!(
        listings,
        vec![
            record(
                "Penthouse en Polanco",
                "https://site.test/renta/listing/2001",
                Some("$85,000"),
                Some("Polanco V Sección"),
            ),
            record(
                "Departamento en Condesa",
                "https://site.test/otra/2002",
                Some("$24,500"),
                Some("Hipódromo Condesa"),
            ),
        ]
    );
}

#[test]
fn test_data_qa_fallback() {
    let listings = extract(&fixture("data_qa.html"), "https://site.test/search");

    assert_eq!(
        listings,
        vec![
            record(
                "Casa en Tlalpan",
                "https://site.test/listing/3001",
                Some("$15,000"),
                Some("Tlalpan"),
            ),
            record(
                "Cuarto en Iztapalapa",
                "https://site.test/listing/3002",
                None,
                None,
            ),
        ]
    );
}

#[test]
fn test_no_cards_yields_empty() {
    assert!(extract(&fixture("no_cards.html"), "https://site.test/search").is_empty());
    assert!(extract("", "https://site.test/search").is_empty());
}

#[test]
fn test_title_rule_order_beats_document_order() {
    let html = r#"
        <div class="ad-list-card">
          <a href="/otro"><h3>Encabezado genérico</h3></a>
          <a class="ad-card-title" href="/listing/7">Título real</a>
        </div>"#;

    let listings = extract(html, "https://site.test/");

    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].title, "Título real");
    assert_eq!(listings[0].url.as_str(), "https://site.test/listing/7");
}

#[test]
fn test_later_title_rules_not_tried_after_linkless_match() {
    // h2.tile-title matches first but has no anchor; the a[data-qa] title is never consulted.
    let html = r#"
        <div class="ad-listing-card">
          <h2 class="tile-title">Sin enlace</h2>
          <a data-qa="ad-title" href="/listing/8">Con enlace</a>
        </div>"#;

    assert!(extract(html, "https://site.test/").is_empty());
}

#[test]
fn test_nested_text_is_flattened_and_trimmed() {
    let html = r#"
        <article class="listing">
          <a class="href-link" href="/listing/9">
            <strong>Casa</strong> en <em>Santa Fe</em>
          </a>
          <div class="price">
            <span>$</span><span>40,000</span>
          </div>
        </article>"#;

    let listings = extract(html, "https://site.test/");

    assert_eq!(listings[0].title, "Casa en Santa Fe");
    assert_eq!(listings[0].price.as_deref(), Some("$40,000"));
}

#[test]
fn test_extract_is_idempotent() {
    let html = fixture("ad_card_wide.html");
    assert_eq!(
        extract(&html, VIVANUNCIOS_SEARCH),
        extract(&html, VIVANUNCIOS_SEARCH)
    );
}

#[test]
fn test_invalid_base_url_is_a_parse_error() {
    let html = fixture("ad_card_wide.html");

    assert!(matches!(
        try_extract(&html, "not a url"),
        Err(ExtractError::InvalidBaseUrl { .. })
    ));
    assert!(extract(&html, "not a url").is_empty());
}

#[test]
fn test_malformed_html() {
    let html = r#"<div class="ad-card-wide"><a class="ad-card-title" href="/l/1">Casa<span class="ad-price">$5,000"#;

    let listings = extract(html, "https://site.test/");

    // Unclosed tags are repaired by the parser; the price ends up inside the anchor.
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].title, "Casa$5,000");
    assert_eq!(listings[0].price.as_deref(), Some("$5,000"));
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_extract_never_panics(
            html in ".*",
            url in "https://[a-z]+\\.com/.*"
        ) {
            let _ = extract(&html, &url);
        }

        #[test]
        fn test_extract_is_pure(
            body in "[a-zA-Z0-9 <>/=\"-]*",
        ) {
            let html = format!(r#"<div class="ad-card-wide"><a class="ad-card-title" href="/x">{body}</a></div>"#);
            prop_assert_eq!(
                extract(&html, "https://example.com/"),
                extract(&html, "https://example.com/")
            );
        }
    }
}
