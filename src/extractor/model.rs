use serde::{Deserialize, Serialize};
use url::Url;

/// One property listing pulled from a results page.
///
/// Only cards that yielded both a title and a link become records; price and
/// location are serialized only when found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub title: String,
    pub url: Url,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Fields gathered from a single card before the retention check.
#[derive(Debug, Default)]
pub(crate) struct ListingDraft {
    pub title: Option<String>,
    pub url: Option<Url>,
    pub price: Option<String>,
    pub location: Option<String>,
}

impl ListingDraft {
    pub fn into_record(self) -> Option<ListingRecord> {
        Some(ListingRecord {
            title: self.title?,
            url: self.url?,
            price: self.price,
            location: self.location,
        })
    }
}
