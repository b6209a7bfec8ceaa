//! Ordered selector guesses for the listing page layouts seen in the wild.
//!
//! Each list is tried front to back and the first rule with a match wins.

use scraper::Selector;

use crate::extractor::errors::ExtractError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrConstraint {
    /// Element carries this token among its space-separated classes.
    Class(&'static str),
    /// Element's `data-qa` attribute equals this value exactly.
    DataQa(&'static str),
}

/// An element kind plus an optional attribute constraint.
///
/// A missing tag matches any element; a missing constraint matches on tag alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectorRule {
    pub tag: Option<&'static str>,
    pub constraint: Option<AttrConstraint>,
}

impl SelectorRule {
    pub const fn class(tag: &'static str, class: &'static str) -> Self {
        Self {
            tag: Some(tag),
            constraint: Some(AttrConstraint::Class(class)),
        }
    }

    pub const fn data_qa(tag: &'static str, value: &'static str) -> Self {
        Self {
            tag: Some(tag),
            constraint: Some(AttrConstraint::DataQa(value)),
        }
    }

    pub const fn any_data_qa(value: &'static str) -> Self {
        Self {
            tag: None,
            constraint: Some(AttrConstraint::DataQa(value)),
        }
    }

    pub const fn tag(tag: &'static str) -> Self {
        Self {
            tag: Some(tag),
            constraint: None,
        }
    }

    pub fn css(&self) -> String {
        let mut css = self.tag.unwrap_or("*").to_string();
        match self.constraint {
            Some(AttrConstraint::Class(class)) => {
                css.push('.');
                css.push_str(class);
            }
            Some(AttrConstraint::DataQa(value)) => {
                css.push_str(&format!("[data-qa=\"{value}\"]"));
            }
            None => {}
        }
        css
    }

    pub fn compile(&self) -> Result<Selector, ExtractError> {
        let css = self.css();
        Selector::parse(&css).map_err(|e| ExtractError::Selector {
            reason: e.to_string(),
            css: css.clone(),
        })
    }
}

pub type SelectorRuleList = &'static [SelectorRule];

pub const CARD_RULES: SelectorRuleList = &[
    SelectorRule::class("div", "ad-card-wide"),
    SelectorRule::class("div", "tileV2"),
    SelectorRule::class("article", "listing"),
    SelectorRule::class("div", "ad-listing-card"),
    SelectorRule::class("div", "tile-wrap"),
    SelectorRule::class("div", "ad-list-card"),
];

/// Tried only when every rule in [`CARD_RULES`] comes up empty.
pub const CARD_FALLBACK_RULE: SelectorRule = SelectorRule::any_data_qa("ad-card");

pub const TITLE_RULES: SelectorRuleList = &[
    SelectorRule::class("a", "ad-card-title"),
    SelectorRule::class("h2", "tile-title"),
    SelectorRule::class("a", "href-link"),
    SelectorRule::tag("h3"),
    SelectorRule::data_qa("a", "ad-title"),
];

pub const PRICE_RULES: SelectorRuleList = &[
    SelectorRule::class("span", "ad-price"),
    SelectorRule::class("div", "price"),
    SelectorRule::class("span", "tile-price"),
    SelectorRule::class("div", "ad-card-price"),
    SelectorRule::data_qa("span", "ad-price"),
];

pub const LOCATION_RULES: SelectorRuleList = &[
    SelectorRule::class("span", "ad-location"),
    SelectorRule::class("div", "location"),
    SelectorRule::class("span", "tile-location"),
    SelectorRule::class("div", "ad-card-location"),
    SelectorRule::data_qa("span", "ad-location"),
];

/// Every rule table compiled to `scraper` selectors, order preserved.
#[derive(Debug)]
pub struct CompiledRules {
    pub cards: Vec<Selector>,
    pub card_fallback: Selector,
    pub title: Vec<Selector>,
    pub price: Vec<Selector>,
    pub location: Vec<Selector>,
}

impl CompiledRules {
    pub fn compile() -> Result<Self, ExtractError> {
        Ok(Self {
            cards: compile_list(CARD_RULES)?,
            card_fallback: CARD_FALLBACK_RULE.compile()?,
            title: compile_list(TITLE_RULES)?,
            price: compile_list(PRICE_RULES)?,
            location: compile_list(LOCATION_RULES)?,
        })
    }
}

fn compile_list(rules: SelectorRuleList) -> Result<Vec<Selector>, ExtractError> {
    rules.iter().map(SelectorRule::compile).collect()
}
