use thiserror::Error;

/// Failure to turn a fetched page into listing records.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("invalid base url {url:?}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("selector {css:?} failed to compile: {reason}")]
    Selector { css: String, reason: String },
}
