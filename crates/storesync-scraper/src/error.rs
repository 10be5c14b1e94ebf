use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rate limited by {domain} (retry after {retry_after_secs}s)")]
    RateLimited {
        domain: String,
        retry_after_secs: u64,
    },

    #[error("page not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("expected an HTML page from {url}, got content type \"{content_type}\"")]
    NotHtml { url: String, content_type: String },

    #[error("invalid product URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("could not find the product {field} on {url}")]
    MissingField { url: String, field: &'static str },
}

/// Failure inside a single feature-extraction strategy.
///
/// The pipeline never propagates these: the strategy is logged and treated
/// as a miss, and the cascade moves on.
#[derive(Debug, Error)]
pub enum FeatureError {
    #[error("malformed markup in {context}: {reason}")]
    MalformedMarkup { context: String, reason: String },
}
