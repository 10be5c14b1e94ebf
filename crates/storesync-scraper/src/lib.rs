//! Product page scraping and feature extraction.
//!
//! [`PageClient`] fetches a product page, [`extract_page`] reads it into a
//! [`ScrapedPage`], and [`features::extract_features`] turns the page content
//! into a normalized [`features::FeatureList`].

pub mod client;
pub mod error;
pub mod extract;
pub mod features;
pub(crate) mod rate_limit;
pub mod selectors;
pub mod site;

pub use client::PageClient;
pub use error::{FeatureError, ScraperError};
pub use extract::{extract_page, ScrapedPage};
pub use features::{extract_features, DomRegion, FeatureList, FeaturePipeline, FeatureSource};
pub use site::{detect_site_kind, SiteKind};
