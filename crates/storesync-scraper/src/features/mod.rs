//! Product feature extraction.
//!
//! [`extract_features`] runs a cascade of strategies against a scraped page,
//! from the most structured source (a dedicated specifications list) down to
//! free text split on keyword hints, and keeps the output of the first one
//! that finds anything.

mod markup;
mod pattern;
mod pipeline;
mod segment;
mod vocabulary;

use std::fmt;

use scraper::{ElementRef, Html};
use serde::Serialize;

pub use markup::{
    extract_from_element, extract_from_markup, BROAD_ITEM_SELECTORS, DEFAULT_ITEM_SELECTORS,
};
pub use pattern::{extract_labeled_span, LabelRules};
pub use pipeline::{
    extract_features, normalize_features, DedicatedContainer, DescriptionListFallback,
    DescriptionListMarkup, FeaturePipeline, FeatureStrategy, FeaturesContainerBroad,
    LabeledTextPattern, ShortDescriptionText, SPEC_CONTAINER_SELECTORS,
};
pub use segment::segment;
pub use vocabulary::{LabelPattern, Vocabulary};

pub(crate) use markup::element_text;

/// Which cascade step produced a [`FeatureList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureSource {
    DedicatedList,
    LabeledTextPattern,
    DescriptionListMarkup,
    FeaturesContainer,
    ShortDescriptionText,
    DescriptionListFallback,
}

impl FeatureSource {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DedicatedList => "dedicated_list",
            Self::LabeledTextPattern => "labeled_text_pattern",
            Self::DescriptionListMarkup => "description_list_markup",
            Self::FeaturesContainer => "features_container",
            Self::ShortDescriptionText => "short_description_text",
            Self::DescriptionListFallback => "description_list_fallback",
        }
    }
}

impl fmt::Display for FeatureSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized features for one page, tagged with the strategy that found
/// them. Entries are trimmed, at least four characters long, free of
/// stop-phrases and unique. An empty list is a valid outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeatureList {
    source: Option<FeatureSource>,
    items: Vec<String>,
}

impl FeatureList {
    pub(crate) fn new(source: FeatureSource, items: Vec<String>) -> Self {
        Self {
            source: Some(source),
            items,
        }
    }

    /// `None` when no strategy produced anything.
    #[must_use]
    pub fn source(&self) -> Option<FeatureSource> {
        self.source
    }

    #[must_use]
    pub fn items(&self) -> &[String] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// The product region of a page, parsed once and shared by every strategy
/// that searches for a specifications container.
#[derive(Debug, Clone)]
pub struct DomRegion {
    html: Html,
}

impl DomRegion {
    #[must_use]
    pub fn parse(fragment: &str) -> Self {
        Self {
            html: Html::parse_fragment(fragment),
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::parse("")
    }

    #[must_use]
    pub fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }
}

impl Default for DomRegion {
    fn default() -> Self {
        Self::empty()
    }
}
