//! The extraction cascade: six strategies, most structured first, stopping at
//! the first one that yields anything.

use std::collections::HashSet;

use scraper::Html;
use storesync_core::PageExtract;

use super::markup::{
    extract_from_element, extract_from_markup, extract_matching, BROAD_ITEM_SELECTORS,
    DEFAULT_ITEM_SELECTORS,
};
use super::pattern::LabelRules;
use super::segment::{segment, starts_with_marker, MIN_SEGMENT_CHARS};
use super::vocabulary::Vocabulary;
use super::{DomRegion, FeatureList, FeatureSource};
use crate::error::FeatureError;
use crate::selectors::{first_match, SelectorSpec};

/// Heuristics for a region dedicated to specifications, highest priority
/// first. Tab-navigation links carry the same class words as the panels they
/// open, so list items and anchors are excluded from the class matches.
pub const SPEC_CONTAINER_SELECTORS: &[SelectorSpec] = &[
    SelectorSpec::Id("tab-specification"),
    SelectorSpec::Id("tab-specifications"),
    SelectorSpec::Id("specifications"),
    SelectorSpec::Css("[class*=\"specification\"]:not(li):not(a)"),
    SelectorSpec::IdContains("specification"),
    SelectorSpec::Css("[class*=\"product-features\"]:not(li):not(a)"),
    SelectorSpec::IdContains("features"),
    SelectorSpec::Css("[class*=\"features\"]:not(li):not(a)"),
    SelectorSpec::Css("[class*=\"specs\"]:not(li):not(a)"),
    SelectorSpec::Css("[data-tab*=\"spec\"]"),
    SelectorSpec::Id("tab-additional_information"),
    SelectorSpec::Css("table.woocommerce-product-attributes"),
];

const DESCRIPTION_LINE_SELECTORS: &[SelectorSpec] =
    &[SelectorSpec::Tag("li"), SelectorSpec::Tag("p")];

/// One step of the cascade.
///
/// An empty `Vec` is a miss, not an error. `Err` means the strategy could not
/// run at all; the pipeline logs it and moves to the next step.
pub trait FeatureStrategy {
    fn source(&self) -> FeatureSource;

    /// # Errors
    ///
    /// Returns [`FeatureError`] when the strategy cannot evaluate its input.
    fn try_extract(
        &self,
        page: &PageExtract,
        container: &DomRegion,
        vocab: &Vocabulary,
    ) -> Result<Vec<String>, FeatureError>;
}

/// Step 1: list markup inside a dedicated specifications region.
pub struct DedicatedContainer;

impl FeatureStrategy for DedicatedContainer {
    fn source(&self) -> FeatureSource {
        FeatureSource::DedicatedList
    }

    fn try_extract(
        &self,
        _page: &PageExtract,
        container: &DomRegion,
        vocab: &Vocabulary,
    ) -> Result<Vec<String>, FeatureError> {
        match first_match(container.root(), SPEC_CONTAINER_SELECTORS) {
            Some(region) => extract_from_element(region, DEFAULT_ITEM_SELECTORS, vocab),
            None => Ok(Vec::new()),
        }
    }
}

/// Step 2: a "features:" block in the rendered page text.
pub struct LabeledTextPattern {
    rules: LabelRules,
}

impl LabeledTextPattern {
    #[must_use]
    pub fn new(vocab: &Vocabulary) -> Self {
        Self {
            rules: LabelRules::compile(&vocab.label_patterns()),
        }
    }
}

impl FeatureStrategy for LabeledTextPattern {
    fn source(&self) -> FeatureSource {
        FeatureSource::LabeledTextPattern
    }

    fn try_extract(
        &self,
        page: &PageExtract,
        _container: &DomRegion,
        vocab: &Vocabulary,
    ) -> Result<Vec<String>, FeatureError> {
        Ok(segment_labeled_span(&self.rules, &page.visible_text, vocab))
    }
}

/// Step 3: list markup inside the description, or the short description
/// when there is no long one.
pub struct DescriptionListMarkup;

impl FeatureStrategy for DescriptionListMarkup {
    fn source(&self) -> FeatureSource {
        FeatureSource::DescriptionListMarkup
    }

    fn try_extract(
        &self,
        page: &PageExtract,
        _container: &DomRegion,
        vocab: &Vocabulary,
    ) -> Result<Vec<String>, FeatureError> {
        extract_from_markup(page.description_or_short_html(), DEFAULT_ITEM_SELECTORS, vocab)
    }
}

/// Step 4: the step-1 region again, with table rows and generic blocks.
pub struct FeaturesContainerBroad;

impl FeatureStrategy for FeaturesContainerBroad {
    fn source(&self) -> FeatureSource {
        FeatureSource::FeaturesContainer
    }

    fn try_extract(
        &self,
        _page: &PageExtract,
        container: &DomRegion,
        vocab: &Vocabulary,
    ) -> Result<Vec<String>, FeatureError> {
        match first_match(container.root(), SPEC_CONTAINER_SELECTORS) {
            Some(region) => extract_from_element(region, BROAD_ITEM_SELECTORS, vocab),
            None => Ok(Vec::new()),
        }
    }
}

/// Step 5: the short-description text, first as a labeled block, then as
/// free text split on keyword hints.
pub struct ShortDescriptionText {
    rules: LabelRules,
}

impl ShortDescriptionText {
    #[must_use]
    pub fn new(vocab: &Vocabulary) -> Self {
        Self {
            rules: LabelRules::compile(&vocab.label_patterns()),
        }
    }
}

impl FeatureStrategy for ShortDescriptionText {
    fn source(&self) -> FeatureSource {
        FeatureSource::ShortDescriptionText
    }

    fn try_extract(
        &self,
        page: &PageExtract,
        _container: &DomRegion,
        vocab: &Vocabulary,
    ) -> Result<Vec<String>, FeatureError> {
        let text = page.short_description_text.trim();
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let labeled = segment_labeled_span(&self.rules, text, vocab);
        if !labeled.is_empty() {
            return Ok(labeled);
        }
        Ok(segment(text, &vocab.hints()))
    }
}

/// Step 6: description list items and paragraphs that read like list lines
/// (numbered, bulleted, or opening with a keyword hint).
pub struct DescriptionListFallback;

impl FeatureStrategy for DescriptionListFallback {
    fn source(&self) -> FeatureSource {
        FeatureSource::DescriptionListFallback
    }

    fn try_extract(
        &self,
        page: &PageExtract,
        _container: &DomRegion,
        vocab: &Vocabulary,
    ) -> Result<Vec<String>, FeatureError> {
        if page.description_html.trim().is_empty() {
            return Ok(Vec::new());
        }
        let html = Html::parse_fragment(&page.description_html);
        extract_matching(html.root_element(), DESCRIPTION_LINE_SELECTORS, vocab, |raw| {
            starts_with_marker(raw) || vocab.starts_with_hint(raw)
        })
    }
}

fn segment_labeled_span(rules: &LabelRules, text: &str, vocab: &Vocabulary) -> Vec<String> {
    rules
        .find_span(text)
        .map(|span| segment(&span, &vocab.hints()))
        .unwrap_or_default()
}

/// Runs the strategy cascade against one page.
pub struct FeaturePipeline {
    vocabulary: Vocabulary,
    strategies: Vec<Box<dyn FeatureStrategy>>,
}

impl Default for FeaturePipeline {
    fn default() -> Self {
        Self::with_vocabulary(Vocabulary::default())
    }
}

impl FeaturePipeline {
    /// The standard six-step cascade over a custom vocabulary. Label rules
    /// are compiled here, once per pipeline.
    #[must_use]
    pub fn with_vocabulary(vocabulary: Vocabulary) -> Self {
        let strategies: Vec<Box<dyn FeatureStrategy>> = vec![
            Box::new(DedicatedContainer),
            Box::new(LabeledTextPattern::new(&vocabulary)),
            Box::new(DescriptionListMarkup),
            Box::new(FeaturesContainerBroad),
            Box::new(ShortDescriptionText::new(&vocabulary)),
            Box::new(DescriptionListFallback),
        ];
        Self::with_strategies(vocabulary, strategies)
    }

    #[must_use]
    pub fn with_strategies(
        vocabulary: Vocabulary,
        strategies: Vec<Box<dyn FeatureStrategy>>,
    ) -> Self {
        Self {
            vocabulary,
            strategies,
        }
    }

    #[must_use]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Returns the normalized output of the first strategy that produces at
    /// least one feature, or an empty list when none does.
    ///
    /// A strategy counts as successful only if something survives
    /// normalization. Strategy errors are logged and skipped.
    #[must_use]
    pub fn run(&self, page: &PageExtract, container: &DomRegion) -> FeatureList {
        for strategy in &self.strategies {
            let source = strategy.source();
            let raw = match strategy.try_extract(page, container, &self.vocabulary) {
                Ok(raw) => raw,
                Err(e) => {
                    tracing::warn!(strategy = %source, error = %e, "feature strategy failed, trying next");
                    continue;
                }
            };

            let items = normalize_features(raw, &self.vocabulary);
            if items.is_empty() {
                tracing::debug!(strategy = %source, "feature strategy found nothing");
                continue;
            }

            tracing::debug!(strategy = %source, count = items.len(), "features extracted");
            return FeatureList::new(source, items);
        }

        tracing::debug!(product = %page.name, "no feature strategy matched");
        FeatureList::default()
    }
}

/// Final clean-up shared by every strategy: trim, drop short and
/// stop-phrase entries, drop repeats keeping the first occurrence.
#[must_use]
pub fn normalize_features(raw: Vec<String>, vocab: &Vocabulary) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.into_iter()
        .map(|entry| entry.trim().to_string())
        .filter(|entry| entry.chars().count() >= MIN_SEGMENT_CHARS)
        .filter(|entry| !vocab.is_stop_phrase(entry))
        .filter(|entry| seen.insert(entry.clone()))
        .collect()
}

/// Runs the default pipeline.
#[must_use]
pub fn extract_features(page: &PageExtract, container: &DomRegion) -> FeatureList {
    FeaturePipeline::default().run(page, container)
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
