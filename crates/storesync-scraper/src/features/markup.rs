//! Feature candidates from list, definition and paragraph markup.

use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};

use super::segment::{strip_marker_prefix, MIN_SEGMENT_CHARS};
use super::vocabulary::Vocabulary;
use crate::error::FeatureError;
use crate::selectors::{collapse_whitespace, compile_group, SelectorSpec};

/// Elements that normally hold one feature each: list items, definition
/// terms and details, paragraphs, and anything a theme tags as a feature.
pub const DEFAULT_ITEM_SELECTORS: &[SelectorSpec] = &[
    SelectorSpec::Tag("li"),
    SelectorSpec::Tag("dt"),
    SelectorSpec::Tag("dd"),
    SelectorSpec::Tag("p"),
    SelectorSpec::ClassContains("feature"),
    SelectorSpec::ClassContains("spec"),
    SelectorSpec::HasAttr("data-feature"),
];

/// Wider net for a specifications container whose markup did not use lists:
/// table rows, generic blocks and bare spans.
pub const BROAD_ITEM_SELECTORS: &[SelectorSpec] = &[
    SelectorSpec::Tag("tr"),
    SelectorSpec::Tag("li"),
    SelectorSpec::Tag("dt"),
    SelectorSpec::Tag("dd"),
    SelectorSpec::Tag("p"),
    SelectorSpec::Tag("div"),
    SelectorSpec::Tag("span"),
];

const BLOCK_TAGS: &[&str] = &[
    "article", "dd", "div", "dl", "dt", "li", "ol", "p", "section", "table", "tbody", "td", "th",
    "thead", "tr", "ul",
];

/// Parses `fragment` and returns the text of every element matched by
/// `selectors`, in document order.
///
/// Entries of three characters or fewer and stop-phrase entries are dropped.
/// Duplicates are kept.
///
/// # Errors
///
/// Returns [`FeatureError::MalformedMarkup`] when the selector set does not
/// compile. The HTML parser itself recovers from any input.
pub fn extract_from_markup(
    fragment: &str,
    selectors: &[SelectorSpec],
    vocab: &Vocabulary,
) -> Result<Vec<String>, FeatureError> {
    if fragment.trim().is_empty() {
        return Ok(Vec::new());
    }
    let html = Html::parse_fragment(fragment);
    extract_from_element(html.root_element(), selectors, vocab)
}

/// Same as [`extract_from_markup`] over an already parsed subtree. Only
/// descendants of `root` are considered.
///
/// # Errors
///
/// Returns [`FeatureError::MalformedMarkup`] when the selector set does not
/// compile.
pub fn extract_from_element(
    root: ElementRef<'_>,
    selectors: &[SelectorSpec],
    vocab: &Vocabulary,
) -> Result<Vec<String>, FeatureError> {
    extract_matching(root, selectors, vocab, |_| true)
}

/// Like [`extract_from_element`], keeping only items whose raw text satisfies
/// `accept` (checked before marker prefixes are stripped).
///
/// # Errors
///
/// Returns [`FeatureError::MalformedMarkup`] when the selector set does not
/// compile.
pub fn extract_matching<F>(
    root: ElementRef<'_>,
    selectors: &[SelectorSpec],
    vocab: &Vocabulary,
    accept: F,
) -> Result<Vec<String>, FeatureError>
where
    F: Fn(&str) -> bool,
{
    let selector = compile_group(selectors).map_err(|e| FeatureError::MalformedMarkup {
        context: "item selector set".to_string(),
        reason: e.to_string(),
    })?;

    Ok(collect_item_texts(root, &selector)
        .into_iter()
        .filter(|raw| accept(raw))
        .map(|raw| strip_marker_prefix(&raw).trim().to_string())
        .filter(|item| item.chars().count() >= MIN_SEGMENT_CHARS && !vocab.is_stop_phrase(item))
        .collect())
}

/// Walks matches in document order and returns one text per item.
///
/// A matched block that contains other matched blocks (a `ul.features`
/// around its `li`s, an `li` around a `p`) defers to the inner ones. A matched
/// inline element inside another match is already part of that match's text.
fn collect_item_texts(root: ElementRef<'_>, selector: &Selector) -> Vec<String> {
    let mut texts = Vec::new();

    for el in root.select(selector) {
        let wraps_block_match = el
            .descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .any(|d| is_block(d) && selector.matches(&d));
        if wraps_block_match {
            continue;
        }

        if !is_block(el) && has_matched_ancestor(el, root, selector) {
            continue;
        }

        let text = item_text(el);
        if !text.is_empty() {
            texts.push(text);
        }
    }

    texts
}

fn has_matched_ancestor(el: ElementRef<'_>, root: ElementRef<'_>, selector: &Selector) -> bool {
    el.ancestors()
        .take_while(|node| node.id() != root.id())
        .filter_map(ElementRef::wrap)
        .any(|a| selector.matches(&a))
}

fn is_block(el: ElementRef<'_>) -> bool {
    BLOCK_TAGS.contains(&el.value().name())
}

/// Text of one item. Table rows render as `label: value`.
fn item_text(el: ElementRef<'_>) -> String {
    if el.value().name() == "tr" {
        let cells: Vec<String> = el
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|c| matches!(c.value().name(), "td" | "th"))
            .map(element_text)
            .filter(|t| !t.is_empty())
            .collect();
        return cells.join(": ");
    }
    element_text(el)
}

/// Concatenated descendant text with `<br>` and nested blocks treated as
/// word breaks, whitespace-collapsed.
pub(crate) fn element_text(el: ElementRef<'_>) -> String {
    let mut out = String::new();
    for node in el.descendants() {
        match node.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(inner) if inner.name() == "br" || BLOCK_TAGS.contains(&inner.name()) => {
                out.push(' ');
            }
            _ => {}
        }
    }
    collapse_whitespace(&out)
}
