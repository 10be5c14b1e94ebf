//! Ordered, typed selector descriptors.
//!
//! Every place that needs "the first element matching one of these
//! heuristics" describes the heuristics as a `&[SelectorSpec]` and goes
//! through [`first_match`], so the priority order is data rather than a chain
//! of `if let` branches.

use scraper::{ElementRef, Selector};

/// One element-matching heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorSpec {
    /// Matches by tag name, e.g. `Tag("li")`.
    Tag(&'static str),
    /// Matches `id="…"` exactly.
    Id(&'static str),
    /// Matches elements whose `class` attribute contains the substring.
    ClassContains(&'static str),
    /// Matches elements whose `id` attribute contains the substring.
    IdContains(&'static str),
    /// Matches elements carrying the attribute, whatever its value.
    HasAttr(&'static str),
    /// Raw CSS selector for cases the typed variants cannot express.
    Css(&'static str),
}

impl SelectorSpec {
    /// Renders the descriptor as a CSS selector string.
    #[must_use]
    pub fn to_css(&self) -> String {
        match self {
            Self::Tag(tag) => (*tag).to_string(),
            Self::Id(id) => format!("[id=\"{id}\"]"),
            Self::ClassContains(part) => format!("[class*=\"{part}\"]"),
            Self::IdContains(part) => format!("[id*=\"{part}\"]"),
            Self::HasAttr(attr) => format!("[{attr}]"),
            Self::Css(css) => (*css).to_string(),
        }
    }

    /// Compiles this descriptor into a [`Selector`].
    ///
    /// # Errors
    ///
    /// Returns the CSS text and parser message when the descriptor does not
    /// form a valid selector.
    pub fn compile(&self) -> Result<Selector, InvalidSelector> {
        parse_css(&self.to_css())
    }
}

/// A selector descriptor that failed to compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidSelector {
    pub css: String,
    pub reason: String,
}

impl std::fmt::Display for InvalidSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid selector \"{}\": {}", self.css, self.reason)
    }
}

/// Compiles the whole list into one selector group (`a, b, c`).
///
/// A group selects in document order, which is what list extraction wants;
/// use [`first_match`] when descriptor priority matters instead.
///
/// # Errors
///
/// Returns [`InvalidSelector`] for the first descriptor that fails to compile.
pub fn compile_group(specs: &[SelectorSpec]) -> Result<Selector, InvalidSelector> {
    for spec in specs {
        spec.compile()?;
    }
    let css = specs
        .iter()
        .map(SelectorSpec::to_css)
        .collect::<Vec<_>>()
        .join(", ");
    parse_css(&css)
}

fn parse_css(css: &str) -> Result<Selector, InvalidSelector> {
    Selector::parse(css).map_err(|e| InvalidSelector {
        css: css.to_string(),
        reason: e.to_string(),
    })
}

/// Returns the first descendant of `root` matching the highest-priority
/// descriptor that matches anything at all.
///
/// Descriptors that fail to compile are logged and skipped.
#[must_use]
pub fn first_match<'a>(root: ElementRef<'a>, specs: &[SelectorSpec]) -> Option<ElementRef<'a>> {
    specs.iter().find_map(|spec| match spec.compile() {
        Ok(selector) => root.select(&selector).next(),
        Err(e) => {
            tracing::warn!(error = %e, "skipping selector descriptor");
            None
        }
    })
}

/// Text of the first element matched by [`first_match`], whitespace-collapsed.
#[must_use]
pub fn first_text(root: ElementRef<'_>, specs: &[SelectorSpec]) -> Option<String> {
    specs.iter().find_map(|spec| {
        let selector = spec.compile().ok()?;
        root.select(&selector)
            .map(|el| collapse_whitespace(&el.text().collect::<String>()))
            .find(|text| !text.is_empty())
    })
}

/// Collapses every whitespace run (including NBSP) to a single space and trims.
#[must_use]
pub fn collapse_whitespace(s: &str) -> String {
    s.split(|c: char| c.is_whitespace() || c == '\u{00A0}')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
