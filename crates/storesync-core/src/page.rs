use serde::{Deserialize, Serialize};

/// Text and markup scraped from a single product page, scoped to the product
/// region. Produced once per scrape by the page extractor and never mutated
/// afterwards.
///
/// Every field may be empty. An empty field means the page did not carry that
/// piece of content, which is an ordinary outcome rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageExtract {
    pub name: String,
    /// Inner HTML of the long description tab/section.
    pub description_html: String,
    /// Rendered text of the short description (the excerpt next to the price).
    pub short_description_text: String,
    pub short_description_html: String,
    /// Rendered text of the whole product region, with block elements on
    /// their own lines. Used for labeled-section pattern matching.
    pub visible_text: String,
}

impl PageExtract {
    /// Returns the long description markup, or the short description markup
    /// when the page has no long description.
    #[must_use]
    pub fn description_or_short_html(&self) -> &str {
        if self.description_html.trim().is_empty() {
            &self.short_description_html
        } else {
            &self.description_html
        }
    }
}
