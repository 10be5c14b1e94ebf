//! Product page extraction: turns fetched HTML into a [`ScrapedPage`].
//!
//! The storefront platform is detected first and decides which selector
//! tables apply. Everything is read from the product region (the element
//! wrapping gallery, summary and tabs) when one is found, falling back to
//! the whole document for fields the region does not contain.

mod images;
mod price;
mod profiles;
mod text;

use std::collections::HashSet;

use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use storesync_core::PageExtract;

use crate::client::parse_page_url;
use crate::error::ScraperError;
use crate::features::{element_text, DomRegion};
use crate::selectors::{collapse_whitespace, first_match, first_text, SelectorSpec};
use crate::site::{detect_site_kind, SiteKind};

pub use images::{collect_image_urls, og_image};
pub use price::{extract_prices, normalize_price, PriceInfo};
pub use text::render_text;

use profiles::{profile_for, SiteProfile};

/// Breadcrumb entries that name the shop rather than a category.
const NON_CATEGORY_CRUMBS: &[&str] = &["خانه", "صفحه اصلی", "فروشگاه", "home", "shop", "store"];

/// SKU texts themes print when a product has none.
const EMPTY_SKU_MARKERS: &[&str] = &["n/a", "-", "ندارد", "none"];

/// Everything read from one product page.
#[derive(Debug, Clone, Serialize)]
pub struct ScrapedPage {
    /// Normalized page URL.
    pub url: String,
    pub site_kind: SiteKind,
    pub page: PageExtract,
    /// Outer HTML of the product region, searched for a specifications
    /// container by the feature pipeline.
    #[serde(skip)]
    pub region_html: String,
    pub regular_price: Option<String>,
    pub sale_price: Option<String>,
    pub sku: Option<String>,
    pub image_urls: Vec<String>,
    pub category_names: Vec<String>,
}

impl ScrapedPage {
    /// Parses the product region for feature extraction.
    #[must_use]
    pub fn region(&self) -> DomRegion {
        DomRegion::parse(&self.region_html)
    }
}

/// Extracts product content from a fetched page.
///
/// # Errors
///
/// - [`ScraperError::InvalidUrl`] if `page_url` is not an http(s) URL.
/// - [`ScraperError::MissingField`] if no product name can be found.
pub fn extract_page(html: &str, page_url: &str) -> Result<ScrapedPage, ScraperError> {
    let url = parse_page_url(page_url)
        .map_err(|reason| ScraperError::InvalidUrl {
            url: page_url.to_owned(),
            reason,
        })?
        .to_string();

    let site_kind = detect_site_kind(html);
    let profile = profile_for(site_kind);
    let document = Html::parse_document(html);
    let doc_root = document.root_element();
    let region = product_region(doc_root, profile);

    let name = first_text(region, profile.name)
        .or_else(|| first_text(doc_root, profile.name))
        .or_else(|| meta_content(doc_root, "og:title"))
        .ok_or_else(|| ScraperError::MissingField {
            url: url.clone(),
            field: "name",
        })?;

    let description_html = first_match(region, profile.description)
        .or_else(|| first_match(doc_root, profile.description))
        .map(|el| el.inner_html().trim().to_string())
        .unwrap_or_default();

    let short = first_match(region, profile.short_description);
    let short_description_html = short
        .map(|el| el.inner_html().trim().to_string())
        .unwrap_or_default();
    let short_description_text = short.map(render_text).unwrap_or_default();

    let prices = extract_prices(region, profile.price);
    let sku = first_text(region, profile.sku).and_then(|raw| clean_sku(&raw));

    let mut image_urls = collect_image_urls(region, profile.gallery, &url);
    if image_urls.is_empty() {
        image_urls = collect_image_urls(doc_root, profile.gallery, &url);
    }
    if image_urls.is_empty() {
        image_urls.extend(og_image(doc_root, &url));
    }

    let category_names = category_names(doc_root, profile.categories, &name);

    tracing::debug!(
        url = %url,
        site_kind = %site_kind,
        name = %name,
        images = image_urls.len(),
        categories = category_names.len(),
        has_description = !description_html.is_empty(),
        "extracted product page"
    );

    Ok(ScrapedPage {
        site_kind,
        page: PageExtract {
            name,
            description_html,
            short_description_text,
            short_description_html,
            visible_text: render_text(region),
        },
        region_html: region.html(),
        regular_price: prices.regular,
        sale_price: prices.sale,
        sku,
        image_urls,
        category_names,
        url,
    })
}

fn product_region<'a>(doc_root: ElementRef<'a>, profile: &SiteProfile) -> ElementRef<'a> {
    first_match(doc_root, profile.region)
        .or_else(|| first_match(doc_root, &[SelectorSpec::Tag("body")]))
        .unwrap_or(doc_root)
}

fn meta_content(doc_root: ElementRef<'_>, property: &str) -> Option<String> {
    let selector = Selector::parse(&format!("meta[property=\"{property}\"]")).ok()?;
    doc_root
        .select(&selector)
        .filter_map(|meta| meta.value().attr("content"))
        .map(collapse_whitespace)
        .find(|content| !content.is_empty())
}

/// Strips a `label:` prefix some themes render inside the SKU element and
/// rejects placeholder values.
fn clean_sku(raw: &str) -> Option<String> {
    let value = raw
        .rsplit([':', '：'])
        .next()
        .unwrap_or(raw)
        .trim()
        .to_string();
    let lowered = value.to_lowercase();
    (!value.is_empty() && !EMPTY_SKU_MARKERS.contains(&lowered.as_str())).then_some(value)
}

/// Category names from the first selector that yields any, skipping
/// shop-level crumbs, the product itself, and repeats.
fn category_names(
    doc_root: ElementRef<'_>,
    specs: &[SelectorSpec],
    product_name: &str,
) -> Vec<String> {
    for spec in specs {
        let Ok(selector) = spec.compile() else {
            continue;
        };
        let mut seen = HashSet::new();
        let names: Vec<String> = doc_root
            .select(&selector)
            .map(element_text)
            .filter(|name| !name.is_empty() && name != product_name)
            .filter(|name| !NON_CATEGORY_CRUMBS.contains(&name.to_lowercase().as_str()))
            .filter(|name| seen.insert(name.clone()))
            .collect();
        if !names.is_empty() {
            return names;
        }
    }
    Vec::new()
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
